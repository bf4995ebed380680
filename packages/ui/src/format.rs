use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count, base 1024: one decimal place below 100 units,
/// none at or above.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if value >= 100.0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

// Medium date + short time, e.g. "Aug 6, 2026, 3:04 PM".
static UPLOADED_AT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period]"
);

pub fn format_uploaded_at(uploaded_at: OffsetDateTime) -> String {
    uploaded_at
        .format(UPLOADED_AT_FORMAT)
        .unwrap_or_else(|_| uploaded_at.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn bytes_below_one_hundred_units_keep_one_decimal() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(10), "10.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(2 * 1024 * 1024 * 1024), "2.0 GB");
    }

    #[test]
    fn bytes_at_or_above_one_hundred_units_drop_decimals() {
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(150 * 1024), "150 KB");
    }

    #[test]
    fn uploaded_at_is_medium_date_short_time() {
        assert_eq!(
            format_uploaded_at(datetime!(2026-08-06 15:04:00 UTC)),
            "Aug 6, 2026, 3:04 PM"
        );
        assert_eq!(
            format_uploaded_at(datetime!(2026-01-02 00:07:00 UTC)),
            "Jan 2, 2026, 12:07 AM"
        );
    }
}
