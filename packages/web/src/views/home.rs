use dioxus::prelude::*;
use ui::BlobBrowser;

#[component]
pub fn Home() -> Element {
    rsx! {
        BlobBrowser {}
    }
}
