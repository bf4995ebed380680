use dioxus::prelude::*;
use serde_json::Value;

use api::types::BlobItem;

use crate::{format_bytes, format_uploaded_at};

// All browser HTTP goes through `fetch` in an async IIFE so the wire traffic
// is exactly the REST surface the server exposes. Each script resolves to
// `{ ok, body }` so the Rust side never throws across the eval boundary.

const LIST_BLOBS_JS: &str = r#"(async function(){
    try {
        const resp = await fetch("/api/blobs");
        const body = await resp.json();
        return { ok: resp.ok, body: body };
    } catch (err) {
        return { ok: false, body: { error: String(err) } };
    }
})()"#;

const UPLOAD_JS: &str = r#"(async function(){
    const el = document.getElementById("blob_file_input");
    if (!el || !el.files || !el.files[0]) return { empty: true };
    const file = el.files[0];
    const data = new FormData();
    data.append("file", file);
    try {
        const resp = await fetch("/api/upload", { method: "POST", body: data });
        const body = await resp.json();
        return { ok: resp.ok, body: body, name: file.name };
    } catch (err) {
        return { ok: false, body: { error: String(err) }, name: file.name };
    } finally {
        el.value = "";
    }
})()"#;

fn delete_js(pathname: &str) -> String {
    format!(
        r#"(async function(){{
    try {{
        const resp = await fetch("/api/delete", {{
            method: "POST",
            headers: {{ "Content-Type": "application/json" }},
            body: JSON.stringify({{ pathname: "{}" }})
        }});
        const body = await resp.json();
        return {{ ok: resp.ok, body: body }};
    }} catch (err) {{
        return {{ ok: false, body: {{ error: String(err) }} }};
    }}
}})()"#,
        js_escape(pathname)
    )
}

fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

async fn eval_json(js: &str) -> Result<Value, String> {
    document::eval(js)
        .await
        .ok()
        .ok_or_else(|| "The browser request could not be completed.".to_string())
}

fn response_error(value: &Value, fallback: &str) -> String {
    value["body"]["error"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

async fn load_blobs() -> Result<Vec<BlobItem>, String> {
    let value = eval_json(LIST_BLOBS_JS).await?;
    if value["ok"].as_bool() != Some(true) {
        return Err(response_error(&value, "Unable to list blobs."));
    }
    serde_json::from_value(value["body"]["blobs"].clone())
        .map_err(|err| format!("Unexpected list payload: {err}"))
}

/// Returns the uploaded file's name, or `None` when no file was selected.
async fn upload_selected_file() -> Result<Option<String>, String> {
    let value = eval_json(UPLOAD_JS).await?;
    if value["empty"].as_bool() == Some(true) {
        return Ok(None);
    }
    let name = value["name"].as_str().unwrap_or("file").to_string();
    if value["ok"].as_bool() != Some(true) {
        return Err(response_error(&value, "Upload failed"));
    }
    Ok(Some(name))
}

async fn delete_blob(pathname: &str) -> Result<(), String> {
    let value = eval_json(&delete_js(pathname)).await?;
    if value["ok"].as_bool() != Some(true) {
        return Err(response_error(&value, "Unable to delete blob"));
    }
    Ok(())
}

/// The whole page: upload panel plus the stored-blob table.
///
/// State is local to the component and re-derived from the server after
/// every mutation; overlapping refreshes are not cancelled, so the last
/// response to resolve wins.
#[component]
pub fn BlobBrowser() -> Element {
    let mut blobs = use_signal(Vec::<BlobItem>::new);
    let mut is_loading = use_signal(|| true);
    let mut message = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let refresh = move || async move {
        is_loading.set(true);
        error.set(None);
        match load_blobs().await {
            Ok(items) => blobs.set(items),
            Err(err) => error.set(Some(err)),
        }
        is_loading.set(false);
    };

    // Initial load happens client-side, after mount.
    use_effect(move || {
        spawn(refresh());
    });

    let items = blobs();

    rsx! {
        div { class: "blob_browser",
            section { class: "panel",
                header { class: "panel_header",
                    h1 { "Blob uploads" }
                    p { class: "hint",
                        "Upload a file to the blob store, then view or delete it using the API routes."
                    }
                }
                label { class: "file_picker",
                    input {
                        id: "blob_file_input",
                        r#type: "file",
                        onchange: move |_| {
                            spawn(async move {
                                message.set(None);
                                error.set(None);
                                match upload_selected_file().await {
                                    Ok(Some(name)) => {
                                        message.set(Some(format!("Uploaded {name}")));
                                        refresh().await;
                                    }
                                    Ok(None) => {}
                                    Err(err) => error.set(Some(err)),
                                }
                            });
                        },
                    }
                    span { "Choose file…" }
                }
                if let Some(text) = message() {
                    p { class: "notice success", "{text}" }
                }
                if let Some(text) = error() {
                    p { class: "notice error", "{text}" }
                }
            }

            section { class: "panel",
                header { class: "panel_header row",
                    h2 { "Stored blobs" }
                    button {
                        class: "link_btn",
                        onclick: move |_| {
                            spawn(refresh());
                        },
                        "Refresh"
                    }
                }
                if is_loading() {
                    p { class: "hint", "Loading…" }
                } else if items.is_empty() {
                    p { class: "hint", "No blobs uploaded yet." }
                } else {
                    table { class: "blob_table",
                        thead {
                            tr {
                                th { "Path" }
                                th { "Size" }
                                th { "Uploaded" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for blob in items.iter() {
                                tr { key: "{blob.pathname}",
                                    td { class: "blob_path",
                                        a {
                                            href: "{blob.url}",
                                            target: "_blank",
                                            rel: "noopener noreferrer",
                                            "{blob.pathname}"
                                        }
                                    }
                                    td { {format_bytes(blob.size)} }
                                    td { {format_uploaded_at(blob.uploaded_at)} }
                                    td {
                                        button {
                                            class: "link_btn danger",
                                            onclick: {
                                                let pathname = blob.pathname.clone();
                                                move |_| {
                                                    let pathname = pathname.clone();
                                                    spawn(async move {
                                                        message.set(None);
                                                        error.set(None);
                                                        match delete_blob(&pathname).await {
                                                            Ok(()) => {
                                                                message.set(Some(format!("Deleted {pathname}")));
                                                                refresh().await;
                                                            }
                                                            Err(err) => error.set(Some(err)),
                                                        }
                                                    });
                                                }
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
