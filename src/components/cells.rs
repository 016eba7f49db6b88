//! Image-bearing table cells for sheet-backed values.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::utils::drive::{direct_drive_link, drive_download_link};

/// Grey block shown when an image cell has no usable URL, or when the
/// browser fails to load the one it has.
#[component]
pub fn PlaceholderIcon() -> impl IntoView {
    view! { <div class="cell-placeholder">"▢"</div> }
}

/// Synthetic anchor click. The anchor never enters the document.
fn trigger_download(url: &str, filename: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(anchor) = document.create_element("a") {
            let _ = anchor.set_attribute("href", url);
            let _ = anchor.set_attribute("download", filename);
            let _ = anchor.set_attribute("target", "_blank");
            if let Some(element) = anchor.dyn_ref::<web_sys::HtmlElement>() {
                element.click();
            }
        }
    }
}

/// Shop logo: thumbnail image wrapped in a link to the full view.
#[component]
pub fn ShopLogoCell(url: Option<String>) -> impl IntoView {
    let (load_error, set_load_error) = create_signal(false);
    let display = url
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(direct_drive_link);

    match display {
        Some(display) => {
            let href = display.clone();
            view! {
                <a
                    class="cell-image logo-cell"
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    {move || {
                        if load_error.get() {
                            view! { <PlaceholderIcon /> }.into_view()
                        } else {
                            let src = display.clone();
                            view! {
                                <img
                                    src=src
                                    alt="Shop logo"
                                    loading="lazy"
                                    referrerpolicy="no-referrer"
                                    on:error=move |_| set_load_error.set(true)
                                />
                            }
                            .into_view()
                        }
                    }}
                </a>
            }
            .into_view()
        }
        None => view! { <PlaceholderIcon /> }.into_view(),
    }
}

/// QR code image; clicking downloads the file under the shop's name.
#[component]
pub fn QrCodeCell(url: Option<String>, shop_name: Option<String>) -> impl IntoView {
    let (load_error, set_load_error) = create_signal(false);
    let raw = url
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_string);

    match raw {
        Some(raw) => {
            let display = direct_drive_link(&raw);
            let on_download = move |_| {
                let filename = format!(
                    "{}_qr_code.png",
                    shop_name.clone().unwrap_or_else(|| "shop".to_string())
                );
                trigger_download(&drive_download_link(&raw), &filename);
            };
            view! {
                <div
                    class="cell-image qr-cell"
                    title="Click to download QR Code"
                    on:click=on_download
                >
                    {move || {
                        if load_error.get() {
                            view! { <PlaceholderIcon /> }.into_view()
                        } else {
                            let src = display.clone();
                            view! {
                                <img
                                    src=src
                                    alt="QR Code"
                                    loading="lazy"
                                    referrerpolicy="no-referrer"
                                    on:error=move |_| set_load_error.set(true)
                                />
                            }
                            .into_view()
                        }
                    }}
                </div>
            }
            .into_view()
        }
        None => view! { <PlaceholderIcon /> }.into_view(),
    }
}
