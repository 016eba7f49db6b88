//! Admin table of registered shops, sourced live from the sheet.

use leptos::*;
use serde_json::Value;

use crate::components::{QrCodeCell, ShopLogoCell};
use crate::models::ShopRecord;
use crate::utils::drive::ensure_protocol;
use crate::utils::gviz::fetch_sheet;
use crate::utils::log::log_error;
use crate::utils::sheet::{parse_rows, resolve, value_text};

/// Display columns, each with its resolver terms in priority order.
const TABLE_COLUMNS: &[(&str, &[&str])] = &[
    ("User Name", &["user name", "user"]),
    ("Shop Name", &["shop name", "name"]),
    ("Shop Logo", &["shop logo url", "logo", "image"]),
    ("Qr Code", &["qr url", "qr", "code"]),
    ("Shop Url", &["shop url", "url", "link"]),
    ("Map Url", &["map url", "map", "location"]),
];

/// Pick a rendering for one resolved cell, keyed by the column's first
/// search term: logo and QR columns become image cells, URL-ish values
/// become an open-in-new-tab button, everything else is plain text with a
/// dash for misses.
fn cell_view(term: &str, value: Option<&Value>, shop: &ShopRecord) -> View {
    let text = value.map(value_text).filter(|text| !text.is_empty());

    if term.contains("logo") {
        return view! { <ShopLogoCell url=text /> }.into_view();
    }
    if term.contains("qr") {
        let shop_name = shop
            .get("Shop Name")
            .map(value_text)
            .filter(|name| !name.is_empty());
        return view! { <QrCodeCell url=text shop_name=shop_name /> }.into_view();
    }
    let Some(text) = text else {
        return "-".into_view();
    };
    let is_url = term.contains("url")
        || text.starts_with("http")
        || text.contains("google.com/maps")
        || text.contains("drive.google.com");
    if is_url {
        let href = ensure_protocol(&text);
        return view! {
            <a class="open-link" href=href target="_blank" rel="noreferrer">
                "Open ↗"
            </a>
        }
        .into_view();
    }
    text.into_view()
}

#[component]
pub fn ShopsGrid() -> impl IntoView {
    let (shops, set_shops) = create_signal(Vec::<ShopRecord>::new());
    let (loading, set_loading) = create_signal(true);

    spawn_local(async move {
        match fetch_sheet(crate::SHEET_ID).await {
            Ok(table) => set_shops.set(parse_rows(&table)),
            Err(e) => log_error("sheet-fetch", &e),
        }
        set_loading.set(false);
    });

    let count_view = move || {
        if loading.get() {
            view! { <span class="pulse">"..."</span> }.into_view()
        } else if shops.with(Vec::is_empty) {
            "-".into_view()
        } else {
            shops.with(Vec::len).into_view()
        }
    };

    view! {
        <div class="shops-grid">
            <div class="stat-card">
                <p class="stat-label">"Total Active Shops"</p>
                <h3 class="stat-value">{count_view}</h3>
            </div>

            <div class="shop-table-card">
                <div class="shop-table-header">
                    <h3>"Registered Shops"</h3>
                    <span class="subtitle">"Live Data from Google Sheets"</span>
                </div>
                <table class="shop-table">
                    <thead>
                        <tr>
                            {move || {
                                if loading.get() || shops.with(Vec::is_empty) {
                                    view! { <th>"Shops"</th> }.into_view()
                                } else {
                                    TABLE_COLUMNS
                                        .iter()
                                        .map(|(label, _)| view! { <th>{*label}</th> })
                                        .collect_view()
                                }
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                view! {
                                    <tr>
                                        <td class="table-status" colspan=TABLE_COLUMNS.len().to_string()>
                                            <div class="spinner"></div>
                                            "Loading shops data..."
                                        </td>
                                    </tr>
                                }
                                .into_view()
                            } else if shops.with(Vec::is_empty) {
                                view! {
                                    <tr>
                                        <td class="table-status" colspan=TABLE_COLUMNS.len().to_string()>
                                            "No shops found."
                                        </td>
                                    </tr>
                                }
                                .into_view()
                            } else {
                                shops.with(|shops| {
                                    shops
                                        .iter()
                                        .map(|shop| {
                                            view! {
                                                <tr>
                                                    {TABLE_COLUMNS
                                                        .iter()
                                                        .map(|(_, terms)| {
                                                            let value = resolve(shop, terms);
                                                            view! { <td>{cell_view(terms[0], value, shop)}</td> }
                                                        })
                                                        .collect_view()}
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                })
                            }
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
