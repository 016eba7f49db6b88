//! Customer-facing review generation page.
//!
//! Reached through a shared link carrying a `pid` query parameter. The
//! page looks the shop up in the sheet by partial place-ID match, collects
//! a free-text review, sends it to the generation webhook and offers to
//! open the shop's Google Maps review page with the result on the
//! clipboard.

use std::collections::HashSet;

use gloo::timers::future::TimeoutFuture;
use leptos::*;

use crate::models::ShopDetails;
use crate::utils;
use crate::utils::drive::direct_drive_link;
use crate::utils::gviz::fetch_sheet;
use crate::utils::log::{log_error, log_info, log_warn};
use crate::utils::sheet::{find_by_place_id, parse_rows, resolve_text, PLACE_ID_TERMS};
use crate::utils::webhook::generate_review;
use crate::utils::{format_shop_name, review_url};

/// Minimum time the loading skeleton stays visible.
const MIN_LOADING_MS: u32 = 4000;

const KEYWORD_CHIPS: &[(&str, &str)] = &[
    ("⭐", "Excellent"),
    ("👍", "Very Good"),
    ("🙂", "Good"),
    ("😐", "Average"),
    ("👎", "Needs Improvement"),
    ("⚠️", "Poor"),
];

/// Open the review posting page in a centered popup window.
fn open_review_popup(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let (width, height) = (600, 800);
    let (mut left, mut top) = (0, 0);
    if let Ok(screen) = window.screen() {
        left = screen.width().unwrap_or(0) / 2 - width / 2;
        top = screen.height().unwrap_or(0) / 2 - height / 2;
    }
    let features = format!(
        "width={},height={},top={},left={},scrollbars=yes,resizable=yes",
        width, height, top, left
    );
    let _ = window.open_with_url_and_target_and_features(url, "GoogleMapReview", &features);
}

/// Grey pulse blocks standing in for the result cards while the webhook
/// runs.
#[component]
fn LoadingSkeleton() -> impl IntoView {
    view! {
        <div class="review-skeleton pulse">
            <div class="skeleton-header">
                <div class="skeleton-block circle"></div>
                <div class="skeleton-block line wide"></div>
                <div class="skeleton-block line"></div>
            </div>
            <div class="skeleton-cards">
                <div class="skeleton-card">
                    <div class="skeleton-block line short"></div>
                    <div class="skeleton-block line wide"></div>
                    <div class="skeleton-block line wide"></div>
                    <div class="skeleton-block line"></div>
                </div>
                <div class="skeleton-card">
                    <div class="skeleton-block line short"></div>
                    <div class="skeleton-block line wide"></div>
                    <div class="skeleton-block line wide"></div>
                    <div class="skeleton-block line"></div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn CustomerReview() -> impl IntoView {
    let (shop, set_shop) = create_signal(None::<ShopDetails>);
    let (review, set_review) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (generated, set_generated) = create_signal(None::<crate::models::GeneratedReview>);
    let (post_disabled, set_post_disabled) = create_signal(true);
    let (copied, set_copied) = create_signal(None::<&'static str>);
    let (selected, set_selected) = create_signal(HashSet::<&'static str>::new());
    let (logo_error, set_logo_error) = create_signal(false);

    // Locate the shop in the sheet once, when the link carries a pid.
    if let Some(pid) = utils::query_param("pid") {
        spawn_local(async move {
            match fetch_sheet(crate::SHEET_ID).await {
                Ok(table) => {
                    let records = parse_rows(&table);
                    match find_by_place_id(&records, PLACE_ID_TERMS, &pid) {
                        Some(record) => {
                            match resolve_text(record, &["shop name", "name"]) {
                                Some(shop_name) => set_shop.set(Some(ShopDetails {
                                    shop_name,
                                    logo_url: resolve_text(
                                        record,
                                        &["shop logo url", "shop logo", "logo"],
                                    )
                                    .map(|url| direct_drive_link(&url)),
                                    place_id: resolve_text(record, PLACE_ID_TERMS),
                                    shop_url: resolve_text(record, &["shop url", "website", "link"]),
                                })),
                                None => log_warn("shop-lookup", "matched row carries no shop name"),
                            }
                        }
                        None => log_info("shop-lookup", &format!("no shop found for pid {}", pid)),
                    }
                }
                Err(e) => log_error("sheet-fetch", &e),
            }
        });
    }

    // While a pid is present the header trusts the sheet alone; the query
    // fallback only applies to direct shopname links.
    let header_text = move || {
        let raw = if utils::query_param("pid").is_some() {
            shop.get().map(|s| s.shop_name)
        } else {
            shop.get()
                .map(|s| s.shop_name)
                .or_else(|| utils::query_param("shopname"))
                .or_else(|| utils::query_param("shop_name"))
        };
        let formatted = format_shop_name(&raw.unwrap_or_default());
        if formatted.is_empty() {
            "Customer Review".to_string()
        } else {
            formatted
        }
    };

    let effective_place_id =
        move || shop.get().and_then(|s| s.place_id).or_else(|| utils::query_param("pid"));

    // Keep the textarea focused whenever the form is the visible state.
    create_effect(move |_| {
        if !loading.get() && generated.with(Option::is_none) {
            utils::focus_element("review");
        }
    });

    let toggle_keyword = move |text: &'static str| {
        if selected.with(|s| s.contains(text)) {
            set_review.update(|r| {
                *r = r.replace(text, "").split_whitespace().collect::<Vec<_>>().join(" ");
            });
            set_selected.update(|s| {
                s.remove(text);
            });
        } else {
            set_review.update(|r| {
                *r = if r.is_empty() {
                    text.to_string()
                } else {
                    format!("{} {}", r, text)
                };
            });
            set_selected.update(|s| {
                s.insert(text);
            });
        }
        utils::focus_element("review");
    };

    let submit = move || {
        let text = review.with(|r| r.trim().to_string());
        if text.is_empty() || loading.get() {
            return;
        }
        let shop_name = shop
            .get()
            .map(|s| s.shop_name)
            .or_else(|| utils::query_param("shopname"))
            .or_else(|| utils::query_param("shop_name"))
            .unwrap_or_else(|| "Unknown Shop".to_string());
        let shop_url = shop
            .get()
            .and_then(|s| s.shop_url)
            .or_else(|| web_sys::window().and_then(|w| w.location().href().ok()))
            .unwrap_or_default();
        set_loading.set(true);
        spawn_local(async move {
            let started = js_sys::Date::now();
            let result = generate_review(&text, &shop_name, &shop_url).await;
            let elapsed = (js_sys::Date::now() - started) as u32;
            if elapsed < MIN_LOADING_MS {
                TimeoutFuture::new(MIN_LOADING_MS - elapsed).await;
            }
            match result {
                Ok(reviews) => {
                    set_generated.set(Some(reviews));
                    set_review.set(String::new());
                }
                Err(message) => utils::alert(&message),
            }
            set_loading.set(false);
        });
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key())
            && ev.key() == "Enter"
            && !review.with(|r| r.trim().is_empty())
        {
            ev.prevent_default();
            submit();
        }
    };

    let on_copy = move |text: String, which: &'static str| {
        utils::copy_to_clipboard(&text);
        set_post_disabled.set(false);
        set_copied.set(Some(which));
        spawn_local(async move {
            TimeoutFuture::new(2000).await;
            set_copied.set(None);
        });
    };

    let post_to_map = move |_| {
        let Some(target) = effective_place_id() else {
            return;
        };
        let Some(reviews) = generated.get() else {
            return;
        };
        utils::copy_to_clipboard(&reviews.short);
        utils::alert(
            "Review text copied! Opening Google Maps in a popup window... \
             Please paste your review there.",
        );
        open_review_popup(&review_url(&target));
    };

    let reset = move || {
        set_generated.set(None);
        set_review.set(String::new());
        set_copied.set(None);
        set_post_disabled.set(true);
        set_selected.update(|s| s.clear());
    };

    view! {
        <div class="review-page">
            <nav class="review-navbar">
                <span class="brand">"Pucho"</span>
                <div class="shop-identity">
                    {move || {
                        match shop.get().and_then(|s| s.logo_url) {
                            Some(src) if !logo_error.get() => view! {
                                <img
                                    class="shop-logo"
                                    src=src
                                    alt="Shop logo"
                                    on:error=move |_| set_logo_error.set(true)
                                />
                            }
                            .into_view(),
                            _ => view! { <div class="shop-logo placeholder">"🏪"</div> }.into_view(),
                        }
                    }}
                    <span class="shop-name">{header_text}</span>
                </div>
            </nav>

            <main class="review-main">
                {move || {
                    if loading.get() {
                        view! { <LoadingSkeleton /> }.into_view()
                    } else if let Some(reviews) = generated.get() {
                        let short = reviews.short.clone();
                        let long = reviews.long.clone();
                        view! {
                            <div class="review-result">
                                <div class="result-header">
                                    <h2>"AI-Generated Review Summary"</h2>
                                    <p>"Here is a summary of your feedback."</p>
                                </div>

                                <div class="result-cards">
                                    <div class="result-card">
                                        <h3>"Short Summary"</h3>
                                        <p class="result-text">{format!("\u{201c}{}\u{201d}", reviews.short)}</p>
                                        <button
                                            class=move || {
                                                if copied.get() == Some("short") { "copy-btn copied" } else { "copy-btn" }
                                            }
                                            on:click=move |_| on_copy(short.clone(), "short")
                                        >
                                            {move || if copied.get() == Some("short") { "Copied!" } else { "Copy Text" }}
                                        </button>
                                    </div>
                                    <div class="result-card">
                                        <h3>"Detailed Review"</h3>
                                        <p class="result-text">{reviews.long.clone()}</p>
                                        <button
                                            class=move || {
                                                if copied.get() == Some("long") { "copy-btn copied" } else { "copy-btn" }
                                            }
                                            on:click=move |_| on_copy(long.clone(), "long")
                                        >
                                            {move || if copied.get() == Some("long") { "Copied!" } else { "Copy Text" }}
                                        </button>
                                    </div>
                                </div>

                                {effective_place_id().map(|_| view! {
                                    <div class="post-map">
                                        <button
                                            class="post-map-btn"
                                            disabled=move || post_disabled.get()
                                            on:click=post_to_map
                                        >
                                            "Post on Map"
                                        </button>
                                    </div>
                                })}

                                <div class="result-reset">
                                    <button class="link-btn" on:click=move |_| reset()>
                                        "Generate another review"
                                    </button>
                                </div>
                            </div>
                        }
                        .into_view()
                    } else {
                        view! {
                            <div class="review-form-card">
                                <div class="form-header">
                                    <h1>"Share your experience"</h1>
                                    <p>"We value your feedback."</p>
                                </div>

                                <form on:submit=move |ev| {
                                    ev.prevent_default();
                                    submit();
                                }>
                                    <textarea
                                        id="review"
                                        rows=6
                                        placeholder="Write your review here..."
                                        prop:value=move || review.get()
                                        on:input=move |ev| set_review.set(event_target_value(&ev))
                                        on:keydown=on_keydown
                                        required
                                    ></textarea>

                                    <div class="keyword-chips">
                                        {KEYWORD_CHIPS.iter().map(|(emoji, text)| {
                                            let text = *text;
                                            view! {
                                                <button
                                                    type="button"
                                                    class=move || {
                                                        if selected.with(|s| s.contains(text)) { "chip selected" } else { "chip" }
                                                    }
                                                    on:click=move |_| toggle_keyword(text)
                                                >
                                                    {*emoji} " " {text}
                                                </button>
                                            }
                                        }).collect_view()}
                                    </div>

                                    <button
                                        type="submit"
                                        class="submit-btn"
                                        disabled=move || loading.get() || review.with(|r| r.trim().is_empty())
                                    >
                                        {move || if loading.get() { "Generating..." } else { "Generate Review" }}
                                    </button>
                                </form>
                            </div>
                        }
                        .into_view()
                    }
                }}
            </main>

            <footer class="review-footer">
                <p>"Powered by Pucho.ai"</p>
            </footer>
        </div>
    }
}
