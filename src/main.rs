use leptos::*;

mod components;
mod models;
mod utils;
mod views;

use views::{CustomerReview, ShopsGrid, UserAdmin};

// ============================================
// Endpoint identifiers
// ============================================

/// Google Sheet holding the shop directory; the only data store.
pub const SHEET_ID: &str = "1g8-0UdPVIrUfSFZlkU_Q7fd-bvEzaJOi4W0OQ3UMLYg";

/// Review generation webhook, proxied same-origin.
pub const REVIEW_WEBHOOK_URL: &str = "/api/webhook/CFQiaxj3uEJsIqOku2S1i/sync";

/// Shop/user provisioning webhook.
pub const USER_WEBHOOK_URL: &str = "https://studio.pucho.ai/api/v1/webhooks/Iepv78ybPybKWk9nKqLER";

// ============================================
// Main app (tab switching)
// ============================================

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Shops,
    NewUser,
}

#[component]
fn App() -> impl IntoView {
    // Customers arrive through a shared link carrying a shop identifier;
    // those requests get the review page instead of the admin shell.
    if utils::query_param("pid").is_some()
        || utils::query_param("shopname").is_some()
        || utils::query_param("shop_name").is_some()
    {
        return view! { <CustomerReview /> }.into_view();
    }

    let (current_tab, set_current_tab) = create_signal(Tab::Shops);

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Pucho Review Portal"</h1>
                <nav class="tabs">
                    <button
                        class=move || if current_tab.get() == Tab::Shops { "active" } else { "" }
                        on:click=move |_| set_current_tab.set(Tab::Shops)
                    >
                        "Shops"
                    </button>
                    <button
                        class=move || if current_tab.get() == Tab::NewUser { "active" } else { "" }
                        on:click=move |_| set_current_tab.set(Tab::NewUser)
                    >
                        "Create User"
                    </button>
                </nav>
            </header>

            <main class="container">
                {move || match current_tab.get() {
                    Tab::Shops => view! { <ShopsGrid /> }.into_view(),
                    Tab::NewUser => view! { <UserAdmin /> }.into_view(),
                }}
            </main>
        </div>
    }
    .into_view()
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
