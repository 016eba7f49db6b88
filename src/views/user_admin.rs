//! Admin form that provisions a new shop/user via the webhook.

use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader, HtmlInputElement};

use crate::components::StatusModal;
use crate::models::NewShopRequest;
use crate::utils::webhook::create_user;

#[component]
fn FormField(
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>{label}</label>
            <input
                type=input_type
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                required
            />
        </div>
    }
}

#[component]
pub fn UserAdmin() -> impl IntoView {
    let (form, set_form) = create_signal(NewShopRequest::default());
    let (logo, set_logo) = create_signal(None::<File>);
    let (preview, set_preview) = create_signal(None::<String>);
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let (show_modal, set_show_modal) = create_signal(false);

    // Local preview only; the file itself goes out as multipart form data.
    let on_file_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            if let Some(file) = files.get(0) {
                set_logo.set(Some(file.clone()));
                if let Ok(reader) = FileReader::new() {
                    let reader_clone = reader.clone();
                    let onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
                        if let Ok(result) = reader_clone.result() {
                            if let Some(data_url) = result.as_string() {
                                set_preview.set(Some(data_url));
                            }
                        }
                    }) as Box<dyn FnMut(_)>);
                    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
                    onload.forget();
                    let _ = reader.read_as_data_url(&file);
                }
            }
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get() {
            return;
        }
        set_loading.set(true);
        set_show_modal.set(true);
        set_error.set(None);
        let request = form.get();
        let file = logo.get();
        spawn_local(async move {
            match create_user(&request, file.as_ref()).await {
                Ok(()) => {
                    set_form.set(NewShopRequest::default());
                    set_logo.set(None);
                    set_preview.set(None);
                }
                Err(message) => set_error.set(Some(message)),
            }
            set_loading.set(false);
        });
    };

    let close_modal = move || {
        set_show_modal.set(false);
        set_error.set(None);
    };

    view! {
        <div class="user-admin">
            <div class="form-card">
                <form on:submit=on_submit>
                    <div class="form-grid">
                        <FormField
                            label="User Name"
                            input_type="text"
                            placeholder="Enter shop user name"
                            value=Signal::derive(move || form.with(|f| f.user_name.clone()))
                            on_input=Callback::new(move |v| set_form.update(|f| f.user_name = v))
                        />
                        <FormField
                            label="Map URL"
                            input_type="text"
                            placeholder="https://maps.google.com/..."
                            value=Signal::derive(move || form.with(|f| f.map_url.clone()))
                            on_input=Callback::new(move |v| set_form.update(|f| f.map_url = v))
                        />
                        <FormField
                            label="Password"
                            input_type="password"
                            placeholder="Set a secure password"
                            value=Signal::derive(move || form.with(|f| f.password.clone()))
                            on_input=Callback::new(move |v| set_form.update(|f| f.password = v))
                        />
                        <FormField
                            label="Shop Name"
                            input_type="text"
                            placeholder="Enter shop name"
                            value=Signal::derive(move || form.with(|f| f.shop_name.clone()))
                            on_input=Callback::new(move |v| set_form.update(|f| f.shop_name = v))
                        />
                        <FormField
                            label="Shop URL"
                            input_type="url"
                            placeholder="https://myshop.com"
                            value=Signal::derive(move || form.with(|f| f.shop_url.clone()))
                            on_input=Callback::new(move |v| set_form.update(|f| f.shop_url = v))
                        />
                        <FormField
                            label="Place ID"
                            input_type="text"
                            placeholder="Enter Google Place ID"
                            value=Signal::derive(move || form.with(|f| f.place_id.clone()))
                            on_input=Callback::new(move |v| set_form.update(|f| f.place_id = v))
                        />

                        <div class="form-field logo-field">
                            <label>"Shop Logo"</label>
                            <div class="logo-dropzone">
                                <input type="file" accept="image/*" on:change=on_file_change />
                                {move || match preview.get() {
                                    Some(src) => view! {
                                        <img class="logo-preview" src=src alt="Logo preview" />
                                    }
                                    .into_view(),
                                    None => view! {
                                        <p class="hint">"Click or drag logo to upload"</p>
                                    }
                                    .into_view(),
                                }}
                            </div>
                        </div>
                    </div>

                    <div class="form-actions">
                        <button type="submit" class="submit-btn" disabled=move || loading.get()>
                            {move || if loading.get() { "Creating..." } else { "Create User" }}
                        </button>
                    </div>
                </form>
            </div>

            {move || {
                show_modal.get().then(|| view! {
                    <StatusModal loading=loading error=error on_close=close_modal />
                })
            }}
        </div>
    }
}
