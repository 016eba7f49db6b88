//! Submission status modal: spinner while the webhook runs, then a
//! success or error panel.

use leptos::*;

#[component]
pub fn StatusModal<F>(
    loading: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
    on_close: F,
) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h3>
                        {move || {
                            if loading.get() {
                                "Processing..."
                            } else if error.with(|e| e.is_some()) {
                                "Error"
                            } else {
                                "Success"
                            }
                        }}
                    </h3>
                    {move || {
                        (!loading.get()).then(|| {
                            view! {
                                <button class="modal-close" on:click=move |_| on_close()>
                                    "×"
                                </button>
                            }
                        })
                    }}
                </div>

                <div class="modal-body">
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="modal-loading">
                                    <div class="spinner"></div>
                                    <p>"Waiting for response..."</p>
                                    <p class="hint">"Please wait while we process your request"</p>
                                </div>
                            }
                            .into_view()
                        } else if let Some(message) = error.get() {
                            view! {
                                <div class="modal-error">
                                    <h4>"Error"</h4>
                                    <p>{message}</p>
                                </div>
                            }
                            .into_view()
                        } else {
                            view! {
                                <div class="modal-success">
                                    <h4>"User Created Successfully!"</h4>
                                </div>
                            }
                            .into_view()
                        }
                    }}
                </div>

                {move || {
                    (!loading.get()).then(|| {
                        view! {
                            <div class="modal-footer">
                                <button class="modal-close-btn" on:click=move |_| on_close()>
                                    "Close"
                                </button>
                            </div>
                        }
                    })
                }}
            </div>
        </div>
    }
}
