//! Modal Shell Component

use leptos::prelude::*;

/// Overlay plus dialog chrome shared by the entity form modals.
#[component]
pub fn ModalShell(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="modal-close-btn" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
