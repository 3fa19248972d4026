//! Toast Host Component
//!
//! Renders the toast store in a fixed corner stack.

use leptos::prelude::*;

use crate::store::{use_toasts, ToastKind, ToastStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_toasts();

    view! {
        <div class="toast-container">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    view! { <div class=class>{toast.message.clone()}</div> }
                }
            />
        </div>
    }
}
