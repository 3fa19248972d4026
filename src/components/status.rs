//! Load-State Views
//!
//! Placeholder, failure, and empty states shared by every page.

use leptos::prelude::*;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading-state">
            <div class="spinner"></div>
            <p>"Loading..."</p>
        </div>
    }
}

/// Full-page load failure with a retry affordance.
#[component]
pub fn ErrorView(
    #[prop(into)] message: String,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-state">
            <p class="error-message">{message}</p>
            <button class="retry-btn" on:click=move |_| on_retry.run(())>
                "Try Again"
            </button>
        </div>
    }
}

#[component]
pub fn Empty(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="empty-state">
            <p>{message}</p>
        </div>
    }
}
