//! Page Header Component

use leptos::prelude::*;

/// Title row shown at the top of every page, with an optional actions
/// slot on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(into)] subtitle: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div class="page-header-titles">
                <h1>{title}</h1>
                <p class="page-subtitle">{subtitle}</p>
            </div>
            <div class="page-header-actions">
                {children.map(|c| c())}
            </div>
        </header>
    }
}
