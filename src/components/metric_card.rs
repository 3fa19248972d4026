//! Metric Card Component

use leptos::prelude::*;

/// Single dashboard figure with its label.
#[component]
pub fn MetricCard(#[prop(into)] title: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="metric-card">
            <p class="metric-title">{title}</p>
            <p class="metric-value">{value}</p>
        </div>
    }
}
