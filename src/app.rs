//! Dealflow Frontend App
//!
//! Top-level layout: nav bar, the current page, and the toast stack.
//! Provides the gateway client and app context so every page receives its
//! collaborators instead of reaching for globals.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::ToastHost;
use crate::context::AppContext;
use crate::gateway::ApiClient;
use crate::pages::{ActivitiesPage, CompaniesPage, ContactsPage, DashboardPage, DealsPage};
use crate::store::ToastState;

/// Screens reachable from the nav bar. URL routing is out of scope; a
/// signal switches pages, and each page reloads its own caches on mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Dashboard,
    Deals,
    Contacts,
    Companies,
    Activities,
}

impl Page {
    const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Deals,
        Page::Contacts,
        Page::Companies,
        Page::Activities,
    ];

    fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Deals => "Deals",
            Page::Contacts => "Contacts",
            Page::Companies => "Companies",
            Page::Activities => "Activities",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (page, set_page) = signal(Page::Dashboard);

    // Provide collaborators to all children
    provide_context(AppContext::new((reload_trigger, set_reload_trigger)));
    provide_context(ApiClient::from_window());
    provide_context(Store::new(ToastState::default()));

    view! {
        <div class="app-layout">
            <nav class="nav-bar">
                <span class="nav-brand">"Dealflow"</span>
                {Page::ALL
                    .into_iter()
                    .map(|p| {
                        let is_active = move || page.get() == p;
                        view! {
                            <button
                                class=move || {
                                    if is_active() { "nav-tab active" } else { "nav-tab" }
                                }
                                on:click=move |_| set_page.set(p)
                            >
                                {p.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <main class="main-content">
                {move || match page.get() {
                    Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Page::Deals => view! { <DealsPage /> }.into_any(),
                    Page::Contacts => view! { <ContactsPage /> }.into_any(),
                    Page::Companies => view! { <CompaniesPage /> }.into_any(),
                    Page::Activities => view! { <ActivitiesPage /> }.into_any(),
                }}
            </main>

            <ToastHost />
        </div>
    }
}
