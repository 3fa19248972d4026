//! Activities Page
//!
//! Timeline of logged activities, newest first, with links resolved
//! against the sibling caches.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::components::{ActivityModal, DeleteConfirmButton, Empty, ErrorView, Loading, PageHeader};
use crate::context::AppContext;
use crate::format::format_activity_date;
use crate::gateway::{self, ApiClient};
use crate::models::{related_entity_label, Activity, Company, Contact, Deal};
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn ActivitiesPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let (activities, set_activities) = signal(Vec::<Activity>::new());
    let (deals, set_deals) = signal(Vec::<Deal>::new());
    let (contacts, set_contacts) = signal(Vec::<Contact>::new());
    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let (show_modal, set_show_modal) = signal(false);
    let (selected_activity, set_selected_activity) = signal(None::<Activity>);

    {
        let client = client.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let client = client.clone();
            set_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                let (activities_res, deals_res, contacts_res, companies_res) = futures::join!(
                    gateway::list_activities(&client),
                    gateway::list_deals(&client),
                    gateway::list_contacts(&client),
                    gateway::list_companies(&client),
                );
                match (activities_res, deals_res, contacts_res, companies_res) {
                    (Ok(a), Ok(d), Ok(c), Ok(co)) => {
                        set_activities.try_set(a);
                        set_deals.try_set(d);
                        set_contacts.try_set(c);
                        set_companies.try_set(co);
                        set_loading.try_set(false);
                    }
                    (a, d, c, co) => {
                        let message = [a.err(), d.err(), c.err(), co.err()]
                            .into_iter()
                            .flatten()
                            .next()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "Failed to load activities".to_string());
                        set_error.try_set(Some(message));
                        set_loading.try_set(false);
                    }
                }
            });
        });
    }

    // Newest first, full list
    let ordered = Memo::new(move |_| {
        let all = activities.get();
        let len = all.len();
        board::recent_activities(&all, len)
    });

    let delete_activity = {
        let client = client.clone();
        move |id: u32| {
            let client = client.clone();
            spawn_local(async move {
                match gateway::delete_activity(&client, id).await {
                    Ok(()) => {
                        set_activities.try_update(|a| a.retain(|activity| activity.id != id));
                        toast_success(&toasts, "Activity deleted successfully");
                    }
                    Err(err) => toast_error(&toasts, format!("Failed to delete activity: {err}")),
                }
            });
        }
    };

    let on_save = Callback::new(move |saved: Activity| {
        set_activities.update(|a| match a.iter_mut().find(|existing| existing.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => a.push(saved.clone()),
        });
    });

    view! {
        <div class="activities-page">
            <PageHeader title="Activities" subtitle="Calls, meetings, and tasks across your pipeline">
                <button
                    class="primary-btn"
                    on:click=move |_| {
                        set_selected_activity.set(None);
                        set_show_modal.set(true);
                    }
                >
                    "+ Log Activity"
                </button>
            </PageHeader>

            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_any()
                } else if let Some(message) = error.get() {
                    view! {
                        <ErrorView
                            message=message
                            on_retry=Callback::new(move |_| ctx.reload())
                        />
                    }
                    .into_any()
                } else if ordered.get().is_empty() {
                    view! { <Empty message="No activities logged yet" /> }.into_any()
                } else {
                    let delete_activity = delete_activity.clone();
                    view! {
                        <ul class="activity-list">
                            <For
                                each=move || ordered.get()
                                key=|activity| (activity.id, activity.date, activity.description.clone())
                                children=move |activity| {
                                    let id = activity.id;
                                    let related = related_entity_label(
                                        &activity,
                                        &contacts.get(),
                                        &companies.get(),
                                    );
                                    let activity_for_edit = activity.clone();
                                    let delete_activity = delete_activity.clone();
                                    view! {
                                        <li
                                            class="activity-row"
                                            on:click=move |_| {
                                                set_selected_activity.set(Some(activity_for_edit.clone()));
                                                set_show_modal.set(true);
                                            }
                                        >
                                            <span class="badge">{activity.kind.as_str()}</span>
                                            <span class="activity-related">{related}</span>
                                            <p class="activity-description">{activity.description.clone()}</p>
                                            <span class="activity-date">
                                                {format_activity_date(&activity.date)}
                                            </span>
                                            <DeleteConfirmButton
                                                button_class="delete-btn"
                                                on_confirm=Callback::new(move |_| delete_activity(id))
                                            />
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    }
                    .into_any()
                }
            }}

            {move || {
                show_modal.get().then(|| {
                    view! {
                        <ActivityModal
                            activity=selected_activity.get()
                            deals=deals.get()
                            contacts=contacts.get()
                            companies=companies.get()
                            on_save=on_save
                            on_close=Callback::new(move |_| set_show_modal.set(false))
                        />
                    }
                })
            }}
        </div>
    }
}
