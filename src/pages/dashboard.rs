//! Dashboard Page
//!
//! Summary metrics, a stage histogram, and the most recent activities,
//! all derived from the caches this page loads.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board;
use crate::components::{Empty, ErrorView, Loading, MetricCard, PageHeader};
use crate::context::AppContext;
use crate::format::{format_activity_date, format_usd};
use crate::gateway::{self, ApiClient};
use crate::models::{related_entity_label, Activity, Company, Contact, Deal};

const RECENT_ACTIVITY_LIMIT: usize = 10;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let client = expect_context::<ApiClient>();

    let (deals, set_deals) = signal(Vec::<Deal>::new());
    let (contacts, set_contacts) = signal(Vec::<Contact>::new());
    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (activities, set_activities) = signal(Vec::<Activity>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    {
        let client = client.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let client = client.clone();
            set_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                let (deals_res, contacts_res, companies_res, activities_res) = futures::join!(
                    gateway::list_deals(&client),
                    gateway::list_contacts(&client),
                    gateway::list_companies(&client),
                    gateway::list_activities(&client),
                );
                match (deals_res, contacts_res, companies_res, activities_res) {
                    (Ok(d), Ok(c), Ok(co), Ok(a)) => {
                        set_deals.try_set(d);
                        set_contacts.try_set(c);
                        set_companies.try_set(co);
                        set_activities.try_set(a);
                        set_loading.try_set(false);
                    }
                    (d, c, co, a) => {
                        let message = [d.err(), c.err(), co.err(), a.err()]
                            .into_iter()
                            .flatten()
                            .next()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "Failed to load dashboard data".to_string());
                        set_error.try_set(Some(message));
                        set_loading.try_set(false);
                    }
                }
            });
        });
    }

    let metrics = Memo::new(move |_| board::dashboard_metrics(&deals.get(), &activities.get()));
    let histogram = Memo::new(move |_| board::stage_histogram(&deals.get()));
    let recent =
        Memo::new(move |_| board::recent_activities(&activities.get(), RECENT_ACTIVITY_LIMIT));

    view! {
        <div class="dashboard-page">
            <PageHeader
                title="Dashboard"
                subtitle="Welcome back! Here's what's happening with your pipeline."
            />

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
                } else {
                    view! {
                        <div class="dashboard-content">
                            <div class="metric-grid">
                                <MetricCard
                                    title="Total Deals"
                                    value=metrics.get().total_deals.to_string()
                                />
                                <MetricCard
                                    title="Pipeline Value"
                                    value=format_usd(Some(metrics.get().pipeline_value))
                                />
                                <MetricCard
                                    title="Won Deals"
                                    value=metrics.get().won_deals.to_string()
                                />
                                <MetricCard
                                    title="Activities"
                                    value=metrics.get().activity_count.to_string()
                                />
                            </div>

                            <div class="dashboard-panels">
                                <section class="panel recent-activities">
                                    <h3>"Recent Activities"</h3>
                                    {move || {
                                        if recent.get().is_empty() {
                                            view! { <Empty message="No activities yet" /> }.into_any()
                                        } else {
                                            view! {
                                                <ul class="activity-list">
                                                    <For
                                                        each=move || recent.get()
                                                        key=|activity| activity.id
                                                        children=move |activity| {
                                                            let related = related_entity_label(
                                                                &activity,
                                                                &contacts.get(),
                                                                &companies.get(),
                                                            );
                                                            view! {
                                                                <li class="activity-row">
                                                                    <span class="badge">{activity.kind.as_str()}</span>
                                                                    <span class="activity-related">{related}</span>
                                                                    <p class="activity-description">
                                                                        {activity.description.clone()}
                                                                    </p>
                                                                    <span class="activity-date">
                                                                        {format_activity_date(&activity.date)}
                                                                    </span>
                                                                </li>
                                                            }
                                                        }
                                                    />
                                                </ul>
                                            }
                                            .into_any()
                                        }
                                    }}
                                </section>

                                <section class="panel pipeline-overview">
                                    <h3>"Pipeline Overview"</h3>
                                    <For
                                        each=move || histogram.get()
                                        key=|(stage, count)| (*stage, *count)
                                        children=move |(stage, count)| {
                                            let percent = {
                                                let total = metrics.get_untracked().total_deals;
                                                if total == 0 {
                                                    0.0
                                                } else {
                                                    count as f64 / total as f64 * 100.0
                                                }
                                            };
                                            view! {
                                                <div class="histogram-row">
                                                    <span class="histogram-label">{stage.as_str()}</span>
                                                    <div class="histogram-track">
                                                        <div
                                                            class="histogram-fill"
                                                            style=format!("width: {percent:.0}%;")
                                                        ></div>
                                                    </div>
                                                    <span class="histogram-count">{count}</span>
                                                </div>
                                            }
                                        }
                                    />
                                </section>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
