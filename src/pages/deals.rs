//! Deals Pipeline Page
//!
//! The Kanban board: four active-stage columns plus Won/Lost drop zones.
//! Buckets are derived from the deal cache on every render; a drop runs
//! the optimistic-commit protocol from `board` and rolls back if the
//! gateway rejects or times out.

use chrono::Utc;
use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    bind_global_mouseup, create_dnd_signals, make_on_mousedown, make_on_mouseleave,
    make_on_target_mouseenter, DndSignals,
};

use crate::board::{self, DragPhase, DropPlan};
use crate::components::{DealCard, DealModal, Empty, ErrorView, Loading, PageHeader};
use crate::context::AppContext;
use crate::format::format_usd;
use crate::gateway::{self, ApiClient, GatewayError};
use crate::models::{company_name, contact_name, Company, Contact, Deal, Stage};
use crate::store::{toast_error, toast_success, use_toasts};

/// A hung stage commit fails after this long.
const COMMIT_TIMEOUT_MS: u32 = 10_000;

#[component]
pub fn DealsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let (deals, set_deals) = signal(Vec::<Deal>::new());
    let (contacts, set_contacts) = signal(Vec::<Contact>::new());
    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let (drag_phase, set_drag_phase) = signal(DragPhase::Idle);

    let (show_modal, set_show_modal) = signal(false);
    let (selected_deal, set_selected_deal) = signal(None::<Deal>);
    let (seed_stage, set_seed_stage) = signal(Stage::LeadIn);

    // Load the board's sibling caches together. No bucketed data renders
    // until all three have resolved; any failure shows the error state.
    {
        let client = client.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let client = client.clone();
            set_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                let (deals_res, contacts_res, companies_res) = futures::join!(
                    gateway::list_deals(&client),
                    gateway::list_contacts(&client),
                    gateway::list_companies(&client),
                );
                match (deals_res, contacts_res, companies_res) {
                    (Ok(d), Ok(c), Ok(co)) => {
                        web_sys::console::log_1(&format!("[DEALS] Loaded {} deals", d.len()).into());
                        set_deals.try_set(d);
                        set_contacts.try_set(c);
                        set_companies.try_set(co);
                        set_loading.try_set(false);
                    }
                    (d, c, co) => {
                        let message = [d.err(), c.err(), co.err()]
                            .into_iter()
                            .flatten()
                            .next()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "Failed to load deals".to_string());
                        set_error.try_set(Some(message));
                        set_loading.try_set(false);
                    }
                }
            });
        });
    }

    // DnD signals; drop targets are stages
    let dnd = create_dnd_signals::<Stage>();

    // Mirror the gesture into the drag phase, leaving an in-flight commit
    // alone.
    Effect::new(move |_| {
        if let Some(deal_id) = dnd.dragging_id_read.get() {
            if !drag_phase.get_untracked().is_committing() {
                set_drag_phase.set(DragPhase::Dragging { deal_id });
            }
        } else if matches!(drag_phase.get_untracked(), DragPhase::Dragging { .. }) {
            set_drag_phase.set(DragPhase::Idle);
        }
    });

    {
        let client = client.clone();
        bind_global_mouseup(dnd, move |deal_id, target: Stage| {
            // One commit at a time; a drop while one is in flight is ignored.
            if drag_phase.get_untracked().is_committing() {
                return;
            }

            web_sys::console::log_1(
                &format!("[DND] Drop: deal={deal_id}, target={target}").into(),
            );
            let plan = board::plan_drop(&deals.get_untracked(), deal_id, target);
            let DropPlan::Commit { to, .. } = plan else {
                set_drag_phase.set(DragPhase::Idle);
                return;
            };

            let title = deals
                .get_untracked()
                .iter()
                .find(|d| d.id == deal_id)
                .map(|d| d.title.clone())
                .unwrap_or_default();

            // Optimistic update before the gateway call; keep the snapshot
            // for rollback.
            let mut snapshot = None;
            set_deals.update(|d| snapshot = board::apply_optimistic(d, deal_id, to, Utc::now()));
            let Some(snapshot) = snapshot else {
                set_drag_phase.set(DragPhase::Idle);
                return;
            };
            set_drag_phase.set(DragPhase::Committing { deal_id });

            let client = client.clone();
            spawn_local(async move {
                // Bound a hung commit; timeout takes the failure path.
                let update = Box::pin(gateway::update_deal_stage(&client, deal_id, to));
                let timeout = Box::pin(TimeoutFuture::new(COMMIT_TIMEOUT_MS));
                let result = match future::select(update, timeout).await {
                    Either::Left((result, _)) => result,
                    Either::Right(_) => {
                        Err(GatewayError::Transport("stage update timed out".to_string()))
                    }
                };

                match result {
                    // Success keeps the optimistic state as final
                    Ok(_) => toast_success(&toasts, board::move_message(&title, to)),
                    Err(err) => {
                        web_sys::console::error_1(
                            &format!("[DND] Stage update failed, rolling back: {err}").into(),
                        );
                        set_deals.try_update(|d| board::apply_rollback(d, deal_id, snapshot));
                        toast_error(&toasts, format!("Failed to update deal stage: {err}"));
                    }
                }
                set_drag_phase.try_set(DragPhase::Idle);
            });
        });
    }

    let open_create_modal = Callback::new(move |stage: Stage| {
        set_selected_deal.set(None);
        set_seed_stage.set(stage);
        set_show_modal.set(true);
    });

    let open_edit_modal = Callback::new(move |deal: Deal| {
        set_selected_deal.set(Some(deal));
        set_show_modal.set(true);
    });

    let on_save = Callback::new(move |saved: Deal| {
        set_deals.update(|d| match d.iter_mut().find(|existing| existing.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            // A new record was never in any bucket; just append it.
            None => d.push(saved.clone()),
        });
    });

    view! {
        <div class="deals-page">
            <PageHeader
                title="Deals Pipeline"
                subtitle="Manage your sales pipeline and track deal progress"
            >
                <button class="primary-btn" on:click=move |_| open_create_modal.run(Stage::LeadIn)>
                    "+ New Deal"
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
                } else {
                    view! {
                        <div class="board">
                            <div class="board-columns">
                                {Stage::ACTIVE
                                    .into_iter()
                                    .map(|stage| {
                                        view! {
                                            <StageColumn
                                                stage=stage
                                                deals=deals
                                                contacts=contacts
                                                companies=companies
                                                dnd=dnd
                                                on_new_deal=open_create_modal
                                                on_edit_deal=open_edit_modal
                                            />
                                        }
                                    })
                                    .collect_view()}
                            </div>

                            // Won/Lost drop bar, separate from the column grid
                            <div class="terminal-bar">
                                <TerminalDropZone stage=Stage::Won dnd=dnd />
                                <TerminalDropZone stage=Stage::Lost dnd=dnd />
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}

            {move || {
                show_modal.get().then(|| {
                    view! {
                        <DealModal
                            deal=selected_deal.get()
                            seed_stage=seed_stage.get()
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

/// One active-stage column: header with count and aggregate value, the
/// bucket's cards, and a per-column create action seeded with the stage.
#[component]
fn StageColumn(
    stage: Stage,
    deals: ReadSignal<Vec<Deal>>,
    contacts: ReadSignal<Vec<Contact>>,
    companies: ReadSignal<Vec<Company>>,
    dnd: DndSignals<Stage>,
    on_new_deal: Callback<Stage>,
    on_edit_deal: Callback<Deal>,
) -> impl IntoView {
    let column_deals = move || {
        deals
            .get()
            .into_iter()
            .filter(move |d| d.stage == stage)
            .collect::<Vec<_>>()
    };

    let on_zone_enter = make_on_target_mouseenter(dnd, stage);
    let on_zone_leave = make_on_mouseleave(dnd);
    let is_over = move || dnd.drop_target_read.get() == Some(stage);

    view! {
        <div class="stage-column">
            <div class="stage-header">
                <h3 class="stage-name">{stage.as_str()}</h3>
                <span class="stage-count">{move || column_deals().len()}</span>
                <button class="stage-add-btn" on:click=move |_| on_new_deal.run(stage)>
                    "+"
                </button>
            </div>

            <p class="stage-value">
                {move || format_usd(Some(board::stage_value(&deals.get(), stage)))}
            </p>

            <div
                class=move || {
                    if is_over() { "stage-drop-area over" } else { "stage-drop-area" }
                }
                on:mouseenter=on_zone_enter
                on:mouseleave=on_zone_leave
            >
                <For
                    each=column_deals
                    key=|deal| (deal.id, deal.updated_at)
                    children=move |deal| {
                        let id = deal.id;
                        let on_mousedown = make_on_mousedown(dnd, id);
                        let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
                        let deal_for_click = deal.clone();

                        view! {
                            <div
                                class=move || {
                                    if is_dragging() {
                                        "deal-card-wrapper dragging"
                                    } else {
                                        "deal-card-wrapper"
                                    }
                                }
                                on:mousedown=on_mousedown
                                on:click=move |_| {
                                    // Suppress the click that ends a drag
                                    if dnd.drag_just_ended_read.get_untracked() {
                                        return;
                                    }
                                    on_edit_deal.run(deal_for_click.clone());
                                }
                            >
                                <DealCard
                                    deal=deal.clone()
                                    contact=contact_name(&contacts.get(), deal.contact_id)
                                    company=company_name(&companies.get(), deal.company_id)
                                />
                            </div>
                        }
                    }
                />

                {move || {
                    column_deals().is_empty().then(|| {
                        view! { <Empty message=format!("No deals in {stage}") /> }
                    })
                }}
            </div>
        </div>
    }
}

/// Won/Lost drop target under the column grid. Terminal deals leave the
/// active board but stay in the cache.
#[component]
fn TerminalDropZone(stage: Stage, dnd: DndSignals<Stage>) -> impl IntoView {
    let on_enter = make_on_target_mouseenter(dnd, stage);
    let on_leave = make_on_mouseleave(dnd);
    let is_over = move || dnd.drop_target_read.get() == Some(stage);

    let zone_class = move || {
        let base = match stage {
            Stage::Won => "terminal-zone won",
            _ => "terminal-zone lost",
        };
        if is_over() {
            format!("{base} over")
        } else {
            base.to_string()
        }
    };

    view! {
        <div class=zone_class on:mouseenter=on_enter on:mouseleave=on_leave>
            <span class="terminal-zone-label">{stage.as_str()}</span>
        </div>
    }
}
