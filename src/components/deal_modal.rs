//! Deal Modal Component
//!
//! Create/edit form for deals. Validates locally before touching the
//! gateway; the caller owns the cache and applies the saved record via
//! `on_save`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ModalShell;
use crate::format::{date_input_value, parse_date_input};
use crate::gateway::{self, ApiClient, DealFields};
use crate::models::{Company, Contact, Deal, Stage};
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn DealModal(
    /// Deal being edited; `None` creates a new one.
    deal: Option<Deal>,
    /// Stage pre-selected for a new deal (creation-from-column).
    seed_stage: Stage,
    contacts: Vec<Contact>,
    companies: Vec<Company>,
    #[prop(into)] on_save: Callback<Deal>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let editing_id = deal.as_ref().map(|d| d.id);
    let heading = if editing_id.is_some() { "Edit Deal" } else { "Create New Deal" };

    let (title, set_title) = signal(deal.as_ref().map(|d| d.title.clone()).unwrap_or_default());
    let (value, set_value) = signal(
        deal.as_ref()
            .and_then(|d| d.value)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    );
    let (stage, set_stage) = signal(deal.as_ref().map(|d| d.stage).unwrap_or(seed_stage));
    let (close_date, set_close_date) = signal(
        deal.as_ref()
            .map(|d| date_input_value(d.expected_close_date))
            .unwrap_or_default(),
    );
    let (contact_id, set_contact_id) = signal(deal.as_ref().and_then(|d| d.contact_id));
    let (company_id, set_company_id) = signal(deal.as_ref().and_then(|d| d.company_id));
    let (notes, set_notes) = signal(deal.as_ref().map(|d| d.notes.clone()).unwrap_or_default());
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let title_value = title.get();
        if title_value.trim().is_empty() {
            set_form_error.set(Some("Title is required".to_string()));
            return;
        }
        let Ok(amount) = value.get().trim().parse::<f64>() else {
            set_form_error.set(Some("Value must be a number".to_string()));
            return;
        };
        if amount <= 0.0 {
            set_form_error.set(Some("Value must be greater than 0".to_string()));
            return;
        }
        let Some(close) = parse_date_input(&close_date.get()) else {
            set_form_error.set(Some("Expected close date is required".to_string()));
            return;
        };
        set_form_error.set(None);
        set_saving.set(true);

        let fields = DealFields {
            title: title_value.trim().to_string(),
            value: amount,
            stage: stage.get(),
            expected_close_date: close,
            contact_id: contact_id.get(),
            company_id: company_id.get(),
            notes: notes.get(),
        };
        let client = client.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => gateway::update_deal(&client, id, &fields).await,
                None => gateway::create_deal(&client, &fields).await,
            };
            match result {
                Ok(saved) => {
                    let message = if editing_id.is_some() {
                        "Deal updated successfully"
                    } else {
                        "Deal created successfully"
                    };
                    toast_success(&toasts, message);
                    on_save.run(saved);
                    on_close.run(());
                }
                Err(err) => toast_error(&toasts, format!("Failed to save deal: {err}")),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <ModalShell title=heading on_close=on_close>
            <form class="modal-form" on:submit=on_submit>
                <label>
                    "Deal Title"
                    <input
                        type="text"
                        placeholder="Enter deal title"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Value"
                    <input
                        type="number"
                        placeholder="0"
                        prop:value=move || value.get()
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Stage"
                    <select on:change=move |ev| {
                        if let Some(s) = Stage::from_label(&event_target_value(&ev)) {
                            set_stage.set(s);
                        }
                    }>
                        {Stage::ALL
                            .into_iter()
                            .map(|s| {
                                view! {
                                    <option value=s.as_str() selected=move || stage.get() == s>
                                        {s.as_str()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>

                <label>
                    "Expected Close Date"
                    <input
                        type="date"
                        prop:value=move || close_date.get()
                        on:input=move |ev| set_close_date.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Contact"
                    <select on:change=move |ev| {
                        set_contact_id.set(event_target_value(&ev).parse::<u32>().ok());
                    }>
                        <option value="" selected=move || contact_id.get().is_none()>
                            "Select Contact"
                        </option>
                        {contacts
                            .into_iter()
                            .map(|c| {
                                let id = c.id;
                                view! {
                                    <option value=id.to_string() selected=move || contact_id.get() == Some(id)>
                                        {c.name}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>

                <label>
                    "Company"
                    <select on:change=move |ev| {
                        set_company_id.set(event_target_value(&ev).parse::<u32>().ok());
                    }>
                        <option value="" selected=move || company_id.get().is_none()>
                            "Select Company"
                        </option>
                        {companies
                            .into_iter()
                            .map(|c| {
                                let id = c.id;
                                view! {
                                    <option value=id.to_string() selected=move || company_id.get() == Some(id)>
                                        {c.name}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>

                <label>
                    "Notes"
                    <textarea
                        placeholder="Additional notes about this deal..."
                        prop:value=move || notes.get()
                        on:input=move |ev| set_notes.set(event_target_value(&ev))
                    ></textarea>
                </label>

                {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <div class="modal-actions">
                    <button type="button" class="secondary-btn" disabled=move || saving.get()
                        on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {move || {
                            if saving.get() {
                                "Saving...".to_string()
                            } else if editing_id.is_some() {
                                "Update Deal".to_string()
                            } else {
                                "Create Deal".to_string()
                            }
                        }}
                    </button>
                </div>
            </form>
        </ModalShell>
    }
}
