//! Activity Modal Component
//!
//! Log or edit an activity, optionally linked to a deal, contact, or
//! company from the caches the page already holds.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ModalShell;
use crate::format::{datetime_input_value, parse_datetime_input};
use crate::gateway::{self, ActivityFields, ApiClient};
use crate::models::{Activity, ActivityKind, Company, Contact, Deal};
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn ActivityModal(
    activity: Option<Activity>,
    deals: Vec<Deal>,
    contacts: Vec<Contact>,
    companies: Vec<Company>,
    #[prop(into)] on_save: Callback<Activity>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let editing_id = activity.as_ref().map(|a| a.id);
    let heading = if editing_id.is_some() { "Edit Activity" } else { "Log Activity" };

    let (kind, set_kind) = signal(activity.as_ref().map(|a| a.kind).unwrap_or(ActivityKind::Call));
    let (description, set_description) =
        signal(activity.as_ref().map(|a| a.description.clone()).unwrap_or_default());
    let (date, set_date) = signal(
        activity
            .as_ref()
            .map(|a| datetime_input_value(&a.date))
            .unwrap_or_default(),
    );
    let (deal_id, set_deal_id) = signal(activity.as_ref().and_then(|a| a.deal_id));
    let (contact_id, set_contact_id) = signal(activity.as_ref().and_then(|a| a.contact_id));
    let (company_id, set_company_id) = signal(activity.as_ref().and_then(|a| a.company_id));
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let description_value = description.get();
        if description_value.trim().is_empty() {
            set_form_error.set(Some("Description is required".to_string()));
            return;
        }
        let Some(when) = parse_datetime_input(&date.get()) else {
            set_form_error.set(Some("Date is required".to_string()));
            return;
        };
        set_form_error.set(None);
        set_saving.set(true);

        let fields = ActivityFields {
            kind: kind.get(),
            description: description_value.trim().to_string(),
            date: when,
            deal_id: deal_id.get(),
            contact_id: contact_id.get(),
            company_id: company_id.get(),
        };
        let client = client.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => gateway::update_activity(&client, id, &fields).await,
                None => gateway::create_activity(&client, &fields).await,
            };
            match result {
                Ok(saved) => {
                    let message = if editing_id.is_some() {
                        "Activity updated successfully"
                    } else {
                        "Activity logged successfully"
                    };
                    toast_success(&toasts, message);
                    on_save.run(saved);
                    on_close.run(());
                }
                Err(err) => toast_error(&toasts, format!("Failed to save activity: {err}")),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <ModalShell title=heading on_close=on_close>
            <form class="modal-form" on:submit=on_submit>
                <label>
                    "Type"
                    <select on:change=move |ev| {
                        if let Some(k) = ActivityKind::from_label(&event_target_value(&ev)) {
                            set_kind.set(k);
                        }
                    }>
                        {ActivityKind::ALL
                            .into_iter()
                            .map(|k| {
                                view! {
                                    <option value=k.as_str() selected=move || kind.get() == k>
                                        {k.as_str()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>

                <label>
                    "Description"
                    <textarea
                        placeholder="What happened?"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                </label>

                <label>
                    "Date"
                    <input
                        type="datetime-local"
                        prop:value=move || date.get()
                        on:input=move |ev| set_date.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Deal"
                    <select on:change=move |ev| {
                        set_deal_id.set(event_target_value(&ev).parse::<u32>().ok());
                    }>
                        <option value="" selected=move || deal_id.get().is_none()>
                            "Select Deal"
                        </option>
                        {deals
                            .into_iter()
                            .map(|d| {
                                let id = d.id;
                                view! {
                                    <option value=id.to_string() selected=move || deal_id.get() == Some(id)>
                                        {d.title}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
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

                {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <div class="modal-actions">
                    <button type="button" class="secondary-btn" disabled=move || saving.get()
                        on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Activity" }}
                    </button>
                </div>
            </form>
        </ModalShell>
    }
}
