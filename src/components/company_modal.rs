//! Company Modal Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ModalShell;
use crate::gateway::{self, ApiClient, CompanyFields};
use crate::models::Company;
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn CompanyModal(
    company: Option<Company>,
    #[prop(into)] on_save: Callback<Company>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let editing_id = company.as_ref().map(|c| c.id);
    let heading = if editing_id.is_some() { "Edit Company" } else { "New Company" };

    let (name, set_name) = signal(company.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let (industry, set_industry) =
        signal(company.as_ref().map(|c| c.industry.clone()).unwrap_or_default());
    let (website, set_website) =
        signal(company.as_ref().map(|c| c.website.clone()).unwrap_or_default());
    let (phone, set_phone) = signal(company.as_ref().map(|c| c.phone.clone()).unwrap_or_default());
    let (address, set_address) =
        signal(company.as_ref().map(|c| c.address.clone()).unwrap_or_default());
    let (notes, set_notes) = signal(company.as_ref().map(|c| c.notes.clone()).unwrap_or_default());
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_value = name.get();
        if name_value.trim().is_empty() {
            set_form_error.set(Some("Name is required".to_string()));
            return;
        }
        set_form_error.set(None);
        set_saving.set(true);

        let fields = CompanyFields {
            name: name_value.trim().to_string(),
            industry: industry.get(),
            website: website.get(),
            phone: phone.get(),
            address: address.get(),
            notes: notes.get(),
        };
        let client = client.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => gateway::update_company(&client, id, &fields).await,
                None => gateway::create_company(&client, &fields).await,
            };
            match result {
                Ok(saved) => {
                    let message = if editing_id.is_some() {
                        "Company updated successfully"
                    } else {
                        "Company created successfully"
                    };
                    toast_success(&toasts, message);
                    on_save.run(saved);
                    on_close.run(());
                }
                Err(err) => toast_error(&toasts, format!("Failed to save company: {err}")),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <ModalShell title=heading on_close=on_close>
            <form class="modal-form" on:submit=on_submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        placeholder="Company name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Industry"
                    <input
                        type="text"
                        prop:value=move || industry.get()
                        on:input=move |ev| set_industry.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Website"
                    <input
                        type="url"
                        placeholder="https://"
                        prop:value=move || website.get()
                        on:input=move |ev| set_website.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Phone"
                    <input
                        type="tel"
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Address"
                    <input
                        type="text"
                        prop:value=move || address.get()
                        on:input=move |ev| set_address.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Notes"
                    <textarea
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
                        {move || if saving.get() { "Saving..." } else { "Save Company" }}
                    </button>
                </div>
            </form>
        </ModalShell>
    }
}
