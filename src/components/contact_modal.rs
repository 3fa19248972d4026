//! Contact Modal Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ModalShell;
use crate::gateway::{self, ApiClient, ContactFields};
use crate::models::{Company, Contact};
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn ContactModal(
    contact: Option<Contact>,
    companies: Vec<Company>,
    #[prop(into)] on_save: Callback<Contact>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let editing_id = contact.as_ref().map(|c| c.id);
    let heading = if editing_id.is_some() { "Edit Contact" } else { "New Contact" };

    let (name, set_name) = signal(contact.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let (email, set_email) = signal(contact.as_ref().map(|c| c.email.clone()).unwrap_or_default());
    let (phone, set_phone) = signal(contact.as_ref().map(|c| c.phone.clone()).unwrap_or_default());
    let (job_title, set_job_title) =
        signal(contact.as_ref().map(|c| c.job_title.clone()).unwrap_or_default());
    let (company_id, set_company_id) = signal(contact.as_ref().and_then(|c| c.company_id));
    let (notes, set_notes) = signal(contact.as_ref().map(|c| c.notes.clone()).unwrap_or_default());
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_value = name.get();
        if name_value.trim().is_empty() {
            set_form_error.set(Some("Name is required".to_string()));
            return;
        }
        let email_value = email.get();
        if email_value.trim().is_empty() {
            set_form_error.set(Some("Email is required".to_string()));
            return;
        }
        set_form_error.set(None);
        set_saving.set(true);

        let fields = ContactFields {
            name: name_value.trim().to_string(),
            email: email_value.trim().to_string(),
            phone: phone.get(),
            job_title: job_title.get(),
            company_id: company_id.get(),
            notes: notes.get(),
        };
        let client = client.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => gateway::update_contact(&client, id, &fields).await,
                None => gateway::create_contact(&client, &fields).await,
            };
            match result {
                Ok(saved) => {
                    let message = if editing_id.is_some() {
                        "Contact updated successfully"
                    } else {
                        "Contact created successfully"
                    };
                    toast_success(&toasts, message);
                    on_save.run(saved);
                    on_close.run(());
                }
                Err(err) => toast_error(&toasts, format!("Failed to save contact: {err}")),
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
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Email"
                    <input
                        type="email"
                        placeholder="name@company.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
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
                    "Job Title"
                    <input
                        type="text"
                        prop:value=move || job_title.get()
                        on:input=move |ev| set_job_title.set(event_target_value(&ev))
                    />
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
                        {move || if saving.get() { "Saving..." } else { "Save Contact" }}
                    </button>
                </div>
            </form>
        </ModalShell>
    }
}
