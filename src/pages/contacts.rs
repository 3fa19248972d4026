//! Contacts Page
//!
//! Plain load-and-render list with create/edit modal and inline
//! confirm-then-delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ContactModal, DeleteConfirmButton, Empty, ErrorView, Loading, PageHeader};
use crate::context::AppContext;
use crate::gateway::{self, ApiClient};
use crate::models::{company_name, Company, Contact};
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn ContactsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let (contacts, set_contacts) = signal(Vec::<Contact>::new());
    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let (show_modal, set_show_modal) = signal(false);
    let (selected_contact, set_selected_contact) = signal(None::<Contact>);

    {
        let client = client.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let client = client.clone();
            set_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                let (contacts_res, companies_res) = futures::join!(
                    gateway::list_contacts(&client),
                    gateway::list_companies(&client),
                );
                match (contacts_res, companies_res) {
                    (Ok(c), Ok(co)) => {
                        set_contacts.try_set(c);
                        set_companies.try_set(co);
                        set_loading.try_set(false);
                    }
                    (c, co) => {
                        let message = [c.err(), co.err()]
                            .into_iter()
                            .flatten()
                            .next()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "Failed to load contacts".to_string());
                        set_error.try_set(Some(message));
                        set_loading.try_set(false);
                    }
                }
            });
        });
    }

    let delete_contact = {
        let client = client.clone();
        move |id: u32| {
            let client = client.clone();
            spawn_local(async move {
                match gateway::delete_contact(&client, id).await {
                    Ok(()) => {
                        set_contacts.try_update(|c| c.retain(|contact| contact.id != id));
                        toast_success(&toasts, "Contact deleted successfully");
                    }
                    Err(err) => toast_error(&toasts, format!("Failed to delete contact: {err}")),
                }
            });
        }
    };

    let on_save = Callback::new(move |saved: Contact| {
        set_contacts.update(|c| match c.iter_mut().find(|existing| existing.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => c.push(saved.clone()),
        });
    });

    view! {
        <div class="contacts-page">
            <PageHeader
                title="Contacts"
                subtitle="Manage your contacts and their details"
            >
                <button
                    class="primary-btn"
                    on:click=move |_| {
                        set_selected_contact.set(None);
                        set_show_modal.set(true);
                    }
                >
                    "+ New Contact"
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
                } else if contacts.get().is_empty() {
                    view! { <Empty message="No contacts yet" /> }.into_any()
                } else {
                    let delete_contact = delete_contact.clone();
                    view! {
                        <table class="record-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Job Title"</th>
                                    <th>"Company"</th>
                                    <th>"Email"</th>
                                    <th>"Phone"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || contacts.get()
                                    // Key on the mutable fields so edits re-render the row
                                    key=|contact| (
                                        contact.id,
                                        contact.name.clone(),
                                        contact.email.clone(),
                                        contact.phone.clone(),
                                        contact.job_title.clone(),
                                        contact.company_id,
                                    )
                                    children=move |contact| {
                                        let id = contact.id;
                                        let company = company_name(&companies.get(), contact.company_id)
                                            .unwrap_or_else(|| "No company".to_string());
                                        let contact_for_edit = contact.clone();
                                        let delete_contact = delete_contact.clone();
                                        view! {
                                            <tr
                                                class="record-row"
                                                on:click=move |_| {
                                                    set_selected_contact.set(Some(contact_for_edit.clone()));
                                                    set_show_modal.set(true);
                                                }
                                            >
                                                <td>{contact.name.clone()}</td>
                                                <td>{contact.job_title.clone()}</td>
                                                <td>{company}</td>
                                                <td>{contact.email.clone()}</td>
                                                <td>{contact.phone.clone()}</td>
                                                <td>
                                                    <DeleteConfirmButton
                                                        button_class="delete-btn"
                                                        on_confirm=Callback::new(move |_| delete_contact(id))
                                                    />
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }
                    .into_any()
                }
            }}

            {move || {
                show_modal.get().then(|| {
                    view! {
                        <ContactModal
                            contact=selected_contact.get()
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
