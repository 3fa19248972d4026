//! Companies Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CompanyModal, DeleteConfirmButton, Empty, ErrorView, Loading, PageHeader};
use crate::context::AppContext;
use crate::gateway::{self, ApiClient};
use crate::models::Company;
use crate::store::{toast_error, toast_success, use_toasts};

#[component]
pub fn CompaniesPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let client = expect_context::<ApiClient>();
    let toasts = use_toasts();

    let (companies, set_companies) = signal(Vec::<Company>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);

    let (show_modal, set_show_modal) = signal(false);
    let (selected_company, set_selected_company) = signal(None::<Company>);

    {
        let client = client.clone();
        Effect::new(move |_| {
            let _ = ctx.reload_trigger.get();
            let client = client.clone();
            set_loading.set(true);
            set_error.set(None);
            spawn_local(async move {
                match gateway::list_companies(&client).await {
                    Ok(loaded) => {
                        set_companies.try_set(loaded);
                        set_loading.try_set(false);
                    }
                    Err(err) => {
                        set_error.try_set(Some(err.to_string()));
                        set_loading.try_set(false);
                    }
                }
            });
        });
    }

    let delete_company = {
        let client = client.clone();
        move |id: u32| {
            let client = client.clone();
            spawn_local(async move {
                match gateway::delete_company(&client, id).await {
                    Ok(()) => {
                        set_companies.try_update(|c| c.retain(|company| company.id != id));
                        toast_success(&toasts, "Company deleted successfully");
                    }
                    Err(err) => toast_error(&toasts, format!("Failed to delete company: {err}")),
                }
            });
        }
    };

    let on_save = Callback::new(move |saved: Company| {
        set_companies.update(|c| match c.iter_mut().find(|existing| existing.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => c.push(saved.clone()),
        });
    });

    view! {
        <div class="companies-page">
            <PageHeader title="Companies" subtitle="Organizations in your pipeline">
                <button
                    class="primary-btn"
                    on:click=move |_| {
                        set_selected_company.set(None);
                        set_show_modal.set(true);
                    }
                >
                    "+ New Company"
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
                } else if companies.get().is_empty() {
                    view! { <Empty message="No companies yet" /> }.into_any()
                } else {
                    let delete_company = delete_company.clone();
                    view! {
                        <table class="record-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Industry"</th>
                                    <th>"Website"</th>
                                    <th>"Phone"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || companies.get()
                                    // Key on the mutable fields so edits re-render the row
                                    key=|company| (
                                        company.id,
                                        company.name.clone(),
                                        company.industry.clone(),
                                        company.website.clone(),
                                        company.phone.clone(),
                                    )
                                    children=move |company| {
                                        let id = company.id;
                                        let company_for_edit = company.clone();
                                        let delete_company = delete_company.clone();
                                        view! {
                                            <tr
                                                class="record-row"
                                                on:click=move |_| {
                                                    set_selected_company.set(Some(company_for_edit.clone()));
                                                    set_show_modal.set(true);
                                                }
                                            >
                                                <td>{company.name.clone()}</td>
                                                <td>{company.industry.clone()}</td>
                                                <td>{company.website.clone()}</td>
                                                <td>{company.phone.clone()}</td>
                                                <td>
                                                    <DeleteConfirmButton
                                                        button_class="delete-btn"
                                                        on_confirm=Callback::new(move |_| delete_company(id))
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
                        <CompanyModal
                            company=selected_company.get()
                            on_save=on_save
                            on_close=Callback::new(move |_| set_show_modal.set(false))
                        />
                    }
                })
            }}
        </div>
    }
}
