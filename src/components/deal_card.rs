//! Deal Card Component
//!
//! Presentational card for one deal inside a board column. Drag handlers
//! live on the wrapper the page renders; this only displays.

use chrono::Local;
use leptos::prelude::*;

use crate::format::{format_close_date, format_usd};
use crate::models::{Deal, Stage};

fn stage_badge_class(stage: Stage) -> &'static str {
    match stage {
        Stage::LeadIn => "badge badge-default",
        Stage::ContactMade => "badge badge-info",
        Stage::ProposalSent => "badge badge-warning",
        Stage::Negotiation => "badge badge-primary",
        Stage::Won => "badge badge-success",
        Stage::Lost => "badge badge-error",
    }
}

#[component]
pub fn DealCard(
    deal: Deal,
    #[prop(optional_no_strip)] contact: Option<String>,
    #[prop(optional_no_strip)] company: Option<String>,
) -> impl IntoView {
    let overdue = deal.is_overdue(Local::now().date_naive());
    let notes_preview = (!deal.notes.is_empty()).then(|| {
        if deal.notes.len() > 80 {
            let cut = deal
                .notes
                .char_indices()
                .take_while(|(i, _)| *i < 80)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}...", &deal.notes[..cut])
        } else {
            deal.notes.clone()
        }
    });

    view! {
        <div class="deal-card">
            <div class="deal-card-top">
                <h3 class="deal-title">{deal.title.clone()}</h3>
                <span class=stage_badge_class(deal.stage)>{deal.stage.as_str()}</span>
            </div>

            <div class="deal-card-value-row">
                <span class="deal-value">{format_usd(deal.value)}</span>
                {overdue.then(|| view! { <span class="deal-overdue">"Overdue"</span> })}
            </div>

            <div class="deal-card-links">
                {contact.map(|name| view! { <div class="deal-contact">{name}</div> })}
                {company.map(|name| view! { <div class="deal-company">{name}</div> })}
            </div>

            <div class="deal-close-date">
                {format!("Close: {}", format_close_date(deal.expected_close_date))}
            </div>

            {notes_preview.map(|notes| view! { <div class="deal-notes-preview">{notes}</div> })}
        </div>
    }
}
