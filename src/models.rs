//! Domain Models
//!
//! Entity types in domain terms. Backend column names live in the gateway's
//! wire structs, not here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage of a deal. Ordered; `Won` and `Lost` are terminal.
///
/// The serialized strings double as display labels and as the drop-target
/// identifiers on the board, so they must stay exactly as the backend
/// stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Lead In")]
    LeadIn,
    #[serde(rename = "Contact Made")]
    ContactMade,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    #[serde(rename = "Negotiation")]
    Negotiation,
    #[serde(rename = "Won")]
    Won,
    #[serde(rename = "Lost")]
    Lost,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::LeadIn,
        Stage::ContactMade,
        Stage::ProposalSent,
        Stage::Negotiation,
        Stage::Won,
        Stage::Lost,
    ];

    /// The non-terminal stages shown as board columns.
    pub const ACTIVE: [Stage; 4] = [
        Stage::LeadIn,
        Stage::ContactMade,
        Stage::ProposalSent,
        Stage::Negotiation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::LeadIn => "Lead In",
            Stage::ContactMade => "Contact Made",
            Stage::ProposalSent => "Proposal Sent",
            Stage::Negotiation => "Negotiation",
            Stage::Won => "Won",
            Stage::Lost => "Lost",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Won | Stage::Lost)
    }

    /// Inverse of `as_str`, for `<select>` values.
    pub fn from_label(label: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deal data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: u32,
    pub title: String,
    /// Monetary value in dollars. A backend null stays `None`; display and
    /// aggregation treat it as zero without rewriting the record.
    pub value: Option<f64>,
    pub stage: Stage,
    pub expected_close_date: NaiveDate,
    pub contact_id: Option<u32>,
    pub company_id: Option<u32>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Past the expected close date while still in the active pipeline.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.expected_close_date < today && !self.stage.is_terminal()
    }
}

/// Contact data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub company_id: Option<u32>,
    pub notes: String,
}

/// Company data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: u32,
    pub name: String,
    pub industry: String,
    pub website: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

/// Activity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Call,
    Meeting,
    Email,
    Task,
    Note,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::Call,
        ActivityKind::Meeting,
        ActivityKind::Email,
        ActivityKind::Task,
        ActivityKind::Note,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Call => "Call",
            ActivityKind::Meeting => "Meeting",
            ActivityKind::Email => "Email",
            ActivityKind::Task => "Task",
            ActivityKind::Note => "Note",
        }
    }

    /// Inverse of `as_str`, for `<select>` values.
    pub fn from_label(label: &str) -> Option<ActivityKind> {
        ActivityKind::ALL.into_iter().find(|k| k.as_str() == label)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity data structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub kind: ActivityKind,
    pub description: String,
    pub date: DateTime<Utc>,
    pub deal_id: Option<u32>,
    pub contact_id: Option<u32>,
    pub company_id: Option<u32>,
    pub created_at: DateTime<Utc>,
}

// ========================
// Foreign-key display lookups
// ========================
//
// Foreign keys are weak references: a deleted target degrades to a
// placeholder, never an error.

pub fn contact_name(contacts: &[Contact], id: Option<u32>) -> Option<String> {
    let id = id?;
    Some(
        contacts
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Contact #{id}")),
    )
}

pub fn company_name(companies: &[Company], id: Option<u32>) -> Option<String> {
    let id = id?;
    Some(
        companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Company #{id}")),
    )
}

/// Label for whatever an activity is attached to, preferring deal over
/// contact over company.
pub fn related_entity_label(
    activity: &Activity,
    contacts: &[Contact],
    companies: &[Company],
) -> String {
    if let Some(deal_id) = activity.deal_id {
        return format!("Deal #{deal_id}");
    }
    if let Some(name) = contact_name(contacts, activity.contact_id) {
        return name;
    }
    if let Some(name) = company_name(companies, activity.company_id) {
        return name;
    }
    "General".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wire_strings_are_literal() {
        assert_eq!(serde_json::to_string(&Stage::LeadIn).unwrap(), "\"Lead In\"");
        assert_eq!(serde_json::to_string(&Stage::ProposalSent).unwrap(), "\"Proposal Sent\"");
        let parsed: Stage = serde_json::from_str("\"Contact Made\"").unwrap();
        assert_eq!(parsed, Stage::ContactMade);
        for stage in Stage::ALL {
            assert_eq!(serde_json::to_string(&stage).unwrap(), format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn terminal_stages() {
        assert!(Stage::Won.is_terminal());
        assert!(Stage::Lost.is_terminal());
        for stage in Stage::ACTIVE {
            assert!(!stage.is_terminal());
        }
    }

    #[test]
    fn dangling_foreign_key_degrades_to_placeholder() {
        let contacts = vec![Contact {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            job_title: String::new(),
            company_id: None,
            notes: String::new(),
        }];
        assert_eq!(contact_name(&contacts, Some(1)), Some("Ada".to_string()));
        assert_eq!(contact_name(&contacts, Some(99)), Some("Contact #99".to_string()));
        assert_eq!(contact_name(&contacts, None), None);
    }
}
