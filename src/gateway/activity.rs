//! Activity Records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::GatewayError;
use crate::models::{Activity, ActivityKind};

const TABLE: &str = "app_activity";

const FIELDS: &[&str] = &[
    "type",
    "description",
    "date",
    "deal_id",
    "contact_id",
    "company_id",
    "created_at",
];

#[derive(Debug, Clone, Deserialize)]
struct ActivityRecord {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "type")]
    kind: ActivityKind,
    #[serde(default)]
    description: String,
    date: DateTime<Utc>,
    #[serde(default)]
    deal_id: Option<u32>,
    #[serde(default)]
    contact_id: Option<u32>,
    #[serde(default)]
    company_id: Option<u32>,
    created_at: DateTime<Utc>,
}

impl From<ActivityRecord> for Activity {
    fn from(r: ActivityRecord) -> Self {
        Activity {
            id: r.id,
            kind: r.kind,
            description: r.description,
            date: r.date,
            deal_id: r.deal_id,
            contact_id: r.contact_id,
            company_id: r.company_id,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityFields {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u32>,
}

#[derive(Serialize)]
struct ActivityUpdate<'a> {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(flatten)]
    fields: &'a ActivityFields,
}

pub async fn list_activities(client: &ApiClient) -> Result<Vec<Activity>, GatewayError> {
    let records: Vec<ActivityRecord> = client.fetch_records(TABLE, FIELDS).await?;
    Ok(records.into_iter().map(Activity::from).collect())
}

pub async fn get_activity(client: &ApiClient, id: u32) -> Result<Activity, GatewayError> {
    let record: ActivityRecord = client.get_record(TABLE, id, FIELDS).await?;
    Ok(record.into())
}

pub async fn create_activity(
    client: &ApiClient,
    fields: &ActivityFields,
) -> Result<Activity, GatewayError> {
    let record: ActivityRecord = client.create_record(TABLE, fields).await?;
    Ok(record.into())
}

pub async fn update_activity(
    client: &ApiClient,
    id: u32,
    fields: &ActivityFields,
) -> Result<Activity, GatewayError> {
    let record: ActivityRecord = client.update_record(TABLE, &ActivityUpdate { id, fields }).await?;
    Ok(record.into())
}

pub async fn delete_activity(client: &ApiClient, id: u32) -> Result<(), GatewayError> {
    client.delete_record(TABLE, id).await
}
