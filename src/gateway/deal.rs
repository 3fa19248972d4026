//! Deal Records
//!
//! Gateway operations for deals, including the single-field stage update
//! the board issues on a drop.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::GatewayError;
use crate::models::{Deal, Stage};

const TABLE: &str = "app_deal";

const FIELDS: &[&str] = &[
    "title",
    "value",
    "stage",
    "expected_close_date",
    "contact_id",
    "company_id",
    "notes",
    "created_at",
    "updated_at",
];

/// Backend row shape; translated to `Deal` before anything else sees it.
#[derive(Debug, Clone, Deserialize)]
struct DealRecord {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    value: Option<f64>,
    stage: Stage,
    expected_close_date: NaiveDate,
    #[serde(default)]
    contact_id: Option<u32>,
    #[serde(default)]
    company_id: Option<u32>,
    #[serde(default)]
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DealRecord> for Deal {
    fn from(r: DealRecord) -> Self {
        Deal {
            id: r.id,
            title: r.title,
            value: r.value,
            stage: r.stage,
            expected_close_date: r.expected_close_date,
            contact_id: r.contact_id,
            company_id: r.company_id,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Writable deal fields, as the form collects them. The backend assigns
/// id and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct DealFields {
    pub title: String,
    pub value: f64,
    pub stage: Stage,
    pub expected_close_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u32>,
    pub notes: String,
}

#[derive(Serialize)]
struct DealUpdate<'a> {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(flatten)]
    fields: &'a DealFields,
}

#[derive(Serialize)]
struct StagePatch {
    #[serde(rename = "Id")]
    id: u32,
    stage: Stage,
}

pub async fn list_deals(client: &ApiClient) -> Result<Vec<Deal>, GatewayError> {
    let records: Vec<DealRecord> = client.fetch_records(TABLE, FIELDS).await?;
    Ok(records.into_iter().map(Deal::from).collect())
}

pub async fn get_deal(client: &ApiClient, id: u32) -> Result<Deal, GatewayError> {
    let record: DealRecord = client.get_record(TABLE, id, FIELDS).await?;
    Ok(record.into())
}

pub async fn create_deal(client: &ApiClient, fields: &DealFields) -> Result<Deal, GatewayError> {
    let record: DealRecord = client.create_record(TABLE, fields).await?;
    Ok(record.into())
}

pub async fn update_deal(
    client: &ApiClient,
    id: u32,
    fields: &DealFields,
) -> Result<Deal, GatewayError> {
    let record: DealRecord = client.update_record(TABLE, &DealUpdate { id, fields }).await?;
    Ok(record.into())
}

/// Partial update issued by the board on a drop; every other field is
/// left unchanged on the backend.
pub async fn update_deal_stage(
    client: &ApiClient,
    id: u32,
    stage: Stage,
) -> Result<Deal, GatewayError> {
    let record: DealRecord = client.update_record(TABLE, &StagePatch { id, stage }).await?;
    Ok(record.into())
}

pub async fn delete_deal(client: &ApiClient, id: u32) -> Result<(), GatewayError> {
    client.delete_record(TABLE, id).await
}
