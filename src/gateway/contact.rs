//! Contact Records

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::GatewayError;
use crate::models::Contact;

const TABLE: &str = "app_contact";

const FIELDS: &[&str] = &["Name", "email", "phone", "job_title", "company_id", "notes"];

#[derive(Debug, Clone, Deserialize)]
struct ContactRecord {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    company_id: Option<u32>,
    #[serde(default)]
    notes: String,
}

impl From<ContactRecord> for Contact {
    fn from(r: ContactRecord) -> Self {
        Contact {
            id: r.id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            job_title: r.job_title,
            company_id: r.company_id,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactFields {
    #[serde(rename = "Name")]
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u32>,
    pub notes: String,
}

#[derive(Serialize)]
struct ContactUpdate<'a> {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(flatten)]
    fields: &'a ContactFields,
}

pub async fn list_contacts(client: &ApiClient) -> Result<Vec<Contact>, GatewayError> {
    let records: Vec<ContactRecord> = client.fetch_records(TABLE, FIELDS).await?;
    Ok(records.into_iter().map(Contact::from).collect())
}

pub async fn get_contact(client: &ApiClient, id: u32) -> Result<Contact, GatewayError> {
    let record: ContactRecord = client.get_record(TABLE, id, FIELDS).await?;
    Ok(record.into())
}

pub async fn create_contact(
    client: &ApiClient,
    fields: &ContactFields,
) -> Result<Contact, GatewayError> {
    let record: ContactRecord = client.create_record(TABLE, fields).await?;
    Ok(record.into())
}

pub async fn update_contact(
    client: &ApiClient,
    id: u32,
    fields: &ContactFields,
) -> Result<Contact, GatewayError> {
    let record: ContactRecord = client.update_record(TABLE, &ContactUpdate { id, fields }).await?;
    Ok(record.into())
}

pub async fn delete_contact(client: &ApiClient, id: u32) -> Result<(), GatewayError> {
    client.delete_record(TABLE, id).await
}
