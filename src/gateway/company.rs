//! Company Records

use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::GatewayError;
use crate::models::Company;

const TABLE: &str = "app_company";

const FIELDS: &[&str] = &["Name", "industry", "website", "phone", "address", "notes"];

#[derive(Debug, Clone, Deserialize)]
struct CompanyRecord {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(default)]
    industry: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    notes: String,
}

impl From<CompanyRecord> for Company {
    fn from(r: CompanyRecord) -> Self {
        Company {
            id: r.id,
            name: r.name,
            industry: r.industry,
            website: r.website,
            phone: r.phone,
            address: r.address,
            notes: r.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyFields {
    #[serde(rename = "Name")]
    pub name: String,
    pub industry: String,
    pub website: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

#[derive(Serialize)]
struct CompanyUpdate<'a> {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(flatten)]
    fields: &'a CompanyFields,
}

pub async fn list_companies(client: &ApiClient) -> Result<Vec<Company>, GatewayError> {
    let records: Vec<CompanyRecord> = client.fetch_records(TABLE, FIELDS).await?;
    Ok(records.into_iter().map(Company::from).collect())
}

pub async fn get_company(client: &ApiClient, id: u32) -> Result<Company, GatewayError> {
    let record: CompanyRecord = client.get_record(TABLE, id, FIELDS).await?;
    Ok(record.into())
}

pub async fn create_company(
    client: &ApiClient,
    fields: &CompanyFields,
) -> Result<Company, GatewayError> {
    let record: CompanyRecord = client.create_record(TABLE, fields).await?;
    Ok(record.into())
}

pub async fn update_company(
    client: &ApiClient,
    id: u32,
    fields: &CompanyFields,
) -> Result<Company, GatewayError> {
    let record: CompanyRecord = client.update_record(TABLE, &CompanyUpdate { id, fields }).await?;
    Ok(record.into())
}

pub async fn delete_company(client: &ApiClient, id: u32) -> Result<(), GatewayError> {
    client.delete_record(TABLE, id).await
}
