//! Record API Client
//!
//! Fetch plumbing shared by the entity modules. One `ApiClient` is
//! constructed in `App` and handed down through context, so anything that
//! needs records receives its gateway instead of reaching for a global.

use js_sys::Reflect;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::envelope::{self, Envelope};
use super::error::GatewayError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    project_id: String,
    public_key: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Deployment configuration from globals injected by the host page,
    /// with same-origin defaults.
    pub fn from_window() -> Self {
        let global = |key: &str| {
            web_sys::window()
                .and_then(|w| Reflect::get(&w, &JsValue::from_str(key)).ok())
                .and_then(|v| v.as_string())
        };
        Self::new(
            global("DEALFLOW_API_BASE").unwrap_or_else(|| "/api".to_string()),
            global("DEALFLOW_PROJECT_ID").unwrap_or_default(),
            global("DEALFLOW_PUBLIC_KEY").unwrap_or_default(),
        )
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<JsValue, GatewayError> {
        let payload =
            serde_json::to_string(body).map_err(|e| GatewayError::Transport(e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&payload));

        let url = format!("{}/{}", self.base_url, path);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        request.headers().set("Content-Type", "application/json").map_err(js_error)?;
        request.headers().set("X-Project-Id", &self.project_id).map_err(js_error)?;
        request.headers().set("X-Public-Key", &self.public_key).map_err(js_error)?;

        let window = web_sys::window()
            .ok_or_else(|| GatewayError::Transport("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| GatewayError::Transport("unexpected fetch result".to_string()))?;
        if !response.ok() {
            return Err(GatewayError::Transport(format!("HTTP {}", response.status())));
        }
        let json = JsFuture::from(response.json().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Ok(json)
    }

    pub(super) async fn fetch_records<R>(
        &self,
        table: &str,
        fields: &[&str],
    ) -> Result<Vec<R>, GatewayError>
    where
        R: DeserializeOwned,
    {
        #[derive(Serialize)]
        struct FetchBody<'a> {
            fields: &'a [&'a str],
        }
        let raw = self.post(&format!("{table}/fetch"), &FetchBody { fields }).await?;
        envelope::expect_list(decode::<Envelope<Vec<R>>>(raw)?)
    }

    pub(super) async fn get_record<R>(
        &self,
        table: &str,
        id: u32,
        fields: &[&str],
    ) -> Result<R, GatewayError>
    where
        R: DeserializeOwned,
    {
        #[derive(Serialize)]
        struct GetBody<'a> {
            #[serde(rename = "Id")]
            id: u32,
            fields: &'a [&'a str],
        }
        let raw = self.post(&format!("{table}/get"), &GetBody { id, fields }).await?;
        envelope::expect_data(decode::<Envelope<R>>(raw)?)
    }

    pub(super) async fn create_record<R, B>(&self, table: &str, record: &B) -> Result<R, GatewayError>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        let raw = self
            .post(&format!("{table}/create"), &RecordsBody { records: [record] })
            .await?;
        envelope::expect_one(decode::<Envelope<R>>(raw)?)
    }

    pub(super) async fn update_record<R, B>(&self, table: &str, record: &B) -> Result<R, GatewayError>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        let raw = self
            .post(&format!("{table}/update"), &RecordsBody { records: [record] })
            .await?;
        envelope::expect_one(decode::<Envelope<R>>(raw)?)
    }

    pub(super) async fn delete_record(&self, table: &str, id: u32) -> Result<(), GatewayError> {
        #[derive(Serialize)]
        struct DeleteBody {
            #[serde(rename = "RecordIds")]
            record_ids: [u32; 1],
        }
        let raw = self
            .post(&format!("{table}/delete"), &DeleteBody { record_ids: [id] })
            .await?;
        envelope::expect_deleted(decode::<Envelope<serde_json::Value>>(raw)?)
    }
}

#[derive(Serialize)]
struct RecordsBody<'a, B: Serialize> {
    records: [&'a B; 1],
}

fn decode<T: DeserializeOwned>(value: JsValue) -> Result<T, GatewayError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| GatewayError::Transport(e.to_string()))
}

fn js_error(value: JsValue) -> GatewayError {
    let message = value
        .as_string()
        .or_else(|| {
            Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "request failed".to_string());
    GatewayError::Transport(message)
}
