//! HTTP client for the `customerapi` resource collection.
//!
//! Every call maps to one endpoint. Non-2xx responses are errors; callers
//! decide which user-facing message to show.

use reqwest::{Client, Response};
use serde_json::Value;

use crate::customer::Customer;
use crate::error::ApiError;

/// Thin async client over `{base_url}/customerapi`.
#[derive(Clone, Debug)]
pub struct CustomerApi {
    client: Client,
    endpoint: String,
}

impl CustomerApi {
    /// Build a client for the given backend base URL (`/customerapi` is appended).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            endpoint: format!("{base}/customerapi"),
        })
    }

    /// Resource root, e.g. `http://localhost:8080/customerapi`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    /// `GET /all`. A successful response that is not a JSON array is [`ApiError::NotAnArray`].
    pub async fn list_all(&self) -> Result<Vec<Customer>, ApiError> {
        let res = self.client.get(self.url("all")).send().await?;
        let body: Value = check(res).await?.json().await?;
        match body {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Customer>, _>>()
                .map_err(ApiError::from),
            _ => Err(ApiError::NotAnArray),
        }
    }

    /// `POST /add` with the form record.
    pub async fn create(&self, record: &Value) -> Result<(), ApiError> {
        let res = self.client.post(self.url("add")).json(record).send().await?;
        check(res).await?;
        Ok(())
    }

    /// `PUT /update` with the form record (which carries the id).
    pub async fn update(&self, record: &Value) -> Result<(), ApiError> {
        let res = self
            .client
            .put(self.url("update"))
            .json(record)
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }

    /// `DELETE /delete/{id}`. Returns the backend's status text.
    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let res = self
            .client
            .delete(self.url(&format!("delete/{id}")))
            .send()
            .await?;
        let text = check(res).await?.text().await?;
        Ok(status_text(text))
    }

    /// `GET /get/{id}`. `id` is passed through exactly as typed.
    pub async fn get(&self, id: &str) -> Result<Customer, ApiError> {
        let res = self
            .client
            .get(self.url(&format!("get/{}", id.trim())))
            .send()
            .await?;
        let text = check(res).await?.text().await?;
        if text.trim().is_empty() {
            return Err(ApiError::NotFound);
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Null => Err(ApiError::NotFound),
            body => Ok(serde_json::from_value(body)?),
        }
    }
}

async fn check(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

/// Delete answers with plain text, but some backends wrap it in a JSON string.
fn status_text(raw: String) -> String {
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::String(s)) => s,
        _ => raw,
    }
}
