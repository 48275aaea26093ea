use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::StoreConfig;
use crate::database::store::{RowStore, StoreError};
use crate::models::schema::json_type_name;

/// Error body PostgREST sends with every non-2xx answer
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Table store reached over the PostgREST HTTP interface (`/rest/v1/{table}`)
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::unavailable(format!("store URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, StoreError> {
        let url = self.table_url(table)?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key))
    }

    async fn send(&self, request: RequestBuilder, table: &str) -> Result<Vec<Value>, StoreError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!("Store answered {} for table {}", status, table);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read error body from {}: {}", table, e);
                    String::new()
                }
            };
            let err = classify_failure(status, &body);
            warn!("Store request on {} failed: {}", table, err);
            return Err(err);
        }

        rows_from_response(response).await
    }
}

#[async_trait]
impl RowStore for RestStore {
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        let request = self.request(Method::GET, table)?.query(&[("select", "*")]);
        self.send(request, table).await
    }

    async fn insert(&self, table: &str, row: Map<String, Value>) -> Result<Vec<Value>, StoreError> {
        let request = self
            .request(Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(&row);
        self.send(request, table).await
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::unavailable(format!("request timed out: {}", err))
    } else if err.is_connect() {
        StoreError::unavailable(format!("connection failed: {}", err))
    } else {
        StoreError::unavailable(err.to_string())
    }
}

async fn rows_from_response(response: Response) -> Result<Vec<Value>, StoreError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| StoreError::unavailable(format!("failed to read response body: {}", e)))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(other) => Err(StoreError::data(format!(
            "expected an array of rows, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(StoreError::data(format!("response is not JSON: {}", e))),
    }
}

/// Map a non-2xx answer onto the store error taxonomy.
///
/// Timeouts, throttling and 5xx are transient; every other 4xx is a refusal.
pub fn classify_failure(status: StatusCode, body: &str) -> StoreError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();

    let mut message = parsed
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
    if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
        message = format!("{} ({})", message, details);
    }
    if let Some(hint) = parsed.hint.filter(|h| !h.is_empty()) {
        message = format!("{}; hint: {}", message, hint);
    }

    if status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        StoreError::unavailable(format!("{} {}", status.as_u16(), message))
    } else {
        StoreError::rejected(status.as_u16(), parsed.code, message)
    }
}
