// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flowise document store API over HTTP

use super::{ClientError, StoreClient};
use async_trait::async_trait;
use dsr_core::{DocumentStore, Settings};
use std::time::Duration;

/// Per-request budget; a stuck call must not outlive a poll interval by much
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request variants tried in order when triggering a refresh. Server
/// versions disagree on the method and body they accept.
const TRIGGER_ATTEMPTS: &[(Method, Option<&str>)] = &[
    (Method::Post, None),
    (Method::Post, Some("{}")),
    (Method::Post, Some(r#"{"items":[]}"#)),
    (Method::Put, None),
    (Method::Put, Some("{}")),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
}

/// Status and body of a completed HTTP exchange
#[derive(Debug)]
struct RawResponse {
    status: u16,
    body: String,
}

/// Document store client backed by a blocking ureq agent
#[derive(Clone)]
pub struct HttpStoreClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl HttpStoreClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.base_url, &settings.api_key)
    }

    fn stores_url(&self) -> String {
        format!("{}/api/v1/document-store/store", self.base_url)
    }

    fn store_url(&self, id: &str) -> String {
        format!("{}/api/v1/document-store/store/{}", self.base_url, id)
    }

    fn refresh_url(&self, id: &str) -> String {
        format!("{}/api/v1/document-store/refresh/{}", self.base_url, id)
    }

    /// Run one request on the blocking pool
    async fn request(
        &self,
        method: Method,
        url: String,
        body: Option<&'static str>,
    ) -> Result<RawResponse, ClientError> {
        let agent = self.agent.clone();
        let auth = format!("Bearer {}", self.api_key);

        tokio::task::spawn_blocking(move || execute(&agent, method, &url, &auth, body))
            .await
            .map_err(|e| ClientError::Transport(format!("request task failed: {}", e)))?
    }
}

fn execute(
    agent: &ureq::Agent,
    method: Method,
    url: &str,
    auth: &str,
    body: Option<&str>,
) -> Result<RawResponse, ClientError> {
    let result = match (method, body) {
        (Method::Get, _) => agent
            .get(url)
            .header("Authorization", auth)
            .header("Accept", "application/json")
            .call(),
        (Method::Post, None) => agent.post(url).header("Authorization", auth).send_empty(),
        (Method::Post, Some(json)) => agent
            .post(url)
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .send(json),
        (Method::Put, None) => agent.put(url).header("Authorization", auth).send_empty(),
        (Method::Put, Some(json)) => agent
            .put(url)
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .send(json),
    };

    let mut response = result.map_err(|e| ClientError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ClientError::Transport(format!("failed to read response: {}", e)))?;

    Ok(RawResponse { status, body })
}

/// Map a response onto the error taxonomy, returning the body on 2xx
fn check_status(response: RawResponse, store_id: Option<&str>) -> Result<String, ClientError> {
    match response.status {
        200..=299 => Ok(response.body),
        404 => Err(ClientError::NotFound(
            store_id
                .map(str::to_string)
                .unwrap_or_else(|| error_message(&response.body)),
        )),
        409 | 422 => Err(ClientError::Conflict(error_message(&response.body))),
        status => Err(ClientError::Http {
            status,
            body: error_message(&response.body),
        }),
    }
}

/// Prefer the `message` field of a JSON error body, else the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn decode_store_list(body: &str) -> Result<Vec<DocumentStore>, ClientError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;

    if !value.is_array() {
        tracing::warn!(
            kind = json_kind(&value),
            "store list response is not an array, treating as empty"
        );
        return Ok(Vec::new());
    }

    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Whether a failed trigger attempt is worth retrying with the next variant
fn try_next_variant(error: &ClientError) -> bool {
    matches!(error, ClientError::Http { .. })
}

#[async_trait]
impl StoreClient for HttpStoreClient {
    async fn list_stores(&self) -> Result<Vec<DocumentStore>, ClientError> {
        let response = self.request(Method::Get, self.stores_url(), None).await?;
        let body = check_status(response, None)?;
        decode_store_list(&body)
    }

    async fn get_store(&self, id: &str) -> Result<DocumentStore, ClientError> {
        let response = self.request(Method::Get, self.store_url(id), None).await?;
        let body = check_status(response, Some(id))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn trigger_refresh(&self, id: &str) -> Result<(), ClientError> {
        let mut last_error = None;

        for (method, body) in TRIGGER_ATTEMPTS {
            let result = self
                .request(*method, self.refresh_url(id), *body)
                .await
                .and_then(|response| check_status(response, Some(id)));

            match result {
                Ok(_) => {
                    tracing::debug!(store_id = id, ?method, ?body, "refresh accepted");
                    return Ok(());
                }
                Err(e) if try_next_variant(&e) => {
                    tracing::debug!(store_id = id, ?method, ?body, error = %e, "refresh variant rejected");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| ClientError::Transport("no refresh request was attempted".to_string())))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
