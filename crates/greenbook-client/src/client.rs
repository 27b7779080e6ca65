//! The HTTP client wrapper.
//!
//! `ApiClient` owns one `reqwest::Client` plus the resolved base URLs and
//! an optional bearer token. All calls are JSON; no client-side timeout is
//! enforced beyond reqwest's own defaults, and no call is cancellable once
//! issued.

use crate::config::ApiConfig;
use crate::envelope::{ApiEnvelope, ReviewHistoryEnvelope};
use greenbook_core::{GreenbookError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::RwLock;
use tracing::debug;

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    bearer_token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            bearer_token: RwLock::new(None),
        }
    }

    /// Client configured from `GREENBOOK_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sets (or clears) the bearer token attached to subsequent requests.
    pub fn set_bearer_token(&self, token: Option<String>) {
        *self.bearer_token.write().expect("token lock poisoned") = token;
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.bearer_token.read().expect("token lock poisoned").clone()
    }

    /// POST against the primary API, decoding the standard envelope's
    /// `data` into `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let value = self.request_json(&self.config.api_base_url, path, Some(body)).await?;
        let envelope: ApiEnvelope = serde_json::from_value(value)?;
        envelope.into_data()
    }

    /// POST whose response carries no payload of interest.
    pub async fn post_unit(&self, path: &str, body: &impl Serialize) -> Result<()> {
        let value = self.request_json(&self.config.api_base_url, path, Some(body)).await?;
        let envelope: ApiEnvelope = serde_json::from_value(value)?;
        envelope.into_unit()
    }

    /// POST for the few endpoints that return their fields flat at the top
    /// level next to `status` instead of nested under `data` (login is
    /// one). The whole body is decoded into `T` after the status check.
    pub async fn post_flat<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let value = self.request_json(&self.config.api_base_url, path, Some(body)).await?;
        let status = value.get("status").and_then(Value::as_str).unwrap_or("");
        if status != "success" {
            return Err(GreenbookError::rejected(rejection_text(&value)));
        }
        serde_json::from_value(value).map_err(|e| GreenbookError::decode(e.to_string()))
    }

    /// GET against the primary API, decoding the standard envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .request_json::<()>(&self.config.api_base_url, path, None)
            .await?;
        let envelope: ApiEnvelope = serde_json::from_value(value)?;
        envelope.into_data()
    }

    /// POST against the analysis/verification API.
    pub async fn post_analysis<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let value = self
            .request_json(&self.config.analysis_base_url, path, Some(body))
            .await?;
        let envelope: ApiEnvelope = serde_json::from_value(value)?;
        envelope.into_data()
    }

    /// POST for the review-history endpoint with its divergent
    /// `{status_code, content.data}` envelope.
    pub async fn post_history<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let value = self.request_json(&self.config.api_base_url, path, Some(body)).await?;
        let envelope: ReviewHistoryEnvelope = serde_json::from_value(value)?;
        envelope.into_data()
    }

    /// Issues one JSON request and returns the parsed body, mapping
    /// transport failures and non-2xx statuses to errors. The error for a
    /// non-2xx response carries the body's `detail`/`message` when
    /// present.
    async fn request_json<B: Serialize>(
        &self,
        base: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", base.trim_end_matches('/'), path);
        debug!(%url, "greenbook api request");

        let mut request = match body {
            Some(body) => self.http.post(&url).json(body),
            None => self.http.get(&url),
        };
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(GreenbookError::http(status.as_u16(), rejection_text(&value)));
        }
        if value.is_null() {
            return Err(GreenbookError::decode("response body is not valid JSON"));
        }
        Ok(value)
    }
}

/// Pulls the backend's rejection text out of an error body. `detail` may
/// be a string or a structured object; objects are rendered as JSON.
fn rejection_text(body: &Value) -> String {
    for key in ["detail", "message"] {
        match body.get(key) {
            Some(Value::String(text)) => return text.clone(),
            Some(Value::Null) | None => continue,
            Some(other) => return other.to_string(),
        }
    }
    "request failed".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_text_prefers_detail_and_renders_objects() {
        let body = serde_json::json!({"detail": "bad input", "message": "other"});
        assert_eq!(rejection_text(&body), "bad input");

        let body = serde_json::json!({"detail": {"error": "parse failed"}});
        assert_eq!(rejection_text(&body), r#"{"error":"parse failed"}"#);

        assert_eq!(rejection_text(&Value::Null), "request failed");
    }
}
