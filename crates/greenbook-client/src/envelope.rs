//! Response envelopes.
//!
//! Every backend endpoint wraps its payload as
//! `{ status: "success" | ..., data | detail | message }` — except the
//! review-history endpoint, which answers
//! `{ status_code, content: { data } }`. That divergence is an external
//! contract and is decoded by its own type rather than papered over.

use greenbook_core::{GreenbookError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The standard response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The backend's human-readable rejection text, falling back to a
    /// generic message when it sent none.
    pub fn rejection_message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "request failed".to_string())
    }

    /// Decodes `data` into `T`, failing closed: a non-success status is a
    /// rejection, and a success payload whose shape does not match `T` is
    /// a decode error, not a partially-populated value.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(GreenbookError::rejected(self.rejection_message()));
        }
        let data = self.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| GreenbookError::decode(e.to_string()))
    }

    /// Success/failure only, for endpoints with no payload of interest.
    pub fn into_unit(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(GreenbookError::rejected(self.rejection_message()))
        }
    }
}

/// The review-history endpoint's divergent envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewHistoryEnvelope {
    pub status_code: u16,
    #[serde(default)]
    pub content: HistoryContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryContent {
    #[serde(default)]
    pub data: Value,
}

impl ReviewHistoryEnvelope {
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if self.status_code != 200 {
            return Err(GreenbookError::rejected(format!(
                "review history returned status_code {}",
                self.status_code
            )));
        }
        serde_json::from_value(self.content.data)
            .map_err(|e| GreenbookError::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: String,
    }

    #[test]
    fn success_envelope_decodes_data() {
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({
            "status": "success",
            "data": {"id": "a-1"}
        }))
        .unwrap();
        let payload: Payload = envelope.into_data().unwrap();
        assert_eq!(payload, Payload { id: "a-1".into() });
    }

    #[test]
    fn failure_prefers_detail_over_message() {
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({
            "status": "error",
            "detail": "asset is locked",
            "message": "generic"
        }))
        .unwrap();
        match envelope.into_data::<Payload>() {
            Err(GreenbookError::Rejected(message)) => assert_eq!(message, "asset is locked"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn shape_mismatch_fails_closed() {
        let envelope: ApiEnvelope = serde_json::from_value(serde_json::json!({
            "status": "success",
            "data": {"unexpected": true}
        }))
        .unwrap();
        assert!(matches!(
            envelope.into_data::<Payload>(),
            Err(GreenbookError::Decode(_))
        ));
    }

    #[test]
    fn history_envelope_uses_status_code_and_nested_data() {
        let envelope: ReviewHistoryEnvelope = serde_json::from_value(serde_json::json!({
            "status_code": 200,
            "content": {"data": [{"id": "h-1"}]}
        }))
        .unwrap();
        let items: Vec<Payload> = envelope.into_data().unwrap();
        assert_eq!(items.len(), 1);

        let rejected: ReviewHistoryEnvelope = serde_json::from_value(serde_json::json!({
            "status_code": 500,
            "content": {}
        }))
        .unwrap();
        assert!(rejected.into_data::<Vec<Payload>>().is_err());
    }
}
