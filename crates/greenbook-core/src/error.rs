//! Error types shared across the Greenbook client.

use thiserror::Error;

/// A shared error type for the whole client SDK.
///
/// Every layer (HTTP client, stores) reports failures through this enum so
/// that callers deal with a single taxonomy: transport failures, structured
/// HTTP rejections, business-level rejections carried inside a 2xx
/// envelope, and payloads that do not match the expected shape.
#[derive(Error, Debug, Clone)]
pub enum GreenbookError {
    /// Network/transport failure (connection refused, DNS, timeout).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx HTTP response carrying a structured `detail`/`message`.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    /// 2xx response whose envelope reported `status != "success"`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Payload did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A required parameter was absent before a call could be issued.
    #[error("Missing required parameters: {0}")]
    MissingParams(String),

    /// Entity not found in local state.
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Session storage access failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GreenbookError {
    /// Creates a Network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an Http error.
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a Rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Creates a Decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a MissingParams error.
    pub fn missing_params(message: impl Into<String>) -> Self {
        Self::MissingParams(message.into())
    }

    /// Creates a NotFound error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a business-level rejection.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The human-readable message suited for a toast, without the variant
    /// prefix where the backend already supplied user-facing text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { detail, .. } => detail.clone(),
            Self::Rejected(message) => message.clone(),
            Self::MissingParams(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for GreenbookError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GreenbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A type alias for `Result<T, GreenbookError>`.
pub type Result<T> = std::result::Result<T, GreenbookError>;
