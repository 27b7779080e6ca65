//! Review queue items and the review status enumeration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a submitted block version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Draft,
    Reviewing,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Display label used by review list views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Reviewing => "Under review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Badge color, carried over from the original palette.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Draft => "#999999",
            Self::Reviewing => "#FFA500",
            Self::Approved => "#008000",
            Self::Rejected => "#FF0000",
        }
    }
}

/// One item in the pending-review queue.
///
/// `submitted_content` arrives as a JSON-encoded string; when it parses,
/// the decoded value is cached in `content`. A parse failure leaves
/// `content` empty and the raw string untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    #[serde(rename = "workflowInstanceID")]
    pub workflow_instance_id: String,
    #[serde(rename = "blockVersionID", default)]
    pub block_version_id: String,
    #[serde(rename = "submittedContent", default)]
    pub submitted_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    pub status: ReviewStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ReviewItem {
    /// Parses the embedded `submittedContent` JSON into `content`.
    /// Degrades gracefully: a malformed payload keeps the raw string and
    /// returns false instead of failing.
    pub fn parse_submitted_content(&mut self) -> bool {
        match self.submitted_content.as_deref() {
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(value) => {
                    self.content = Some(value);
                    true
                }
                Err(_) => false,
            },
            None => false,
        }
    }
}
