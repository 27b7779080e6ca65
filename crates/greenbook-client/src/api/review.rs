//! Review queue endpoints.

use crate::client::ApiClient;
use greenbook_core::Result;
use greenbook_core::review::{ReviewItem, ReviewStatus};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct PendingReviewsRequest<'a> {
    #[serde(rename = "userID")]
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ReviewDataRequest<'a> {
    #[serde(rename = "workflowInstanceID")]
    workflow_instance_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SubmitReviewRequest<'a> {
    #[serde(rename = "workflowInstanceID")]
    workflow_instance_id: &'a str,
    #[serde(rename = "blockVersionID")]
    block_version_id: &'a str,
    status: ReviewStatus,
    comment: &'a str,
}

#[derive(Debug, Serialize)]
struct ReviewHistoryRequest<'a> {
    #[serde(rename = "BlockID")]
    block_id: &'a str,
}

impl ApiClient {
    /// Everything waiting on the given reviewer.
    pub async fn pending_reviews(&self, user_id: &str) -> Result<Vec<ReviewItem>> {
        self.post(
            "/api/report/get_pending_reviews",
            &PendingReviewsRequest { user_id },
        )
        .await
    }

    /// One review item by workflow instance.
    pub async fn review_data(&self, workflow_instance_id: &str) -> Result<ReviewItem> {
        self.post(
            "/api/report/get_review_data",
            &ReviewDataRequest {
                workflow_instance_id,
            },
        )
        .await
    }

    /// Posts a review decision. Does not refetch the queue.
    pub async fn submit_review(
        &self,
        workflow_instance_id: &str,
        block_version_id: &str,
        status: ReviewStatus,
        comment: &str,
    ) -> Result<()> {
        self.post_unit(
            "/api/report/submit_review",
            &SubmitReviewRequest {
                workflow_instance_id,
                block_version_id,
                status,
                comment,
            },
        )
        .await
    }

    /// Review history for a block. This endpoint answers with the
    /// divergent `{status_code, content.data}` envelope.
    pub async fn review_history(&self, block_id: &str) -> Result<Vec<Value>> {
        self.post_history(
            "/api/report/get_review_history",
            &ReviewHistoryRequest { block_id },
        )
        .await
    }
}
