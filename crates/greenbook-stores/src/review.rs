//! Review store: pending-review queue, review detail, and submission.

use greenbook_client::ApiClient;
use greenbook_core::Result;
use greenbook_core::review::{ReviewItem, ReviewStatus};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct ReviewState {
    pending_reviews: Vec<ReviewItem>,
    current_review: Option<ReviewItem>,
    review_history: Vec<Value>,
}

pub struct ReviewStore {
    client: Arc<ApiClient>,
    state: RwLock<ReviewState>,
}

impl ReviewStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: RwLock::new(ReviewState::default()),
        }
    }

    pub async fn pending_reviews(&self) -> Vec<ReviewItem> {
        self.state.read().await.pending_reviews.clone()
    }

    pub async fn current_review(&self) -> Option<ReviewItem> {
        self.state.read().await.current_review.clone()
    }

    pub async fn review_history(&self) -> Vec<Value> {
        self.state.read().await.review_history.clone()
    }

    /// Replaces the queue wholesale with the reviewer's pending items.
    pub async fn fetch_pending_reviews(&self, user_id: &str) -> Result<()> {
        let reviews = self.client.pending_reviews(user_id).await?;
        self.state.write().await.pending_reviews = reviews;
        Ok(())
    }

    /// Fetches one review. When its `submittedContent` is JSON-encoded
    /// text, the decoded value is merged into the record; a parse failure
    /// degrades gracefully to the unparsed record.
    pub async fn fetch_review_data(&self, workflow_instance_id: &str) -> Result<ReviewItem> {
        let mut review = self.client.review_data(workflow_instance_id).await?;
        if !review.parse_submitted_content() {
            debug!(%workflow_instance_id, "submitted content not parseable, keeping raw");
        }
        self.state.write().await.current_review = Some(review.clone());
        Ok(review)
    }

    /// Posts a review decision. The queue is deliberately not refreshed
    /// here; callers refetch when they need an up-to-date list.
    pub async fn submit_review(
        &self,
        workflow_instance_id: &str,
        block_version_id: &str,
        status: ReviewStatus,
        comment: &str,
    ) -> Result<()> {
        self.client
            .submit_review(workflow_instance_id, block_version_id, status, comment)
            .await
    }

    /// Fetches a block's review history via its divergent envelope.
    pub async fn fetch_review_history(&self, block_id: &str) -> Result<()> {
        let history = self.client.review_history(block_id).await?;
        self.state.write().await.review_history = history;
        Ok(())
    }
}
