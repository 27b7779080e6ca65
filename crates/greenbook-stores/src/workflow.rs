//! Workflow store: per-chapter multi-stage approver-group configuration.
//!
//! Stage order is never trusted from input. Both the save payload and the
//! cached copies are renumbered from array position (1-based), so after
//! any save the order always matches the position.

use greenbook_client::ApiClient;
use greenbook_core::notify::{Notifier, Toast};
use greenbook_core::organization::Role;
use greenbook_core::workflow::{WorkflowDetail, WorkflowStage, project_detail, renumber_stages};
use greenbook_core::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct WorkflowState {
    loading: bool,
    chapters: Vec<String>,
    approver_groups: Vec<Role>,
    /// Raw per-chapter stage lists, as exchanged with the backend.
    workflow_settings: HashMap<String, Vec<WorkflowStage>>,
    /// Normalized projection for read-mostly views.
    workflow_details: HashMap<String, WorkflowDetail>,
}

pub struct WorkflowStore {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<WorkflowState>,
}

impl WorkflowStore {
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            state: RwLock::new(WorkflowState::default()),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn chapters(&self) -> Vec<String> {
        self.state.read().await.chapters.clone()
    }

    pub async fn approver_groups(&self) -> Vec<Role> {
        self.state.read().await.approver_groups.clone()
    }

    /// A chapter's cached raw stages; empty when none were fetched.
    pub async fn chapter_workflow(&self, chapter_id: &str) -> Vec<WorkflowStage> {
        self.state
            .read()
            .await
            .workflow_settings
            .get(chapter_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn workflow_details(&self, chapter_id: &str) -> Option<WorkflowDetail> {
        self.state.read().await.workflow_details.get(chapter_id).cloned()
    }

    pub async fn all_workflow_details(&self) -> HashMap<String, WorkflowDetail> {
        self.state.read().await.workflow_details.clone()
    }

    /// Fetches the report's chapter list. Failures toast and re-throw.
    pub async fn fetch_chapters(&self, report_id: &str) -> Result<()> {
        self.state.write().await.loading = true;
        let fetched = self.client.report_chapters(report_id).await;
        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok(chapters) => {
                state.chapters = chapters;
                Ok(())
            }
            Err(error) => {
                self.notifier.notify(Toast::error(error.user_message()));
                Err(error)
            }
        }
    }

    /// Fetches the role groups available as approvers.
    pub async fn fetch_approver_groups(&self, organization_id: &str) -> Result<()> {
        self.state.write().await.loading = true;
        let fetched = self.client.approver_groups(organization_id).await;
        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok(groups) => {
                state.approver_groups = groups;
                Ok(())
            }
            Err(error) => {
                self.notifier.notify(Toast::error(error.user_message()));
                Err(error)
            }
        }
    }

    /// Fetches one chapter's stage list, caching both the raw stages and
    /// the normalized projection.
    pub async fn fetch_workflow_settings(
        &self,
        report_id: &str,
        chapter_id: &str,
    ) -> Result<Vec<WorkflowStage>> {
        self.state.write().await.loading = true;
        let fetched = self.client.workflow_stages(report_id, chapter_id).await;
        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok(stages) => {
                state
                    .workflow_settings
                    .insert(chapter_id.to_string(), stages.clone());
                if state.chapters.iter().any(|c| c == chapter_id) {
                    state
                        .workflow_details
                        .insert(chapter_id.to_string(), project_detail(chapter_id, &stages));
                }
                Ok(stages)
            }
            Err(error) => {
                self.notifier.notify(Toast::error(error.user_message()));
                Err(error)
            }
        }
    }

    /// Saves one chapter's stage list. Incoming `order` values are
    /// discarded and recomputed from array position before the POST; on
    /// success the renumbered stages replace the local caches.
    pub async fn save_workflow_settings(
        &self,
        report_id: &str,
        chapter_id: &str,
        mut stages: Vec<WorkflowStage>,
    ) -> Result<()> {
        renumber_stages(&mut stages);
        self.state.write().await.loading = true;
        let saved = self
            .client
            .save_workflow_stages(report_id, chapter_id, &stages)
            .await;
        let mut state = self.state.write().await;
        state.loading = false;
        match saved {
            Ok(()) => {
                if state.chapters.iter().any(|c| c == chapter_id) {
                    state
                        .workflow_details
                        .insert(chapter_id.to_string(), project_detail(chapter_id, &stages));
                }
                state.workflow_settings.insert(chapter_id.to_string(), stages);
                Ok(())
            }
            Err(error) => {
                self.notifier.notify(Toast::error(error.user_message()));
                Err(error)
            }
        }
    }

    /// Drops everything back to the initial state.
    pub async fn reset_state(&self) {
        *self.state.write().await = WorkflowState::default();
    }
}
