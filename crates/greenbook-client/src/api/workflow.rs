//! Workflow stage endpoints.

use crate::client::ApiClient;
use greenbook_core::Result;
use greenbook_core::workflow::WorkflowStage;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct WorkflowStageRequest<'a> {
    #[serde(rename = "assetID")]
    asset_id: &'a str,
    #[serde(rename = "chapterName")]
    chapter_name: &'a str,
}

#[derive(Debug, Serialize)]
struct SaveWorkflowStageRequest<'a> {
    #[serde(rename = "assetID")]
    asset_id: &'a str,
    #[serde(rename = "chapterName")]
    chapter_name: &'a str,
    #[serde(rename = "stageSettings")]
    stage_settings: &'a [WorkflowStage],
}

impl ApiClient {
    /// Fetches one chapter's ordered stage list.
    pub async fn workflow_stages(
        &self,
        asset_id: &str,
        chapter_name: &str,
    ) -> Result<Vec<WorkflowStage>> {
        self.post(
            "/api/report/get_workflow_stage",
            &WorkflowStageRequest {
                asset_id,
                chapter_name,
            },
        )
        .await
    }

    /// Saves one chapter's stage list. Callers renumber stages before the
    /// call; the payload goes out exactly as given.
    pub async fn save_workflow_stages(
        &self,
        asset_id: &str,
        chapter_name: &str,
        stage_settings: &[WorkflowStage],
    ) -> Result<()> {
        self.post_unit(
            "/api/report/save_workflow_stage",
            &SaveWorkflowStageRequest {
                asset_id,
                chapter_name,
                stage_settings,
            },
        )
        .await
    }
}
