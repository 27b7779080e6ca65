//! Criteria-template store: the selected set of reporting criteria and
//! its wholesale sync with the backend.

use greenbook_client::ApiClient;
use greenbook_client::api::assets::CriteriaTemplate;
use greenbook_core::criteria::{Criterion, criteria_by_domain};
use greenbook_core::notify::{Notifier, Toast};
use greenbook_core::{GreenbookError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const DEFAULT_FILE_NAME: &str = "Untitled template";

#[derive(Default)]
struct CriteriaState {
    block_id: String,
    asset_id: String,
    organization_id: String,
    role_ids: Vec<String>,
    selected_criteria: Vec<Criterion>,
    file_name: String,
    loading: bool,
    last_modified: Option<String>,
    modified_by: Option<String>,
    is_locked: bool,
    locked_by: Option<String>,
    locked_at: Option<String>,
    block_status: Option<String>,
}

pub struct CriteriaTemplateStore {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<CriteriaState>,
}

impl CriteriaTemplateStore {
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        let state = CriteriaState {
            file_name: DEFAULT_FILE_NAME.to_string(),
            ..CriteriaState::default()
        };
        Self {
            client,
            notifier,
            state: RwLock::new(state),
        }
    }

    pub async fn set_block_id(&self, id: &str) {
        self.state.write().await.block_id = id.to_string();
    }

    pub async fn set_asset_id(&self, id: &str) {
        self.state.write().await.asset_id = id.to_string();
    }

    pub async fn set_organization_id(&self, id: &str) {
        self.state.write().await.organization_id = id.to_string();
    }

    pub async fn set_role_ids(&self, ids: Vec<String>) {
        self.state.write().await.role_ids = ids;
    }

    pub async fn set_file_name(&self, name: &str) {
        self.state.write().await.file_name = name.to_string();
    }

    pub async fn file_name(&self) -> String {
        self.state.read().await.file_name.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn last_modified(&self) -> Option<String> {
        self.state.read().await.last_modified.clone()
    }

    pub async fn selected_criteria(&self) -> Vec<Criterion> {
        self.state.read().await.selected_criteria.clone()
    }

    pub async fn selected_count(&self) -> usize {
        self.state.read().await.selected_criteria.len()
    }

    /// Selection grouped by domain.
    pub async fn criteria_by_domain(&self) -> BTreeMap<String, Vec<Criterion>> {
        let state = self.state.read().await;
        criteria_by_domain(&state.selected_criteria)
            .into_iter()
            .map(|(domain, group)| (domain, group.into_iter().cloned().collect()))
            .collect()
    }

    /// Adds one criterion. The selection stays duplicate-free by
    /// `gri_id`; adding an already-selected criterion is a no-op.
    pub async fn add_criterion(&self, criterion: Criterion) -> bool {
        let mut state = self.state.write().await;
        if state
            .selected_criteria
            .iter()
            .any(|c| c.gri_id == criterion.gri_id)
        {
            return false;
        }
        state.selected_criteria.push(criterion);
        true
    }

    pub async fn remove_criterion(&self, gri_id: &str) {
        self.state
            .write()
            .await
            .selected_criteria
            .retain(|c| c.gri_id != gri_id);
    }

    pub async fn clear_selected_criteria(&self) {
        self.state.write().await.selected_criteria.clear();
    }

    pub async fn is_criterion_selected(&self, gri_id: &str) -> bool {
        self.state
            .read()
            .await
            .selected_criteria
            .iter()
            .any(|c| c.gri_id == gri_id)
    }

    /// Replaces the whole selection.
    pub async fn set_selected_criteria(&self, criteria: Vec<Criterion>) {
        self.state.write().await.selected_criteria = criteria;
    }

    /// Fetches the template. Fails fast, with exactly one error toast and
    /// no network call, when asset id, organization id, or role ids are
    /// missing. Any later failure also toasts and is re-thrown.
    pub async fn fetch_criteria_template(&self) -> Result<CriteriaTemplate> {
        let request = {
            let mut state = self.state.write().await;
            if state.asset_id.is_empty()
                || state.organization_id.is_empty()
                || state.role_ids.is_empty()
            {
                let error = GreenbookError::missing_params("missing required parameters");
                self.notifier.notify(Toast::error(error.user_message()));
                return Err(error);
            }
            state.loading = true;
            (
                state.asset_id.clone(),
                state.organization_id.clone(),
                state.role_ids.clone(),
            )
        };

        let fetched = self
            .client
            .standard_template(&request.0, &request.1, &request.2)
            .await;

        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok(template) => {
                state.file_name = template.asset_name.clone();
                state.selected_criteria = template.content.selected_criteria.clone();
                state.last_modified = template.last_modified.clone();
                state.modified_by = template.modified_by.clone();
                state.is_locked = template.is_locked;
                state.locked_by = template.locked_by.clone();
                state.locked_at = template.locked_at.clone();
                state.block_status = template.block_status.clone();
                Ok(template)
            }
            Err(error) => {
                self.notifier.notify(Toast::error(error.user_message()));
                Err(error)
            }
        }
    }

    /// Posts the full selection. On success only the last-modified
    /// timestamp is reconciled locally.
    pub async fn save_criteria_template(&self) -> Result<()> {
        let (asset_id, organization_id, block_id, file_name, selection) = {
            let state = self.state.read().await;
            (
                state.asset_id.clone(),
                state.organization_id.clone(),
                state.block_id.clone(),
                state.file_name.clone(),
                state.selected_criteria.clone(),
            )
        };

        match self
            .client
            .save_standard_template(&asset_id, &organization_id, &block_id, &file_name, &selection)
            .await
        {
            Ok(saved) => {
                self.state.write().await.last_modified = saved.last_modified;
                Ok(())
            }
            Err(error) => {
                self.notifier.notify(Toast::error(error.user_message()));
                Err(error)
            }
        }
    }
}
