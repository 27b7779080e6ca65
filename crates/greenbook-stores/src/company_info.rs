//! Company-info store: the section forest of a company-data asset with
//! lazy per-section content fetch/save and locking flags.
//!
//! The selection protocol is deliberately lossy on navigation: when the
//! previous section holds unsaved content, it is flushed fire-and-forget
//! before the selection moves, and a failed flush is logged but never
//! blocks or surfaces. Whether that silent loss is intended product
//! behavior is an open product question; the store preserves it.

use greenbook_client::ApiClient;
use greenbook_core::notify::{Notifier, Toast};
use greenbook_core::outline::{SectionForest, SectionNode};
use greenbook_core::report::BlockContent;
use greenbook_core::{GreenbookError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// One industry entry of the built-in template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Industry {
    pub name: &'static str,
    pub template_url: &'static str,
}

/// Industry → company-data template mapping used when creating an asset.
pub const INDUSTRIES: &[Industry] = &[
    Industry {
        name: "finance",
        template_url: "https://templates.greenbook.example.com/company-data/finance.json",
    },
    Industry {
        name: "technology",
        template_url: "https://templates.greenbook.example.com/company-data/technology.json",
    },
    Industry {
        name: "manufacturing",
        template_url: "https://templates.greenbook.example.com/company-data/manufacturing.json",
    },
    Industry {
        name: "services",
        template_url: "https://templates.greenbook.example.com/company-data/services.json",
    },
    Industry {
        name: "retail",
        template_url: "https://templates.greenbook.example.com/company-data/retail.json",
    },
];

#[derive(Default)]
struct CompanyInfoState {
    organization_id: Option<String>,
    asset_id: Option<String>,
    forest: SectionForest,
    /// Cached block contents keyed by block id, with a dirty marker.
    contents: HashMap<String, CachedContent>,
    selected_section: Option<String>,
    loading: bool,
    error: Option<String>,
    is_locked: bool,
    locked_by: Option<String>,
}

#[derive(Default, Clone)]
struct CachedContent {
    content: BlockContent,
    dirty: bool,
}

pub struct CompanyInfoStore {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<CompanyInfoState>,
}

impl CompanyInfoStore {
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            state: RwLock::new(CompanyInfoState::default()),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn lock_state(&self) -> (bool, Option<String>) {
        let state = self.state.read().await;
        (state.is_locked, state.locked_by.clone())
    }

    pub async fn selected_section(&self) -> Option<String> {
        self.state.read().await.selected_section.clone()
    }

    /// Full-asset fetch replacing the forest and lock flags.
    pub async fn fetch_asset_content(&self, organization_id: &str, asset_id: &str) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }
        let fetched = self.client.asset_content(organization_id, asset_id).await;
        let mut state = self.state.write().await;
        state.loading = false;
        match fetched {
            Ok(asset) => {
                state.organization_id = Some(organization_id.to_string());
                state.asset_id = Some(asset_id.to_string());
                state.forest = asset.sections;
                state.is_locked = asset.is_locked;
                state.locked_by = asset.locked_by;
                state.contents.clear();
                state.selected_section = None;
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.user_message());
                Err(error)
            }
        }
    }

    /// DFS lookup by id over the current forest.
    pub async fn find_section_by_id(&self, id: &str) -> Option<SectionNode> {
        self.state.read().await.forest.find_section_by_id(id).cloned()
    }

    /// Ancestor chain (root first, match last) as owned nodes.
    pub async fn find_section_and_path(&self, id: &str) -> Option<Vec<SectionNode>> {
        self.state
            .read()
            .await
            .forest
            .find_section_and_path(id)
            .map(|path| path.into_iter().cloned().collect())
    }

    pub async fn is_leaf_section(&self, id: &str) -> bool {
        self.state.read().await.forest.is_leaf_section(id)
    }

    /// Moves the selection. Re-selecting the current section is a no-op.
    ///
    /// Any unsaved content of the previous selection is flushed
    /// fire-and-forget before the move; the flush failing never blocks
    /// navigation. The new section's content is then fetched on first
    /// selection when it owns a block; a failed fetch surfaces one toast
    /// and records the error state, but the selection still moves.
    pub async fn select_section(&self, id: &str) -> Result<()> {
        let to_fetch = {
            let mut state = self.state.write().await;
            if state.selected_section.as_deref() == Some(id) {
                return Ok(());
            }

            // Flush the previous section's unsaved content in the background.
            if let Some(previous) = state.selected_section.clone()
                && let Some(block_id) = state
                    .forest
                    .find_section_by_id(&previous)
                    .and_then(|node| node.block_id.clone())
                && let Some(cached) = state.contents.get_mut(&block_id)
                && cached.dirty
            {
                cached.dirty = false;
                let content = cached.content.clone();
                let client = self.client.clone();
                tokio::spawn(async move {
                    if let Err(error) = client.save_block_content(&block_id, &content).await {
                        warn!(%block_id, %error, "background content flush failed");
                    }
                });
            }

            let Some(node) = state.forest.find_section_by_id(id) else {
                return Err(GreenbookError::not_found("section", id));
            };
            let block_id = node.block_id.clone();
            state.selected_section = Some(id.to_string());
            block_id.filter(|block_id| !state.contents.contains_key(block_id))
        };

        if let Some(block_id) = to_fetch {
            match self.client.block_content(&block_id).await {
                Ok(content) => {
                    let mut state = self.state.write().await;
                    state.contents.insert(
                        block_id,
                        CachedContent {
                            content,
                            dirty: false,
                        },
                    );
                    state.error = None;
                }
                Err(error) => {
                    let message = error.user_message();
                    self.state.write().await.error = Some(message.clone());
                    self.notifier.notify(Toast::error(message));
                }
            }
        }
        Ok(())
    }

    /// Cached content for a block, if fetched.
    pub async fn section_content(&self, block_id: &str) -> Option<BlockContent> {
        self.state
            .read()
            .await
            .contents
            .get(block_id)
            .map(|cached| cached.content.clone())
    }

    /// Edits a block's cached text, marking it dirty for the next flush.
    pub async fn update_section_text(&self, block_id: &str, text: &str) {
        let mut state = self.state.write().await;
        let cached = state.contents.entry(block_id.to_string()).or_default();
        cached.content.text_content = text.to_string();
        cached.dirty = true;
    }

    /// Explicit flush of one block's cached content.
    pub async fn save_section_content(&self, block_id: &str) -> Result<()> {
        let content = {
            let state = self.state.read().await;
            match state.contents.get(block_id) {
                Some(cached) => cached.content.clone(),
                None => return Err(GreenbookError::not_found("block content", block_id)),
            }
        };
        self.client.save_block_content(block_id, &content).await?;
        if let Some(cached) = self.state.write().await.contents.get_mut(block_id) {
            cached.dirty = false;
        }
        Ok(())
    }

    /// Creates a company-data asset from the industry template table.
    pub async fn create_company_table(
        &self,
        company_name: &str,
        creator_id: &str,
        organization_id: &str,
        industry: &str,
    ) -> Result<()> {
        let Some(entry) = INDUSTRIES.iter().find(|i| i.name == industry) else {
            return Err(GreenbookError::not_found("industry template", industry));
        };
        self.client
            .create_company_table(company_name, creator_id, organization_id, entry.template_url)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn industry_table_covers_known_sectors() {
        assert!(INDUSTRIES.iter().any(|i| i.name == "finance"));
        assert!(INDUSTRIES.iter().all(|i| i.template_url.ends_with(".json")));
    }
}
