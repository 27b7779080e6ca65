//! Report-edit store: the chapter outline with backend-mirrored edits and
//! per-subchapter content.
//!
//! Outline mutations follow a strict two-phase order: submit to the
//! backend, and apply the equivalent local edit only on confirmed
//! success. Local state never diverges from a failed call; the outcome is
//! the [`MutationOutcome`] sum type rather than a thrown error, so callers
//! always see either the applied edit or the backend's reason.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use greenbook_client::ApiClient;
use greenbook_core::report::{BlockContent, Chapter, ImageRef, ReportOutline, SubChapter};
use greenbook_core::{GreenbookError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const DEFAULT_FILE_NAME: &str = "Untitled report";

/// Result of a backend-mirrored outline mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend confirmed the edit and local state was patched.
    Applied,
    /// The edit was not applied anywhere; carries the backend's `detail`
    /// (or the local precondition that failed).
    Rejected(String),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    fn rejected_by(error: GreenbookError) -> Self {
        Self::Rejected(error.user_message())
    }
}

#[derive(Default)]
struct ReportEditState {
    file_name: String,
    asset_id: Option<String>,
    outline: ReportOutline,
    contents: HashMap<String, BlockContent>,
}

pub struct ReportEditStore {
    client: Arc<ApiClient>,
    state: RwLock<ReportEditState>,
}

impl ReportEditStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let state = ReportEditState {
            file_name: DEFAULT_FILE_NAME.to_string(),
            ..ReportEditState::default()
        };
        Self {
            client,
            state: RwLock::new(state),
        }
    }

    // ------------------------------------------------------------------
    // Loading and simple accessors
    // ------------------------------------------------------------------

    /// Full fetch of the report's name and outline.
    pub async fn load(&self, asset_id: &str) -> Result<()> {
        let report = self.client.report_content(asset_id).await?;
        let mut state = self.state.write().await;
        state.asset_id = Some(asset_id.to_string());
        state.file_name = report.asset_name;
        state.outline = ReportOutline::new(report.chapters);
        state.contents.clear();
        Ok(())
    }

    pub async fn set_file_name(&self, name: &str) {
        self.state.write().await.file_name = name.to_string();
    }

    pub async fn file_name(&self) -> String {
        self.state.read().await.file_name.clone()
    }

    pub async fn set_chapters(&self, chapters: Vec<Chapter>) {
        self.state.write().await.outline = ReportOutline::new(chapters);
    }

    pub async fn chapters(&self) -> Vec<Chapter> {
        self.state.read().await.outline.chapters.clone()
    }

    pub async fn chapter_titles(&self) -> Vec<String> {
        self.state.read().await.outline.chapter_titles()
    }

    pub async fn sub_chapters_by_title(&self, chapter_title: &str) -> Vec<SubChapter> {
        self.state
            .read()
            .await
            .outline
            .sub_chapters_by_title(chapter_title)
            .to_vec()
    }

    // ------------------------------------------------------------------
    // Local-only outline edits
    // ------------------------------------------------------------------

    /// Adds a chapter locally; a duplicate title is a silent no-op.
    pub async fn add_chapter(&self, title: &str) -> bool {
        self.state.write().await.outline.add_chapter(title)
    }

    /// Adds a subchapter locally, generating ids when none are supplied.
    pub async fn add_sub_chapter(
        &self,
        chapter_title: &str,
        sub_chapter_title: &str,
        block_id: Option<String>,
        access_permissions: Option<String>,
    ) -> Option<String> {
        self.state.write().await.outline.add_sub_chapter(
            chapter_title,
            sub_chapter_title,
            block_id,
            access_permissions,
        )
    }

    pub async fn remove_chapter(&self, title: &str) -> bool {
        self.state.write().await.outline.remove_chapter(title)
    }

    pub async fn remove_sub_chapter(&self, chapter_title: &str, sub_chapter_title: &str) -> bool {
        self.state
            .write()
            .await
            .outline
            .remove_sub_chapter(chapter_title, sub_chapter_title)
    }

    /// Seeds the sample outline used by a fresh report.
    pub async fn initialize_default_chapters(&self) {
        let mut outline = ReportOutline::default();
        outline.add_chapter("Sustainability strategy");
        outline.add_sub_chapter("Sustainability strategy", "Governance structure", None, None);
        outline.add_chapter("Economic performance");
        outline.add_sub_chapter("Economic performance", "Financial overview", None, None);
        outline.add_sub_chapter("Economic performance", "Revenue overview", None, None);
        self.state.write().await.outline = outline;
    }

    // ------------------------------------------------------------------
    // Backend-mirrored outline edits
    // ------------------------------------------------------------------

    async fn asset_id(&self) -> Option<String> {
        self.state.read().await.asset_id.clone()
    }

    /// Creates a chapter: backend first, local apply only on success.
    pub async fn add_chapter_api(&self, title: &str) -> MutationOutcome {
        let Some(asset_id) = self.asset_id().await else {
            return MutationOutcome::Rejected("no report asset loaded".to_string());
        };
        if self.state.read().await.outline.find_chapter(title).is_some() {
            return MutationOutcome::Rejected(format!("chapter '{title}' already exists"));
        }
        if let Err(error) = self.client.add_chapter(&asset_id, title).await {
            return MutationOutcome::rejected_by(error);
        }
        self.state.write().await.outline.add_chapter(title);
        MutationOutcome::Applied
    }

    /// Creates a subchapter. The backend may assign the block and
    /// permission ids; fresh ones are generated locally otherwise.
    pub async fn add_sub_chapter_api(
        &self,
        chapter_title: &str,
        sub_chapter_title: &str,
    ) -> MutationOutcome {
        let Some(asset_id) = self.asset_id().await else {
            return MutationOutcome::Rejected("no report asset loaded".to_string());
        };
        {
            let state = self.state.read().await;
            let Some(chapter) = state.outline.find_chapter(chapter_title) else {
                return MutationOutcome::Rejected(format!(
                    "chapter '{chapter_title}' does not exist"
                ));
            };
            if chapter.sub_chapters.iter().any(|s| s.title == sub_chapter_title) {
                return MutationOutcome::Rejected(format!(
                    "subchapter '{sub_chapter_title}' already exists"
                ));
            }
        }
        let assigned = match self
            .client
            .add_sub_chapter(&asset_id, chapter_title, sub_chapter_title)
            .await
        {
            Ok(assigned) => assigned,
            Err(error) => return MutationOutcome::rejected_by(error),
        };
        let block_id = assigned
            .block_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let access_permissions = assigned
            .access_permissions
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.state.write().await.outline.add_sub_chapter(
            chapter_title,
            sub_chapter_title,
            Some(block_id),
            Some(access_permissions),
        );
        MutationOutcome::Applied
    }

    pub async fn remove_chapter_api(&self, title: &str) -> MutationOutcome {
        let Some(asset_id) = self.asset_id().await else {
            return MutationOutcome::Rejected("no report asset loaded".to_string());
        };
        if let Err(error) = self.client.remove_chapter(&asset_id, title).await {
            return MutationOutcome::rejected_by(error);
        }
        self.state.write().await.outline.remove_chapter(title);
        MutationOutcome::Applied
    }

    pub async fn remove_sub_chapter_api(
        &self,
        chapter_title: &str,
        sub_chapter_title: &str,
    ) -> MutationOutcome {
        let Some(asset_id) = self.asset_id().await else {
            return MutationOutcome::Rejected("no report asset loaded".to_string());
        };
        if let Err(error) = self
            .client
            .remove_sub_chapter(&asset_id, chapter_title, sub_chapter_title)
            .await
        {
            return MutationOutcome::rejected_by(error);
        }
        self.state
            .write()
            .await
            .outline
            .remove_sub_chapter(chapter_title, sub_chapter_title);
        MutationOutcome::Applied
    }

    pub async fn rename_chapter_api(&self, title: &str, new_title: &str) -> MutationOutcome {
        let Some(asset_id) = self.asset_id().await else {
            return MutationOutcome::Rejected("no report asset loaded".to_string());
        };
        if title != new_title && self.state.read().await.outline.find_chapter(new_title).is_some()
        {
            return MutationOutcome::Rejected(format!("chapter '{new_title}' already exists"));
        }
        if let Err(error) = self.client.rename_chapter(&asset_id, title, new_title).await {
            return MutationOutcome::rejected_by(error);
        }
        self.state.write().await.outline.rename_chapter(title, new_title);
        MutationOutcome::Applied
    }

    pub async fn rename_sub_chapter_api(
        &self,
        chapter_title: &str,
        sub_chapter_title: &str,
        new_title: &str,
    ) -> MutationOutcome {
        let Some(asset_id) = self.asset_id().await else {
            return MutationOutcome::Rejected("no report asset loaded".to_string());
        };
        if let Err(error) = self
            .client
            .rename_sub_chapter(&asset_id, chapter_title, sub_chapter_title, new_title)
            .await
        {
            return MutationOutcome::rejected_by(error);
        }
        self.state
            .write()
            .await
            .outline
            .rename_sub_chapter(chapter_title, sub_chapter_title, new_title);
        MutationOutcome::Applied
    }

    // ------------------------------------------------------------------
    // Block content
    // ------------------------------------------------------------------

    /// Cached content for a block, if any.
    pub async fn get_sub_chapter_content(&self, block_id: &str) -> Option<BlockContent> {
        self.state.read().await.contents.get(block_id).cloned()
    }

    /// Edits a block's cached text.
    pub async fn update_sub_chapter_text(&self, block_id: &str, text: &str) {
        let mut state = self.state.write().await;
        state
            .contents
            .entry(block_id.to_string())
            .or_default()
            .text_content = text.to_string();
    }

    /// Fetches and caches one block's content from the backend.
    pub async fn fetch_sub_chapter_content(&self, block_id: &str) -> Result<BlockContent> {
        let content = self.client.block_content(block_id).await?;
        self.state
            .write()
            .await
            .contents
            .insert(block_id.to_string(), content.clone());
        Ok(content)
    }

    /// Flushes one block's cached content to the backend.
    pub async fn save_sub_chapter_content(&self, block_id: &str) -> Result<()> {
        let content = self
            .get_sub_chapter_content(block_id)
            .await
            .ok_or_else(|| GreenbookError::not_found("block content", block_id))?;
        self.client.save_block_content(block_id, &content).await
    }

    /// Replaces a block's image list. Every inline base64 payload is
    /// uploaded (awaited one by one) and swapped for the hosted URL before
    /// anything is stored; the first failure aborts the whole batch and
    /// leaves the stored list unchanged.
    pub async fn update_sub_chapter_images(
        &self,
        block_id: &str,
        images: Vec<ImageRef>,
    ) -> Result<()> {
        let mut persisted = Vec::with_capacity(images.len());
        for image in images {
            let url = if let Some(payload) = image.url.strip_prefix("data:") {
                let encoded = payload.split_once(',').map(|(_, b)| b).unwrap_or(payload);
                BASE64_STANDARD
                    .decode(encoded)
                    .map_err(|e| GreenbookError::decode(format!("invalid image payload: {e}")))?;
                self.client.upload_image(&image.url, &image.title).await?.url
            } else {
                image.url.clone()
            };
            persisted.push(ImageRef { url, ..image });
        }
        self.state
            .write()
            .await
            .contents
            .entry(block_id.to_string())
            .or_default()
            .images = persisted;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Analysis calls (one-shot, no retry)
    // ------------------------------------------------------------------

    /// Asks the analysis service to draft prose for a subchapter. The
    /// generated text is returned, not applied; the editor decides.
    pub async fn generate_text(
        &self,
        chapter_title: &str,
        sub_chapter_title: &str,
        prompt: &str,
    ) -> Result<String> {
        let generated = self
            .client
            .generate_text(chapter_title, sub_chapter_title, prompt)
            .await?;
        Ok(generated.generated_text)
    }

    /// Submits a chapter's combined title and text for compliance
    /// checking and persists the returned guideline annotations onto the
    /// chapter.
    pub async fn verify_criteria_by_chapter(&self, chapter_title: &str) -> Result<()> {
        let combined = {
            let state = self.state.read().await;
            let Some(chapter) = state.outline.find_chapter(chapter_title) else {
                return Err(GreenbookError::not_found("chapter", chapter_title));
            };
            let mut combined = chapter_title.to_string();
            for sub in &chapter.sub_chapters {
                if let Some(content) = state.contents.get(&sub.block_id)
                    && !content.text_content.is_empty()
                {
                    combined.push('\n');
                    combined.push_str(&content.text_content);
                }
            }
            combined
        };

        let verification = self.client.verify_criteria_by_chapter(&combined).await?;
        if let Some(chapter) = self
            .state
            .write()
            .await
            .outline
            .find_chapter_mut(chapter_title)
        {
            chapter.verification = Some(verification);
        }
        Ok(())
    }
}
