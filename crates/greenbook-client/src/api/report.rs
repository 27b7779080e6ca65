//! Report asset endpoints: outline mutations, block content, image upload,
//! and the analysis-side generation/verification calls.

use crate::client::ApiClient;
use greenbook_core::Result;
use greenbook_core::report::{BlockContent, Chapter, VerificationResult};
use serde::{Deserialize, Serialize};

/// A report asset's name and outline.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportContent {
    #[serde(rename = "assetName")]
    pub asset_name: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Ids the backend may assign to a newly created subchapter. When absent,
/// the client generates its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignedIds {
    #[serde(rename = "BlockID", default)]
    pub block_id: Option<String>,
    #[serde(default)]
    pub access_permissions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    #[serde(rename = "generatedText")]
    pub generated_text: String,
}

#[derive(Debug, Serialize)]
struct AssetIdRequest<'a> {
    #[serde(rename = "AssetID")]
    asset_id: &'a str,
}

#[derive(Debug, Serialize)]
struct ChapterRequest<'a> {
    #[serde(rename = "AssetID")]
    asset_id: &'a str,
    #[serde(rename = "chapterTitle")]
    chapter_title: &'a str,
}

#[derive(Debug, Serialize)]
struct SubChapterRequest<'a> {
    #[serde(rename = "AssetID")]
    asset_id: &'a str,
    #[serde(rename = "chapterTitle")]
    chapter_title: &'a str,
    #[serde(rename = "subChapterTitle")]
    sub_chapter_title: &'a str,
}

#[derive(Debug, Serialize)]
struct RenameChapterRequest<'a> {
    #[serde(rename = "AssetID")]
    asset_id: &'a str,
    #[serde(rename = "chapterTitle")]
    chapter_title: &'a str,
    #[serde(rename = "newChapterTitle")]
    new_chapter_title: &'a str,
}

#[derive(Debug, Serialize)]
struct RenameSubChapterRequest<'a> {
    #[serde(rename = "AssetID")]
    asset_id: &'a str,
    #[serde(rename = "chapterTitle")]
    chapter_title: &'a str,
    #[serde(rename = "subChapterTitle")]
    sub_chapter_title: &'a str,
    #[serde(rename = "newSubChapterTitle")]
    new_sub_chapter_title: &'a str,
}

#[derive(Debug, Serialize)]
struct BlockIdRequest<'a> {
    #[serde(rename = "BlockID")]
    block_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SaveBlockRequest<'a> {
    #[serde(rename = "BlockID")]
    block_id: &'a str,
    content: &'a BlockContent,
}

#[derive(Debug, Serialize)]
struct UploadImageRequest<'a> {
    /// Inline base64 payload, including the `data:` prefix when present.
    data: &'a str,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateTextRequest<'a> {
    #[serde(rename = "chapterTitle")]
    chapter_title: &'a str,
    #[serde(rename = "subChapterTitle")]
    sub_chapter_title: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyChapterRequest<'a> {
    #[serde(rename = "chapterTitle_text_content")]
    chapter_title_text_content: &'a str,
}

impl ApiClient {
    /// Full fetch of a report asset's name and chapter outline.
    pub async fn report_content(&self, asset_id: &str) -> Result<ReportContent> {
        self.post("/api/report/get_report_content", &AssetIdRequest { asset_id })
            .await
    }

    /// Chapter title list, as used by the workflow designer.
    pub async fn report_chapters(&self, asset_id: &str) -> Result<Vec<String>> {
        self.post("/api/report/get_report_chapters", &AssetIdRequest { asset_id })
            .await
    }

    pub async fn add_chapter(&self, asset_id: &str, chapter_title: &str) -> Result<()> {
        self.post_unit(
            "/api/report/add_chapter",
            &ChapterRequest {
                asset_id,
                chapter_title,
            },
        )
        .await
    }

    pub async fn remove_chapter(&self, asset_id: &str, chapter_title: &str) -> Result<()> {
        self.post_unit(
            "/api/report/remove_chapter",
            &ChapterRequest {
                asset_id,
                chapter_title,
            },
        )
        .await
    }

    pub async fn rename_chapter(
        &self,
        asset_id: &str,
        chapter_title: &str,
        new_chapter_title: &str,
    ) -> Result<()> {
        self.post_unit(
            "/api/report/rename_chapter",
            &RenameChapterRequest {
                asset_id,
                chapter_title,
                new_chapter_title,
            },
        )
        .await
    }

    /// Creates a subchapter; the backend may hand back the ids it
    /// assigned.
    pub async fn add_sub_chapter(
        &self,
        asset_id: &str,
        chapter_title: &str,
        sub_chapter_title: &str,
    ) -> Result<AssignedIds> {
        self.post(
            "/api/report/add_subchapter",
            &SubChapterRequest {
                asset_id,
                chapter_title,
                sub_chapter_title,
            },
        )
        .await
    }

    pub async fn remove_sub_chapter(
        &self,
        asset_id: &str,
        chapter_title: &str,
        sub_chapter_title: &str,
    ) -> Result<()> {
        self.post_unit(
            "/api/report/remove_subchapter",
            &SubChapterRequest {
                asset_id,
                chapter_title,
                sub_chapter_title,
            },
        )
        .await
    }

    pub async fn rename_sub_chapter(
        &self,
        asset_id: &str,
        chapter_title: &str,
        sub_chapter_title: &str,
        new_sub_chapter_title: &str,
    ) -> Result<()> {
        self.post_unit(
            "/api/report/rename_subchapter",
            &RenameSubChapterRequest {
                asset_id,
                chapter_title,
                sub_chapter_title,
                new_sub_chapter_title,
            },
        )
        .await
    }

    /// Lazily fetches one block's content payload.
    pub async fn block_content(&self, block_id: &str) -> Result<BlockContent> {
        self.post("/api/report/get_block_content", &BlockIdRequest { block_id })
            .await
    }

    /// Flushes one block's content payload.
    pub async fn save_block_content(&self, block_id: &str, content: &BlockContent) -> Result<()> {
        self.post_unit(
            "/api/report/save_block_content",
            &SaveBlockRequest { block_id, content },
        )
        .await
    }

    /// Uploads one inline base64 image, returning its hosted URL.
    pub async fn upload_image(&self, data: &str, title: &str) -> Result<UploadedImage> {
        self.post("/api/report/upload_image", &UploadImageRequest { data, title })
            .await
    }

    /// Prompts the analysis service to draft subchapter prose.
    pub async fn generate_text(
        &self,
        chapter_title: &str,
        sub_chapter_title: &str,
        prompt: &str,
    ) -> Result<GeneratedText> {
        self.post_analysis(
            "/api/report/ai_generate_text",
            &GenerateTextRequest {
                chapter_title,
                sub_chapter_title,
                prompt,
            },
        )
        .await
    }

    /// Submits a chapter's combined title and text for compliance checking
    /// against the reporting criteria.
    pub async fn verify_criteria_by_chapter(
        &self,
        chapter_title_text_content: &str,
    ) -> Result<VerificationResult> {
        self.post_analysis(
            "/api/report/gri_verification_criteria_by_chapter",
            &VerifyChapterRequest {
                chapter_title_text_content,
            },
        )
        .await
    }
}
