//! Report outline: chapters, subchapters, and per-block content.
//!
//! A report asset is a two-level outline. Each subchapter owns one content
//! block (text plus image references) addressed by its block id. The pure
//! outline edits live here; mirroring them to the backend is the store's
//! job.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A top-level chapter with its subchapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "chapterTitle")]
    pub title: String,
    #[serde(rename = "subChapters", default)]
    pub sub_chapters: Vec<SubChapter>,
    /// Guideline annotations from the last criteria verification run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationResult>,
}

impl Chapter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sub_chapters: Vec::new(),
            verification: None,
        }
    }
}

/// A subchapter; the smallest outline unit, owning one content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubChapter {
    #[serde(rename = "subChapterTitle")]
    pub title: String,
    #[serde(rename = "BlockID")]
    pub block_id: String,
    pub access_permissions: String,
}

/// Content payload of one block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockContent {
    #[serde(default)]
    pub text_content: String,
    #[serde(rename = "imageRefs", default)]
    pub images: Vec<ImageRef>,
}

/// One image reference inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

/// Result of automated compliance checking of a chapter against the
/// reporting criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "GRI_Indicators", default)]
    pub indicators: Vec<GriIndicator>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One guideline annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GriIndicator {
    pub indicator: String,
    #[serde(default)]
    pub description: String,
}

/// The chapter outline with its pure (local-only) edit operations. Every
/// mutation is title-keyed and deduplicating: an edit that would produce a
/// duplicate title reports failure and leaves the outline untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportOutline {
    pub chapters: Vec<Chapter>,
}

impl ReportOutline {
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    pub fn chapter_titles(&self) -> Vec<String> {
        self.chapters.iter().map(|c| c.title.clone()).collect()
    }

    pub fn find_chapter(&self, title: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.title == title)
    }

    pub fn find_chapter_mut(&mut self, title: &str) -> Option<&mut Chapter> {
        self.chapters.iter_mut().find(|c| c.title == title)
    }

    /// Subchapters of the named chapter; empty when the chapter is absent.
    pub fn sub_chapters_by_title(&self, title: &str) -> &[SubChapter] {
        self.find_chapter(title)
            .map(|c| c.sub_chapters.as_slice())
            .unwrap_or(&[])
    }

    /// Adds a chapter; returns false when a chapter with the same title
    /// already exists.
    pub fn add_chapter(&mut self, title: &str) -> bool {
        if self.find_chapter(title).is_some() {
            return false;
        }
        self.chapters.push(Chapter::new(title));
        true
    }

    /// Adds a subchapter under `chapter_title`, generating fresh ids when
    /// the caller (i.e. the backend) did not supply them. Returns the
    /// subchapter's block id, or `None` when the chapter is missing or a
    /// same-titled subchapter already exists.
    pub fn add_sub_chapter(
        &mut self,
        chapter_title: &str,
        sub_chapter_title: &str,
        block_id: Option<String>,
        access_permissions: Option<String>,
    ) -> Option<String> {
        let chapter = self.find_chapter_mut(chapter_title)?;
        if chapter
            .sub_chapters
            .iter()
            .any(|s| s.title == sub_chapter_title)
        {
            return None;
        }
        let block_id = block_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        chapter.sub_chapters.push(SubChapter {
            title: sub_chapter_title.to_string(),
            block_id: block_id.clone(),
            access_permissions: access_permissions
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        });
        Some(block_id)
    }

    /// Removes a chapter and all its subchapters. Returns false when no
    /// such chapter exists.
    pub fn remove_chapter(&mut self, title: &str) -> bool {
        let before = self.chapters.len();
        self.chapters.retain(|c| c.title != title);
        self.chapters.len() != before
    }

    /// Removes one subchapter. Returns false when chapter or subchapter is
    /// missing.
    pub fn remove_sub_chapter(&mut self, chapter_title: &str, sub_chapter_title: &str) -> bool {
        let Some(chapter) = self.find_chapter_mut(chapter_title) else {
            return false;
        };
        let before = chapter.sub_chapters.len();
        chapter.sub_chapters.retain(|s| s.title != sub_chapter_title);
        chapter.sub_chapters.len() != before
    }

    /// Renames a chapter. Fails when the source is missing or the target
    /// title is already taken.
    pub fn rename_chapter(&mut self, old_title: &str, new_title: &str) -> bool {
        if old_title != new_title && self.find_chapter(new_title).is_some() {
            return false;
        }
        match self.find_chapter_mut(old_title) {
            Some(chapter) => {
                chapter.title = new_title.to_string();
                true
            }
            None => false,
        }
    }

    /// Renames a subchapter within its chapter, with the same dedup rule.
    pub fn rename_sub_chapter(
        &mut self,
        chapter_title: &str,
        old_title: &str,
        new_title: &str,
    ) -> bool {
        let Some(chapter) = self.find_chapter_mut(chapter_title) else {
            return false;
        };
        if old_title != new_title
            && chapter.sub_chapters.iter().any(|s| s.title == new_title)
        {
            return false;
        }
        match chapter.sub_chapters.iter_mut().find(|s| s.title == old_title) {
            Some(sub) => {
                sub.title = new_title.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_chapter_deduplicates_by_title() {
        let mut outline = ReportOutline::default();
        assert!(outline.add_chapter("A"));
        assert!(!outline.add_chapter("A"));
        assert_eq!(outline.chapter_titles(), vec!["A"]);
    }

    #[test]
    fn add_sub_chapter_generates_ids_and_deduplicates() {
        let mut outline = ReportOutline::default();
        outline.add_chapter("A");

        let block_id = outline.add_sub_chapter("A", "A.1", None, None).unwrap();
        assert!(!block_id.is_empty());
        assert!(outline.add_sub_chapter("A", "A.1", None, None).is_none());
        assert!(outline.add_sub_chapter("missing", "A.1", None, None).is_none());

        let provided = outline
            .add_sub_chapter("A", "A.2", Some("blk-2".into()), Some("perm-2".into()))
            .unwrap();
        assert_eq!(provided, "blk-2");
        let subs = outline.sub_chapters_by_title("A");
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].access_permissions, "perm-2");
    }

    #[test]
    fn remove_operations_report_whether_anything_changed() {
        let mut outline = ReportOutline::default();
        outline.add_chapter("A");
        outline.add_sub_chapter("A", "A.1", None, None);

        assert!(outline.remove_sub_chapter("A", "A.1"));
        assert!(!outline.remove_sub_chapter("A", "A.1"));
        assert!(outline.remove_chapter("A"));
        assert!(!outline.remove_chapter("A"));
    }

    #[test]
    fn rename_refuses_title_collisions() {
        let mut outline = ReportOutline::default();
        outline.add_chapter("A");
        outline.add_chapter("B");
        assert!(!outline.rename_chapter("A", "B"));
        assert!(outline.rename_chapter("A", "C"));
        assert_eq!(outline.chapter_titles(), vec!["C", "B"]);

        outline.add_sub_chapter("C", "C.1", None, None);
        outline.add_sub_chapter("C", "C.2", None, None);
        assert!(!outline.rename_sub_chapter("C", "C.1", "C.2"));
        assert!(outline.rename_sub_chapter("C", "C.1", "C.3"));
        // Renaming to the same title is a no-op success.
        assert!(outline.rename_sub_chapter("C", "C.3", "C.3"));
    }
}
