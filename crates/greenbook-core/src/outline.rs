//! Section outline tree for company-data assets.
//!
//! An asset's content is an ordered forest of sections. The backend hands
//! the whole forest over in one fetch; the client only ever walks it.
//! Trees are expected to be exactly three levels deep (root section →
//! chapter → leaf subchapter); leaf detection is defined in those terms.

use serde::{Deserialize, Serialize};

/// One node in the section forest. Nodes carrying a `block_id` own a
/// lazily-fetched content payload keyed by that id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub children: Vec<SectionNode>,
    #[serde(rename = "BlockID", default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_permissions: Option<String>,
}

impl SectionNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            children: Vec::new(),
            block_id: None,
            access_permissions: None,
        }
    }

    pub fn with_block(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SectionNode>) -> Self {
        self.children = children;
        self
    }
}

/// Ordered forest of sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionForest {
    pub roots: Vec<SectionNode>,
}

impl SectionForest {
    pub fn new(roots: Vec<SectionNode>) -> Self {
        Self { roots }
    }

    /// Depth-first search by id.
    pub fn find_section_by_id(&self, id: &str) -> Option<&SectionNode> {
        self.find_section_and_path(id).map(|path| {
            *path.last().expect("path is never empty")
        })
    }

    /// Depth-first search returning the ancestor chain, root first, with
    /// the matching node as the last element.
    pub fn find_section_and_path(&self, id: &str) -> Option<Vec<&SectionNode>> {
        fn walk<'a>(
            node: &'a SectionNode,
            id: &str,
            path: &mut Vec<&'a SectionNode>,
        ) -> bool {
            path.push(node);
            if node.id == id {
                return true;
            }
            for child in &node.children {
                if walk(child, id, path) {
                    return true;
                }
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        for root in &self.roots {
            if walk(root, id, &mut path) {
                return Some(path);
            }
        }
        None
    }

    /// True only for nodes at depth exactly three whose parent and
    /// grandparent both have children. Shallower or deeper nodes are never
    /// leaves, whatever their own shape.
    pub fn is_leaf_section(&self, id: &str) -> bool {
        match self.find_section_and_path(id) {
            Some(path) => {
                path.len() == 3
                    && !path[0].children.is_empty()
                    && !path[1].children.is_empty()
            }
            None => false,
        }
    }
}
