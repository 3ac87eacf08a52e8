//! Data model for exports and reconstructed document trees.
//!
//! The serialized shape of [`DocumentTree`] is the contract with the viewer
//! assets: `{ rootId, nodes: { id: { id, content, parentId, children } } }`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level export: a mapping of document name to raw document.
///
/// Key order is preserved so the generated index page lists documents in the
/// order they appear in the export file.
#[derive(Debug, Deserialize)]
pub struct Export {
    #[serde(default)]
    pub state: IndexMap<String, RawDocument>,
}

/// One document as it appears in the export. `nodes` is left as raw JSON
/// because producers disagree on its shape (object keyed by id, or array of
/// records); the normalizer resolves that.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub nodes: Value,
}

/// A node after normalization: uniform fields regardless of input schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalNode {
    pub id: String,
    pub content: String,
    /// Lookup key into the enclosing mapping, not an ownership relation.
    /// Serialized as an explicit `null` for root candidates; the viewer walks
    /// it to reconstruct paths.
    pub parent_id: Option<String>,
    pub children: Vec<String>,
}

impl CanonicalNode {
    pub fn new(id: String, content: String, parent_id: Option<String>) -> Self {
        Self {
            id,
            content,
            parent_id,
            children: Vec::new(),
        }
    }
}

/// Insertion-ordered node mapping. Iteration order is load-bearing: the root
/// tie-break and fallback policies are defined in terms of it.
pub type NodeMap = IndexMap<String, CanonicalNode>;

/// A fully assembled document tree, ready for serialization into a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    /// `None` only when `nodes` is empty.
    pub root_id: Option<String>,
    pub nodes: NodeMap,
}

impl DocumentTree {
    /// Number of nodes, reachable or not (orphans are retained).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
