//! Tree assembler: links normalized nodes into their parents' children lists
//! and selects the root, with deterministic recovery when the input is
//! ambiguous or has no explicit root.
//!
//! The policies here are fixed and reproducible: with multiple root
//! candidates the *last* one in iteration order wins, and with none the
//! *first* node becomes the root. Both cases surface a [`Diagnostic`] so
//! callers (and tests) can observe the recovery instead of reading log
//! output.

use crate::schema::{DocumentTree, NodeMap};
use std::fmt;

/// A non-fatal condition observed while assembling one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// More than one node had no parent; all but the winner were discarded.
    AmbiguousRoot {
        document: String,
        discarded: Vec<String>,
        winner: String,
    },
    /// Every node had a parent pointer (external reference or cycle); the
    /// first node was chosen as root. Nodes unreachable from it remain in
    /// the mapping as orphans.
    NoRoot { document: String, fallback: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousRoot {
                document,
                discarded,
                winner,
            } => write!(
                f,
                "multiple roots in '{}': discarded [{}], kept '{}'",
                document,
                discarded.join(", "),
                winner
            ),
            Diagnostic::NoRoot { document, fallback } => write!(
                f,
                "no explicit root in '{}': falling back to first node '{}'",
                document, fallback
            ),
        }
    }
}

/// Link each node into its parent's `children` list and select the root.
///
/// One pass in mapping iteration order: a node whose `parent_id` resolves
/// within the mapping is appended to that parent's children (so sibling order
/// is link order); a node with no `parent_id` is a root candidate. A
/// dangling parent id is neither — the node simply becomes an orphan.
///
/// Never fails: an empty mapping yields `root_id: None`, and the ambiguous
/// and missing root cases are recovered per the policies above. Orphans are
/// intentionally retained in `nodes`.
pub fn assemble(document: &str, mut nodes: NodeMap) -> (DocumentTree, Vec<Diagnostic>) {
    let ids: Vec<String> = nodes.keys().cloned().collect();

    let mut root_id: Option<String> = None;
    let mut discarded: Vec<String> = Vec::new();

    for id in &ids {
        match nodes[id].parent_id.clone() {
            Some(parent_id) => {
                if let Some(parent) = nodes.get_mut(&parent_id) {
                    parent.children.push(id.clone());
                }
            }
            None => {
                if let Some(previous) = root_id.replace(id.clone()) {
                    discarded.push(previous);
                }
            }
        }
    }

    let mut diagnostics = Vec::new();
    if let Some(winner) = root_id.clone() {
        if !discarded.is_empty() {
            diagnostics.push(Diagnostic::AmbiguousRoot {
                document: document.to_string(),
                discarded,
                winner,
            });
        }
    } else if let Some(first) = ids.first() {
        diagnostics.push(Diagnostic::NoRoot {
            document: document.to_string(),
            fallback: first.clone(),
        });
        root_id = Some(first.clone());
    }

    (DocumentTree { root_id, nodes }, diagnostics)
}
