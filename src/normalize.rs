//! Node normalizer: raw, loosely-structured node collections into a uniform
//! id-to-node mapping.
//!
//! Exports disagree on two axes: the collection shape (object keyed by id vs.
//! array of records with their own `id` field) and the content field name
//! (`value` in newer producers, `text` in older ones). Normalization resolves
//! both with a fixed policy and leaves parent resolution to the assembler.

use crate::schema::{CanonicalNode, NodeMap};
use serde_json::Value;
use thiserror::Error;

/// A raw node record that cannot be assigned an identifier. Fatal for the
/// enclosing document; the orchestrator decides whether to skip or abort.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("node record at index {0} has no string `id` field")]
    MissingId(usize),
    #[error("`nodes` must be an object or an array, got {0}")]
    UnsupportedShape(&'static str),
}

/// Normalize one document's raw node collection.
///
/// Accepts an object keyed by node id or an array of records carrying their
/// own `id`; `null` (or an absent collection) yields an empty mapping. Pure
/// and deterministic: insertion order of the result follows input order, and
/// a duplicate id in array form keeps its first position with the last
/// record's fields.
pub fn normalize(raw_nodes: &Value) -> Result<NodeMap, SchemaError> {
    match raw_nodes {
        Value::Null => Ok(NodeMap::new()),
        Value::Object(entries) => {
            let mut nodes = NodeMap::with_capacity(entries.len());
            for (id, record) in entries {
                nodes.insert(id.clone(), canonical_node(id, record));
            }
            Ok(nodes)
        }
        Value::Array(records) => {
            let mut nodes = NodeMap::with_capacity(records.len());
            for (index, record) in records.iter().enumerate() {
                let id = record
                    .get("id")
                    .and_then(Value::as_str)
                    .ok_or(SchemaError::MissingId(index))?;
                nodes.insert(id.to_string(), canonical_node(id, record));
            }
            Ok(nodes)
        }
        Value::Bool(_) => Err(SchemaError::UnsupportedShape("a boolean")),
        Value::Number(_) => Err(SchemaError::UnsupportedShape("a number")),
        Value::String(_) => Err(SchemaError::UnsupportedShape("a string")),
    }
}

/// Build a canonical node from one raw record. Tolerates records that are not
/// objects (field lookups simply miss) so a malformed entry degrades to an
/// empty node instead of failing the document.
fn canonical_node(id: &str, record: &Value) -> CanonicalNode {
    let content = resolve_content(record);
    let parent_id = record
        .get("parentId")
        .and_then(Value::as_str)
        .map(str::to_string);
    CanonicalNode::new(id.to_string(), content, parent_id)
}

/// Fixed content policy: a non-empty string `value` wins, otherwise `text`,
/// otherwise empty. An empty `value` falls through to `text` because older
/// producers wrote placeholder empties alongside the real `text` field.
fn resolve_content(record: &Value) -> String {
    record
        .get("value")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| record.get("text").and_then(Value::as_str))
        .unwrap_or("")
        .to_string()
}
