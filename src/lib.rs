//! Branchview - static HTML viewer generator for branching-document JSON exports.
//!
//! An export is a `state` mapping of named documents, each holding a flat node
//! collection with parent pointers. The core reconstructs each collection into
//! a rooted tree ([`normalize`] then [`assemble`]); [`site`] renders one HTML
//! page per document plus an index page.

pub mod assemble;
pub mod normalize;
pub mod render;
pub mod schema;
pub mod site;
