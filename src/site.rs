//! Site generation: load an export, convert every document, and write the
//! static viewer site (one page per document, shared assets, an index page).
//!
//! Documents are independent, so the convert-and-render stage runs on the
//! rayon pool. Filename assignment happens sequentially beforehand (so the
//! collision suffixes are deterministic) and all writes happen sequentially
//! afterwards, in export order.

use crate::assemble::{assemble, Diagnostic};
use crate::normalize::{normalize, SchemaError};
use crate::render::{render_document, render_index, FilenameAllocator, IndexEntry};
use crate::schema::{DocumentTree, Export};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Fixed assets copied into every generated site.
const STATIC_ASSETS: &[(&str, &str)] = &[
    ("style.css", include_str!("../assets/style.css")),
    ("viewer.js", include_str!("../assets/viewer.js")),
];

/// What a run produced, for logging and tests.
#[derive(Debug)]
pub struct SiteSummary {
    /// Index entries for successfully written documents, in export order.
    pub written: Vec<IndexEntry>,
    /// Documents skipped because their node collection failed normalization.
    pub skipped: usize,
}

/// Convert one document's raw node collection into a tree plus diagnostics.
///
/// This is the whole core pipeline for a single document; `generate` wraps
/// it with I/O and rendering.
pub fn convert_document(
    document: &str,
    raw_nodes: &Value,
) -> Result<(DocumentTree, Vec<Diagnostic>), SchemaError> {
    let nodes = normalize(raw_nodes)?;
    Ok(assemble(document, nodes))
}

struct RenderedPage {
    document: String,
    filename: String,
    node_count: usize,
    html: String,
    diagnostics: Vec<Diagnostic>,
}

/// Generate the full site from an export file into `out_dir`.
///
/// The output directory is wiped and recreated. A document that fails
/// normalization is skipped with an error log; the rest of the run
/// continues.
pub fn generate(input: &Path, out_dir: &Path) -> Result<SiteSummary> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read export file: {}", input.display()))?;
    let export: Export = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse export file: {}", input.display()))?;

    info!("Found {} documents in {}", export.state.len(), input.display());

    if out_dir.exists() {
        fs::remove_dir_all(out_dir)
            .with_context(|| format!("Failed to clear output dir: {}", out_dir.display()))?;
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output dir: {}", out_dir.display()))?;

    for (name, contents) in STATIC_ASSETS {
        fs::write(out_dir.join(name), contents)
            .with_context(|| format!("Failed to write asset: {name}"))?;
    }

    // Filenames first, sequentially: collision suffixes depend on order.
    let mut allocator = FilenameAllocator::new();
    let jobs: Vec<(String, String, &Value)> = export
        .state
        .iter()
        .map(|(document, raw_doc)| {
            (
                document.clone(),
                allocator.allocate(document),
                &raw_doc.nodes,
            )
        })
        .collect();

    let pages: Vec<Result<RenderedPage, (String, anyhow::Error)>> = jobs
        .par_iter()
        .map(|(document, filename, raw_nodes)| {
            let (tree, diagnostics) = convert_document(document, raw_nodes)
                .map_err(|e| (document.clone(), anyhow::Error::new(e)))?;
            let html =
                render_document(document, &tree).map_err(|e| (document.clone(), e))?;
            Ok(RenderedPage {
                document: document.clone(),
                filename: filename.clone(),
                node_count: tree.node_count(),
                html,
                diagnostics,
            })
        })
        .collect();

    let mut written = Vec::new();
    let mut skipped = 0usize;

    for page in pages {
        match page {
            Ok(page) => {
                for diagnostic in &page.diagnostics {
                    warn!("{diagnostic}");
                }
                let path = out_dir.join(&page.filename);
                fs::write(&path, &page.html)
                    .with_context(|| format!("Failed to write page: {}", path.display()))?;
                info!("Generated {} ({} nodes)", page.filename, page.node_count);
                written.push(IndexEntry {
                    filename: page.filename,
                    title: page.document,
                    node_count: page.node_count,
                });
            }
            Err((document, err)) => {
                error!("Skipping document '{document}': {err}");
                skipped += 1;
            }
        }
    }

    let index_html = render_index(&written);
    fs::write(out_dir.join("index.html"), index_html)
        .context("Failed to write index.html")?;

    info!(
        "Site complete: {} pages written, {} skipped",
        written.len(),
        skipped
    );
    Ok(SiteSummary { written, skipped })
}
