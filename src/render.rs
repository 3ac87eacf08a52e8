//! Page rendering: HTML escaping, output filename assignment, and template
//! slot filling for the per-document viewer pages and the index page.

use crate::schema::DocumentTree;
use anyhow::Result;
use std::collections::HashSet;

const DOC_TEMPLATE: &str = include_str!("../assets/template.html");
const INDEX_TEMPLATE: &str = include_str!("../assets/index_template.html");

/// One line of the index page, in export order.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub filename: String,
    pub title: String,
    pub node_count: usize,
}

/// Escape text for embedding in HTML (same set as `html.escape`: `&`, `<`,
/// `>`, `"`, `'`).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip a document name down to filename-safe characters: alphanumerics,
/// space, hyphen, underscore, period. Surrounding whitespace is trimmed.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Assigns collision-free output filenames. Two documents sanitizing to the
/// same name get `-2`, `-3`, ... suffixes; the fixed site artifacts are
/// reserved up front so a document named "index" cannot clobber the index
/// page.
#[derive(Debug)]
pub struct FilenameAllocator {
    used: HashSet<String>,
}

impl FilenameAllocator {
    pub fn new() -> Self {
        let used = ["index.html", "style.css", "viewer.js"]
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { used }
    }

    /// Derive a unique `.html` filename for a document name.
    pub fn allocate(&mut self, document: &str) -> String {
        let mut base = sanitize_name(document);
        if base.is_empty() {
            base = "untitled".to_string();
        }
        let mut candidate = format!("{base}.html");
        let mut suffix = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{base}-{suffix}.html");
            suffix += 1;
        }
        candidate
    }
}

impl Default for FilenameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one document page: escaped title plus the serialized tree embedded
/// as a single JSON value.
///
/// `</` is escaped in the JSON so node content containing `</script>` cannot
/// terminate the embedding script tag.
pub fn render_document(document: &str, tree: &DocumentTree) -> Result<String> {
    let json = serde_json::to_string(tree)?.replace("</", "<\\/");
    let html = DOC_TEMPLATE
        .replace("{{ title }}", &escape_html(document))
        .replace("{{ doc_data_json }}", &json);
    Ok(html)
}

/// Render the index page listing every processed document in order.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "<li class=\"doc-item\"><a href=\"{}\" class=\"doc-link\">\
                 <span class=\"doc-title\">{}</span>\
                 <span class=\"doc-meta\">{} nodes</span></a></li>",
                entry.filename,
                escape_html(&entry.title),
                entry.node_count
            )
        })
        .collect();
    INDEX_TEMPLATE.replace("{{ doc_list_items }}", &items.join("\n"))
}
