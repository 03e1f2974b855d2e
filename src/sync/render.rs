//! Rendering of managed markdown files
//!
//! The front-matter field order and quoting here is the on-disk contract
//! that `Dialect::Managed` parsing reads back on the next run.

use super::RemoteRecord;
use crate::helpers::{parse_tags, slugify_truncated};

/// Double-quote a scalar, escaping backslashes and quotes.
///
/// Line breaks are folded into single spaces so the value stays on one line.
pub fn yaml_quote(value: &str) -> String {
    let single_line = value
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "\"{}\"",
        single_line.replace('\\', "\\\\").replace('"', "\\\"")
    )
}

/// Record title, or `Untitled` when missing or blank
pub fn record_title(record: &RemoteRecord) -> String {
    match record.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => "Untitled".to_string(),
    }
}

/// `{id}-{slug}.md`
pub fn target_file_name(id: u64, record: &RemoteRecord) -> String {
    format!("{}-{}.md", id, slugify_truncated(&record_title(record)))
}

/// Render the managed file for `record`.
///
/// `fallback_date` is used when the record has no `created_at`.
pub fn render_markdown(
    id: u64,
    record: &RemoteRecord,
    author: &str,
    fallback_date: &str,
) -> String {
    let title = record_title(record);
    let slug = slugify_truncated(&title);
    let date = record
        .created_at
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(fallback_date);
    let tags = parse_tags(record.tags.as_deref().unwrap_or(""));
    let project = record.project.as_deref().unwrap_or("").trim();
    let context = record
        .context
        .as_deref()
        .unwrap_or("")
        .replace("\r\n", "\n");
    let commits = record.commits.as_deref().unwrap_or("").trim();

    let frontmatter = [
        "---".to_string(),
        format!("title: {}", yaml_quote(&title)),
        format!("date: {}", yaml_quote(date)),
        format!("slug: {}", yaml_quote(&slug)),
        format!("author: {}", yaml_quote(author)),
        format!("brainId: {}", id),
        format!("project: {}", yaml_quote(project)),
        format!(
            "tags: [{}]",
            tags.iter()
                .map(|t| yaml_quote(t))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        "---".to_string(),
    ];

    let mut body = context.trim().to_string();
    if !commits.is_empty() {
        body.push_str(&format!("\n\n## Commits\n\n```text\n{}\n```", commits));
    }

    format!("{}\n\n{}\n", frontmatter.join("\n"), body)
}
