//! Text helpers: slugs, titles and tag lists

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_SLUG_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
    static ref TAG_DELIMITERS: Regex = Regex::new(r"[|,;]+").unwrap();
}

/// Longest slug the sync job puts into a managed file name.
pub const MAX_SLUG_LEN: usize = 80;

/// Turn arbitrary text into a URL-safe slug.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen and strips leading/trailing hyphens. May return an empty
/// string.
///
/// # Examples
/// ```
/// assert_eq!(folio::helpers::slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    NON_SLUG_RUN
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug used for managed file names: capped at [`MAX_SLUG_LEN`] and never empty.
pub fn slugify_truncated(input: &str) -> String {
    let slug = slugify(input);
    // The slug is pure ASCII, so byte slicing is safe.
    let cut = &slug[..slug.len().min(MAX_SLUG_LEN)];
    let cut = cut.trim_end_matches('-');
    if cut.is_empty() {
        "untitled".to_string()
    } else {
        cut.to_string()
    }
}

/// Derive a readable title from a file stem.
///
/// Only camelCase boundaries get a space: `helloWorld` becomes `hello World`,
/// `my-first_post` is kept as is.
pub fn humanize_filename(stem: &str) -> String {
    let stem = stem.strip_suffix(".md").unwrap_or(stem);
    CAMEL_BOUNDARY.replace_all(stem, "$1 $2").trim().to_string()
}

/// Parse a free-form tag value.
///
/// Accepts a JSON array (`["a","b"]`) or a string delimited by commas, pipes
/// or semicolons. Entries are trimmed, empty entries dropped and duplicates
/// removed keeping the first occurrence.
pub fn parse_tags(value: &str) -> Vec<String> {
    let raw = value.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    if raw.starts_with('[') && raw.ends_with(']') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(raw)
        {
            return dedupe(items.iter().map(|item| match item {
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            }));
        }
    }

    dedupe(TAG_DELIMITERS.split(raw).map(|s| s.trim().to_string()))
}

/// Drop empty strings and repeated values, preserving first-seen order.
pub fn dedupe<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
