//! Field normalization: raw front-matter + body -> post metadata

use lazy_static::lazy_static;
use regex::Regex;

use super::{ContentSource, FrontMatter, FrontMatterValue, Post};
use crate::helpers::{
    dedupe, humanize_filename, normalize_date, now_iso, parse_tags, slugify, timestamp_of,
};

lazy_static! {
    static ref HEADING_MARKER: Regex = Regex::new(r"#{1,6}\s+").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`(.*?)`").unwrap();
}

/// Maximum excerpt length in characters, before the ellipsis
pub const EXCERPT_LEN: usize = 150;

/// Words per minute used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Build a post from its parsed parts.
///
/// `filename` is the file name with or without the `.md` extension. The id
/// is the slug of the file stem; aggregation later prefixes it with the
/// source name.
pub fn normalize(fm: FrontMatter, body: &str, filename: &str, source: &ContentSource) -> Post {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let file_slug = slugify(stem);

    let title = fm
        .get_text("title")
        .unwrap_or_else(|| humanize_filename(stem));

    let slug = fm
        .get_text("slug")
        .map(|s| slugify(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| file_slug.clone());

    let excerpt = extract_excerpt(body);
    let deck = fm
        .first_text(&["deck", "description", "summary"])
        .unwrap_or_else(|| excerpt.clone());

    let date = match fm.first_text(&["date", "pubDate", "publishedAt"]) {
        Some(raw) => normalize_date(&raw),
        None => now_iso(),
    };
    let timestamp = timestamp_of(&date);

    let tags = match fm.get("tags") {
        Some(FrontMatterValue::List(items)) => dedupe(items.iter().cloned()),
        Some(FrontMatterValue::String(s)) => parse_tags(s),
        Some(FrontMatterValue::Number(n)) => vec![n.to_string()],
        None => Vec::new(),
    };

    let read_time = fm
        .get_text("readTime")
        .unwrap_or_else(|| estimate_read_time(body));

    let author = fm
        .get_text("author")
        .unwrap_or_else(|| source.author.clone());

    Post {
        id: file_slug,
        title,
        slug,
        filename: format!("{}.md", stem),
        content: body.to_string(),
        deck,
        date,
        timestamp,
        tags,
        read_time,
        author,
        source: source.name.clone(),
        frontmatter: fm,
        excerpt,
    }
}

/// First paragraph of the body with headings, emphasis and inline code
/// markers removed, cut to [`EXCERPT_LEN`] characters plus `...`.
pub fn extract_excerpt(body: &str) -> String {
    let body = body.replace("\r\n", "\n");
    let first = body.split("\n\n").next().unwrap_or("");

    let text = HEADING_MARKER.replace_all(first, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = text.trim();

    if text.chars().count() > EXCERPT_LEN {
        let cut: String = text.chars().take(EXCERPT_LEN).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// `ceil(words / 200)` minutes, at least one.
pub fn estimate_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min", minutes)
}
