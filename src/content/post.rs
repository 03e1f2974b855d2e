//! Post model and content sources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FrontMatter;

/// A named directory of markdown posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    /// Source name, e.g. `blog` or `second-brain`
    pub name: String,

    /// Directory holding the markdown files
    pub dir: PathBuf,

    /// Author used when a post does not name one
    pub author: String,
}

impl ContentSource {
    pub fn new(
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            author: author.into(),
        }
    }
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug of the file name; `source:slug` once aggregated
    pub id: String,

    /// Post title
    pub title: String,

    /// URL-friendly name, unique within a published collection
    pub slug: String,

    /// File name including the `.md` extension
    pub filename: String,

    /// Markdown body without the front-matter block
    pub content: String,

    /// Short summary shown next to the title
    pub deck: String,

    /// Publication date as ISO-8601
    pub date: String,

    /// Parsed `date`, used for ordering
    #[serde(skip, default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    pub tags: Vec<String>,

    /// Reading time estimate, e.g. `3 min`
    pub read_time: String,

    pub author: String,

    /// Name of the content source the post was loaded from
    pub source: String,

    /// Raw front-matter fields
    pub frontmatter: FrontMatter,

    /// First paragraph of the body with markup stripped
    pub excerpt: String,
}
