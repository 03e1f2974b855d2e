//! Content loader - loads posts from content source directories

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::normalize::normalize;
use super::{aggregate, ContentSource, FrontMatter, Post};
use crate::Folio;

/// Load every markdown file directly inside `source.dir`, one post per file.
///
/// The result is in file-name order, not date order. An unreadable directory
/// or file is an error for the caller.
pub fn load_dir(source: &ContentSource) -> Result<Vec<Post>> {
    let mut posts = Vec::new();

    for entry in WalkDir::new(&source.dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| {
            format!("Failed to read content directory {:?}", source.dir)
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown_file(path) {
            continue;
        }

        posts.push(load_post(path, source)?);
    }

    tracing::debug!(
        "Loaded {} posts from {} ({:?})",
        posts.len(),
        source.name,
        source.dir
    );

    Ok(posts)
}

/// Load a single post from a file
pub fn load_post(path: &Path, source: &ContentSource) -> Result<Post> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let (fm, body) = FrontMatter::parse(&raw);

    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled.md");

    Ok(normalize(fm, body, filename, source))
}

/// Loads posts for every configured content source
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Configured sources with directories resolved against the base directory
    pub fn sources(&self) -> Vec<ContentSource> {
        self.folio
            .config
            .sources
            .iter()
            .map(|s| ContentSource {
                dir: self.folio.base_dir.join(&s.dir),
                ..s.clone()
            })
            .collect()
    }

    /// Load a single named source, newest first with unique slugs
    pub fn load_source(&self, name: &str) -> Result<Vec<Post>> {
        let source = self
            .sources()
            .into_iter()
            .find(|s| s.name == name)
            .with_context(|| format!("Unknown content source: {}", name))?;

        let posts = load_dir(&source)?;
        Ok(aggregate::aggregate(vec![(source.name, posts)]))
    }

    /// Load every source and merge them into one uniquely-slugged feed
    pub fn load_all(&self) -> Result<Vec<Post>> {
        let mut collections = Vec::new();
        for source in self.sources() {
            let posts = load_dir(&source)?;
            collections.push((source.name, posts));
        }

        let posts = aggregate::aggregate(collections);
        tracing::info!("Loaded {} posts", posts.len());
        Ok(posts)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_dir_reads_markdown_only() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b-post.md", "---\ntitle: B\ndate: 2024-01-01\n---\nBody B");
        write(tmp.path(), "a-post.md", "No front matter at all");
        write(tmp.path(), "notes.txt", "ignored");
        fs::create_dir(tmp.path().join("nested.md")).unwrap();

        let source = ContentSource::new("blog", tmp.path(), "Author");
        let posts = load_dir(&source).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].filename, "a-post.md");
        assert_eq!(posts[0].title, "a-post");
        assert_eq!(posts[0].content, "No front matter at all");
        assert_eq!(posts[1].title, "B");
        assert_eq!(posts[1].content, "Body B");
        assert!(posts.iter().all(|p| p.source == "blog"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let source = ContentSource::new("blog", tmp.path().join("missing"), "Author");
        assert!(load_dir(&source).is_err());
    }

    #[test]
    fn test_reload_reflects_filesystem_changes() {
        let tmp = TempDir::new().unwrap();
        let source = ContentSource::new("blog", tmp.path(), "Author");
        write(tmp.path(), "one.md", "---\ntitle: One\n---\n");
        assert_eq!(load_dir(&source).unwrap().len(), 1);

        write(tmp.path(), "two.md", "---\ntitle: Two\n---\n");
        assert_eq!(load_dir(&source).unwrap().len(), 2);
    }

    #[test]
    fn test_load_source_disambiguates_slugs() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("blog");
        fs::create_dir(&blog).unwrap();
        write(&blog, "a.md", "---\nslug: hello\ndate: 2024-02-01\n---\nNewer");
        write(&blog, "b.md", "---\nslug: hello\ndate: 2024-01-01\n---\nOlder");

        let folio = Folio {
            config: SiteConfig {
                sources: vec![ContentSource::new("blog", "blog", "Author")],
                ..SiteConfig::default()
            },
            base_dir: tmp.path().to_path_buf(),
        };
        let posts = ContentLoader::new(&folio).load_source("blog").unwrap();

        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["hello", "hello-blog-2"]);
        assert_eq!(posts[0].id, "blog:a");
        assert!(ContentLoader::new(&folio).load_source("nope").is_err());
    }
}
