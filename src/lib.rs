//! folio: markdown content pipeline for a portfolio blog
//!
//! Loads posts from several directories of markdown files, normalizes their
//! front-matter into one post model, merges them into a single date-sorted,
//! uniquely-slugged feed, and keeps the second-brain notes directory in sync
//! with a remote API.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod sync;

use anyhow::Result;
use std::path::Path;

/// The main application handle
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory; relative paths in the config resolve against it
    pub base_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Load every content source into one feed, newest first
    pub fn load_posts(&self) -> Result<Vec<content::Post>> {
        content::loader::ContentLoader::new(self).load_all()
    }
}
