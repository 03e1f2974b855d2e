//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentSource;

/// Default second-brain API host
pub const DEFAULT_API_URL: &str = "https://sbrain-production.up.railway.app";

/// Default directory for synced second-brain notes
pub const DEFAULT_SYNC_DIR: &str = "src/markdown/second-brain";

/// Author written into every synced note
pub const ASSISTANT_AUTHOR: &str = "Marvin (AI assistant)";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,

    /// Content sources merged into the post feed, in order
    pub sources: Vec<ContentSource>,

    #[serde(default)]
    pub sync: SyncConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            sources: vec![
                ContentSource::new("blog", "src/markdown/blog", "Matthew Bub"),
                ContentSource::new("second-brain", DEFAULT_SYNC_DIR, ASSISTANT_AUTHOR),
            ],
            sync: SyncConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))?;
        Ok(config)
    }
}

/// Second-brain sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// API base URL; `/brain` is appended
    pub api_url: String,

    /// Directory of managed markdown files
    pub out_dir: PathBuf,

    /// Author written into managed files
    pub author: String,

    /// Only sync records of this project
    pub project: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            out_dir: PathBuf::from(DEFAULT_SYNC_DIR),
            author: ASSISTANT_AUTHOR.to_string(),
            project: None,
        }
    }
}
