//! Sync second-brain notes from the API

use anyhow::Result;
use std::path::PathBuf;

use crate::sync::{run_sync, SyncOptions, SyncReport};
use crate::Folio;

/// Command-line overrides for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncArgs {
    pub dry_run: bool,
    pub prune: bool,
    pub project: Option<String>,
    pub api_url: Option<String>,
    pub out_dir: Option<PathBuf>,
}

/// Resolve the API URL and options from flags, falling back to the config
pub fn resolve(folio: &Folio, args: SyncArgs) -> (String, SyncOptions) {
    let sync = &folio.config.sync;

    let api_url = args.api_url.unwrap_or_else(|| sync.api_url.clone());
    let out_dir = args.out_dir.unwrap_or_else(|| sync.out_dir.clone());

    let mut options = SyncOptions::new(folio.base_dir.join(out_dir));
    options.dry_run = args.dry_run;
    options.prune = args.prune;
    options.project = args
        .project
        .or_else(|| sync.project.clone())
        .filter(|p| !p.is_empty());
    options.author = sync.author.clone();
    options.echo = true;

    (api_url, options)
}

/// Run the sync command
pub async fn run(folio: &Folio, args: SyncArgs) -> Result<SyncReport> {
    let (api_url, options) = resolve(folio, args);
    if options.dry_run {
        tracing::info!("Dry run: no files will be written");
    }
    let report = run_sync(&api_url, options).await?;
    Ok(report)
}
