//! Second-brain sync
//!
//! Reconciles the records served by the second-brain API against the
//! managed markdown files in one output directory. Each record owns exactly
//! one file named `{id}-{slug}.md`; the id in its front-matter (or file name
//! prefix) is the only link between the two. A run fetches once, then
//! creates, renames, updates and optionally prunes files one record at a
//! time, in ascending id order.

mod client;
mod error;
mod managed;
mod record;
mod render;

pub use client::{brain_endpoint, fetch_records};
pub use error::SyncError;
pub use managed::{managed_id, scan_managed_files, ManagedFile};
pub use record::RemoteRecord;
pub use render::{render_markdown, target_file_name, yaml_quote};

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;

use crate::config::ASSISTANT_AUTHOR;
use crate::helpers::now_iso;

/// Options for one sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory of managed files
    pub out_dir: PathBuf,
    /// Plan only; no filesystem changes
    pub dry_run: bool,
    /// Remove managed files whose id is missing from the API response
    pub prune: bool,
    /// Keep only records whose `project` equals this exactly
    pub project: Option<String>,
    /// Author written into every managed file
    pub author: String,
    /// Print each action line to stdout as it happens
    pub echo: bool,
}

impl SyncOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            dry_run: false,
            prune: false,
            project: None,
            author: ASSISTANT_AUTHOR.to_string(),
            echo: false,
        }
    }
}

/// A planned (and, outside dry-run, applied) filesystem change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    Create { path: PathBuf },
    Rename { from: PathBuf, to: PathBuf },
    Update { path: PathBuf },
    Remove { path: PathBuf },
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Create { path } => write!(f, "create {}", path.display()),
            SyncAction::Rename { from, to } => {
                write!(f, "rename {} -> {}", from.display(), to.display())
            }
            SyncAction::Update { path } => write!(f, "update {}", path.display()),
            SyncAction::Remove { path } => write!(f, "remove {}", path.display()),
        }
    }
}

/// Counters reported at the end of every run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub removed: usize,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done. total={} created={} updated={} renamed={} unchanged={} removed={}",
            self.total, self.created, self.updated, self.renamed, self.unchanged, self.removed
        )
    }
}

/// Outcome of a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub dry_run: bool,
    /// Actions in the order they were taken
    pub actions: Vec<SyncAction>,
    pub summary: SyncSummary,
}

impl SyncReport {
    /// Action lines as printed, `[dry-run] ` prefixed in dry-run mode
    pub fn lines(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|action| format_line(self.dry_run, action))
            .collect()
    }
}

fn format_line(dry_run: bool, action: &SyncAction) -> String {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    format!("{}{}", prefix, action)
}

/// Applies remote records to the output directory
pub struct Reconciler {
    options: SyncOptions,
}

impl Reconciler {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Reconcile `records` against the managed files on disk.
    ///
    /// Records with an invalid or repeated id are skipped with a warning.
    /// Filesystem errors abort the run; changes already applied for earlier
    /// records stay on disk.
    pub async fn reconcile(&self, records: Vec<RemoteRecord>) -> Result<SyncReport, SyncError> {
        let opts = &self.options;

        let mut records: Vec<RemoteRecord> = match opts.project.as_deref() {
            Some(project) => records
                .into_iter()
                .filter(|r| r.project_name() == project)
                .collect(),
            None => records,
        };
        records.sort_by_key(RemoteRecord::valid_id);

        if !opts.dry_run {
            fs::create_dir_all(&opts.out_dir)
                .await
                .map_err(SyncError::io("create", &opts.out_dir))?;
        }

        let mut existing = scan_managed_files(&opts.out_dir).await?;
        tracing::debug!("Found {} managed files in {:?}", existing.len(), opts.out_dir);

        let mut report = SyncReport {
            dry_run: opts.dry_run,
            ..Default::default()
        };
        report.summary.total = records.len();
        let mut seen_ids = HashSet::new();

        for record in &records {
            let Some(id) = record.valid_id() else {
                tracing::warn!("Skipping record with invalid id: {}", record.id);
                continue;
            };
            if !seen_ids.insert(id) {
                tracing::warn!("Skipping duplicate API record id={}", id);
                continue;
            }

            let target_name = target_file_name(id, record);
            let target_path = opts.out_dir.join(&target_name);

            let Some(current) = existing.get_mut(&id) else {
                let next = render_markdown(id, record, &opts.author, &now_iso());
                self.emit(&mut report, SyncAction::Create {
                    path: target_path.clone(),
                });
                report.summary.created += 1;
                if !opts.dry_run {
                    fs::write(&target_path, next)
                        .await
                        .map_err(SyncError::io("write", &target_path))?;
                }
                continue;
            };

            let fallback_date = current.date().unwrap_or_else(now_iso);
            let next = render_markdown(id, record, &opts.author, &fallback_date);

            if current.file_name != target_name {
                self.emit(&mut report, SyncAction::Rename {
                    from: current.full_path.clone(),
                    to: target_path.clone(),
                });
                report.summary.renamed += 1;
                if !opts.dry_run {
                    fs::rename(&current.full_path, &target_path)
                        .await
                        .map_err(SyncError::io("rename", &current.full_path))?;
                }
                current.full_path = target_path.clone();
                current.file_name = target_name;
            }

            if current.content != next {
                self.emit(&mut report, SyncAction::Update {
                    path: target_path.clone(),
                });
                report.summary.updated += 1;
                if !opts.dry_run {
                    fs::write(&target_path, &next)
                        .await
                        .map_err(SyncError::io("write", &target_path))?;
                }
                current.content = next;
            } else {
                report.summary.unchanged += 1;
            }
        }

        if opts.prune {
            for (id, file) in &existing {
                if seen_ids.contains(id) {
                    continue;
                }
                self.emit(&mut report, SyncAction::Remove {
                    path: file.full_path.clone(),
                });
                report.summary.removed += 1;
                if !opts.dry_run {
                    fs::remove_file(&file.full_path)
                        .await
                        .map_err(SyncError::io("remove", &file.full_path))?;
                }
            }
        }

        if opts.echo {
            println!("\n{}", report.summary);
        }
        tracing::debug!("{}", report.summary);

        Ok(report)
    }

    fn emit(&self, report: &mut SyncReport, action: SyncAction) {
        if self.options.echo {
            println!("{}", format_line(self.options.dry_run, &action));
        }
        report.actions.push(action);
    }
}

/// Fetch the API records and reconcile them into `options.out_dir`.
///
/// Nothing touches the filesystem unless the fetch succeeds.
pub async fn run_sync(api_url: &str, options: SyncOptions) -> Result<SyncReport, SyncError> {
    let records = fetch_records(api_url).await?;
    tracing::info!("Fetched {} records", records.len());
    Reconciler::new(options).reconcile(records).await
}
