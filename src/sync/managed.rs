//! Index of markdown files previously written by the sync job

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::SyncError;
use crate::content::{Dialect, FrontMatter};

lazy_static! {
    static ref ID_PREFIX: Regex = Regex::new(r"^(\d+)-").unwrap();
}

/// A managed file on disk
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedFile {
    pub id: u64,
    pub file_name: String,
    pub full_path: PathBuf,
    /// Full raw text, compared byte-for-byte against the next render
    pub content: String,
}

impl ManagedFile {
    /// The `date` written into the file, if any
    pub fn date(&self) -> Option<String> {
        let (fm, _) = FrontMatter::parse_with(&self.content, Dialect::Managed);
        fm.get_text("date")
    }
}

/// Recover the external id of a managed file: the `brainId` front-matter
/// field, else a numeric file name prefix (`12-title.md`).
pub fn managed_id(file_name: &str, content: &str) -> Option<u64> {
    let (fm, _) = FrontMatter::parse_with(content, Dialect::Managed);
    let from_frontmatter = fm
        .get("brainId")
        .and_then(|v| v.as_i64())
        .filter(|id| *id > 0)
        .map(|id| id as u64);

    from_frontmatter.or_else(|| {
        ID_PREFIX
            .captures(file_name)
            .and_then(|c| c[1].parse::<u64>().ok())
            .filter(|id| *id > 0)
    })
}

/// Scan `out_dir` once and index every managed file by id.
///
/// Files without a recoverable id are left out. A missing directory is
/// treated as empty. When two files claim the same id the first by file
/// name is kept.
pub async fn scan_managed_files(out_dir: &Path) -> Result<BTreeMap<u64, ManagedFile>, SyncError> {
    let mut result = BTreeMap::new();
    let exists = fs::try_exists(out_dir)
        .await
        .map_err(SyncError::io("stat", out_dir))?;
    if !exists {
        return Ok(result);
    }

    let mut names = Vec::new();
    let mut entries = fs::read_dir(out_dir)
        .await
        .map_err(SyncError::io("read", out_dir))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(SyncError::io("read", out_dir))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(SyncError::io("stat", entry.path()))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if file_type.is_file() && name.ends_with(".md") {
            names.push(name);
        }
    }
    names.sort();

    for file_name in names {
        let full_path = out_dir.join(&file_name);
        let content = fs::read_to_string(&full_path)
            .await
            .map_err(SyncError::io("read", &full_path))?;

        let Some(id) = managed_id(&file_name, &content) else {
            tracing::debug!("Ignoring unmanaged file {:?}", full_path);
            continue;
        };

        if let Some(existing) = result.get(&id) {
            tracing::warn!(
                "Duplicate managed id={} in {:?}, keeping {:?}",
                id,
                full_path,
                existing.full_path
            );
            continue;
        }

        result.insert(
            id,
            ManagedFile {
                id,
                file_name,
                full_path,
                content,
            },
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_managed_id_sources() {
        assert_eq!(managed_id("x.md", "---\nbrainId: 7\n---\n"), Some(7));
        assert_eq!(managed_id("x.md", "---\nbrainId: \"8\"\n---\n"), Some(8));
        assert_eq!(managed_id("12-note.md", "no front matter"), Some(12));
        assert_eq!(managed_id("12-note.md", "---\nbrainId: 5\n---\n"), Some(5));
        assert_eq!(managed_id("3-note.md", "---\nbrainId: -1\n---\n"), Some(3));
        assert_eq!(managed_id("0-note.md", ""), None);
        assert_eq!(managed_id("notes.md", "---\ntitle: hand written\n---\n"), None);
    }

    #[tokio::test]
    async fn test_scan_indexes_managed_files_only() {
        let tmp = TempDir::new().unwrap();
        std_fs::write(tmp.path().join("1-first.md"), "---\nbrainId: 1\n---\n").unwrap();
        std_fs::write(tmp.path().join("2-second.md"), "plain body").unwrap();
        std_fs::write(tmp.path().join("about.md"), "---\ntitle: About\n---\n").unwrap();
        std_fs::write(tmp.path().join("3-notes.txt"), "").unwrap();
        std_fs::create_dir(tmp.path().join("4-dir.md")).unwrap();

        let files = scan_managed_files(tmp.path()).await.unwrap();
        assert_eq!(files.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(files[&2].file_name, "2-second.md");
        assert_eq!(files[&2].content, "plain body");
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_first_file() {
        let tmp = TempDir::new().unwrap();
        std_fs::write(tmp.path().join("5-a.md"), "a").unwrap();
        std_fs::write(tmp.path().join("5-b.md"), "b").unwrap();

        let files = scan_managed_files(tmp.path()).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[&5].file_name, "5-a.md");
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let files = scan_managed_files(&tmp.path().join("nope")).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_out_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std_fs::write(&blocker, "not a directory").unwrap();

        let err = scan_managed_files(&blocker.join("notes")).await.unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }

    #[test]
    fn test_date_from_content() {
        let file = ManagedFile {
            id: 1,
            file_name: "1-a.md".into(),
            full_path: PathBuf::from("1-a.md"),
            content: "---\ndate: \"2024-01-01T00:00:00Z\"\n---\n".into(),
        };
        assert_eq!(file.date().as_deref(), Some("2024-01-01T00:00:00Z"));
    }
}
