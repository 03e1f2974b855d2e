use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Request failed: {status}")]
    Status { status: reqwest::StatusCode },
    #[error("Invalid API payload: {0}")]
    InvalidPayload(String),
    #[error("{action} {path:?} failed: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SyncError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SyncError::Io {
            action,
            path,
            source,
        }
    }
}
