//! Configuration module

mod site;

pub use site::{SiteConfig, SyncConfig};
pub use site::{ASSISTANT_AUTHOR, DEFAULT_API_URL, DEFAULT_SYNC_DIR};
