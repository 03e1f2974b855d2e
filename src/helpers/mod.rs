//! Helper functions shared by the content pipeline and the sync job

mod date;
mod text;

pub use date::*;
pub use text::*;
