//! Content module - front-matter parsing, post normalization and loading

pub mod aggregate;
mod frontmatter;
pub mod loader;
pub mod normalize;
mod post;

pub use aggregate::{aggregate, find_post};
pub use frontmatter::{Dialect, FrontMatter, FrontMatterValue};
pub use post::{ContentSource, Post};
