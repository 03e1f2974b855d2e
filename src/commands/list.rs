//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::loader::ContentLoader;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    let loader = ContentLoader::new(folio);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] ({})",
                    post.timestamp.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.source
                );
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_all()?;
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
                return Ok(());
            }
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "source" | "sources" => {
            let sources = loader.sources();
            if json {
                println!("{}", serde_json::to_string_pretty(&sources)?);
                return Ok(());
            }
            println!("Sources ({}):", sources.len());
            for source in sources {
                println!("  {} {:?} (author: {})", source.name, source.dir, source.author);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, source",
                content_type
            );
        }
    }

    Ok(())
}
