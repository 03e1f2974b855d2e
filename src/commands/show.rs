//! Show a single post

use anyhow::Result;

use crate::content::{find_post, loader::ContentLoader};
use crate::Folio;

/// Print one post of the merged feed, looked up by slug or id
pub fn run(folio: &Folio, key: &str, json: bool) -> Result<()> {
    let posts = ContentLoader::new(folio).load_all()?;
    let Some(post) = find_post(&posts, key) else {
        anyhow::bail!("No post with slug or id: {}", key);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(post)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!("  slug:      {}", post.slug);
    println!("  id:        {}", post.id);
    println!("  date:      {}", post.date);
    println!("  author:    {}", post.author);
    println!("  read time: {}", post.read_time);
    if !post.tags.is_empty() {
        println!("  tags:      {}", post.tags.join(", "));
    }
    println!("  deck:      {}", post.deck);
    println!();
    println!("{}", post.content);

    Ok(())
}
