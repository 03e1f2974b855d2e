//! Merging posts from several sources into one feed
//!
//! Disambiguated slugs depend on the date order of the merged feed: editing
//! a post so that it moves ahead of an older post with the same slug swaps
//! which of the two keeps the plain slug.

use std::collections::HashMap;

use super::Post;

/// Sort newest first. The sort is stable, so equal dates keep input order.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Merge named collections into one feed.
///
/// Every post is tagged with its source and gets the id `source:id`. The
/// union is sorted newest first, then the second and later occurrences of a
/// slug are rewritten to `{slug}-{source}-{n}` where `n` is the occurrence
/// number (2 for the first duplicate).
pub fn aggregate<I>(collections: I) -> Vec<Post>
where
    I: IntoIterator<Item = (String, Vec<Post>)>,
{
    let mut posts: Vec<Post> = collections
        .into_iter()
        .flat_map(|(source, posts)| {
            posts.into_iter().map(move |mut post| {
                post.id = format!("{}:{}", source, post.id);
                post.source = source.clone();
                post
            })
        })
        .collect();

    sort_by_date_desc(&mut posts);
    with_unique_slugs(posts)
}

fn with_unique_slugs(posts: Vec<Post>) -> Vec<Post> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    posts
        .into_iter()
        .map(|mut post| {
            let count = seen.entry(post.slug.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                post.slug = format!("{}-{}-{}", post.slug, post.source, count);
            }
            post
        })
        .collect()
}

/// Find a post by slug, falling back to its id
pub fn find_post<'a>(posts: &'a [Post], key: &str) -> Option<&'a Post> {
    posts
        .iter()
        .find(|p| p.slug == key)
        .or_else(|| posts.iter().find(|p| p.id == key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{normalize::normalize, ContentSource, FrontMatter};

    fn post(source: &str, file: &str, slug: &str, date: &str) -> Post {
        let doc = format!("---\nslug: {}\ndate: {}\n---\nBody", slug, date);
        let (fm, body) = FrontMatter::parse(&doc);
        normalize(fm, body, file, &ContentSource::new(source, source, "Author"))
    }

    #[test]
    fn test_colliding_slugs_across_sources() {
        let blog = vec![post("blog", "hello.md", "hello", "2024-02-01")];
        let brain = vec![post("second-brain", "hello.md", "hello", "2024-01-01")];

        let posts = aggregate(vec![
            ("blog".to_string(), blog),
            ("second-brain".to_string(), brain),
        ]);

        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["hello", "hello-second-brain-2"]);
        assert_eq!(posts[0].id, "blog:hello");
        assert_eq!(posts[1].id, "second-brain:hello");
    }

    #[test]
    fn test_disambiguation_follows_date_order() {
        let blog = vec![post("blog", "hello.md", "hello", "2023-01-01")];
        let brain = vec![post("second-brain", "hello.md", "hello", "2024-01-01")];

        let posts = aggregate(vec![
            ("blog".to_string(), blog),
            ("second-brain".to_string(), brain),
        ]);

        assert_eq!(posts[0].source, "second-brain");
        assert_eq!(posts[0].slug, "hello");
        assert_eq!(posts[1].slug, "hello-blog-2");
    }

    #[test]
    fn test_third_occurrence_numbering() {
        let blog = vec![
            post("blog", "a.md", "same", "2024-03-01"),
            post("blog", "b.md", "same", "2024-02-01"),
            post("blog", "c.md", "same", "2024-01-01"),
        ];
        let posts = aggregate(vec![("blog".to_string(), blog)]);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["same", "same-blog-2", "same-blog-3"]);
    }

    #[test]
    fn test_sorted_newest_first_and_stable() {
        let blog = vec![
            post("blog", "old.md", "old", "2020-01-01"),
            post("blog", "tie-a.md", "tie-a", "2022-05-05"),
            post("blog", "tie-b.md", "tie-b", "2022-05-05"),
            post("blog", "new.md", "new", "March 3, 2024"),
        ];
        let posts = aggregate(vec![("blog".to_string(), blog)]);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "tie-a", "tie-b", "old"]);
    }

    #[test]
    fn test_find_post_by_slug_or_id() {
        let posts = aggregate(vec![(
            "second-brain".to_string(),
            vec![post("second-brain", "12-note.md", "custom", "2024-01-01")],
        )]);

        assert_eq!(find_post(&posts, "custom").unwrap().id, "second-brain:12-note");
        assert_eq!(find_post(&posts, "second-brain:12-note").unwrap().slug, "custom");
        assert!(find_post(&posts, "nope").is_none());
    }
}
