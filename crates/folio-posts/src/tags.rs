//! Tag index and tag filtering.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{Post, PostCatalog};

/// A tag with the posts that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    /// Tag name as written
    pub name: String,

    /// Number of posts with this tag
    pub count: usize,

    /// Slugs of those posts, newest first
    pub posts: Vec<String>,
}

impl PostCatalog {
    /// Every tag used by a published post, sorted by name.
    ///
    /// Names compare case-insensitively first so `rust` and `Rust` sit
    /// together.
    pub fn all_tags(&self) -> Vec<TagInfo> {
        let mut by_name: HashMap<&str, Vec<String>> = HashMap::new();

        // Posts are already newest first.
        for post in self.posts() {
            for tag in &post.frontmatter.tags {
                let slugs = by_name.entry(tag.as_str()).or_default();
                if !slugs.contains(&post.slug) {
                    slugs.push(post.slug.clone());
                }
            }
        }

        let mut tags: Vec<TagInfo> = by_name
            .into_iter()
            .map(|(name, posts)| TagInfo {
                name: name.to_string(),
                count: posts.len(),
                posts,
            })
            .collect();

        tags.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        tags
    }

    /// Published posts carrying the given tag.
    pub fn posts_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts()
            .iter()
            .filter(|post| post.frontmatter.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Published posts carrying every selected tag.
    ///
    /// An empty selection matches all posts.
    pub fn filter_by_tags<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&Post> {
        self.posts()
            .iter()
            .filter(|post| {
                selected
                    .iter()
                    .all(|tag| post.frontmatter.tags.iter().any(|t| t == tag.as_ref()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn catalog() -> PostCatalog {
        let post = |name: &str, date: &str, tags: &str| {
            (
                PathBuf::from(format!("posts/{}.mdx", name)),
                format!("---\ntitle: {}\ndate: {}\ntags: {}\n---\n", name, date, tags),
            )
        };

        PostCatalog::from_sources(vec![
            post("a", "2024-01-01", "[rust, cli]"),
            post("b", "2024-02-01", "[rust, web]"),
            post("c", "2024-03-01", "[Web, rust, rust]"),
            post("d", "2024-04-01", "[]"),
        ])
    }

    #[test]
    fn collects_tags() {
        let tags = catalog().all_tags();

        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["cli", "rust", "Web", "web"]);

        let rust = &tags[1];
        assert_eq!(rust.count, 3);
        assert_eq!(rust.posts, vec!["c", "b", "a"]);
    }

    #[test]
    fn finds_posts_by_tag() {
        let catalog = catalog();

        let slugs: Vec<_> = catalog.posts_by_tag("web").iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b"]);
        assert!(catalog.posts_by_tag("go").is_empty());
    }

    #[test]
    fn filters_with_and_semantics() {
        let catalog = catalog();

        let slugs: Vec<_> = catalog
            .filter_by_tags(&["rust", "cli"])
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["a"]);

        let none: [&str; 0] = [];
        assert_eq!(catalog.filter_by_tags(&none).len(), 4);
        assert!(catalog.filter_by_tags(&["cli", "web"]).is_empty());
    }
}
