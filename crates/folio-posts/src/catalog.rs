//! Post catalog.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use folio_mdx::{
    extract_toc, parse_date, parse_mdx_content, slug_from_path, ParseResult, PostFrontmatter,
    TocItem,
};

/// Configuration for loading a catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory holding the `.mdx` posts
    pub content_dir: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content/posts"),
        }
    }
}

/// Errors that can occur while loading or exporting a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Content directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read post: {0}")]
    ReadError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A published, validated post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Identifier derived from the file name
    pub slug: String,

    /// Source file path
    #[serde(skip)]
    pub path: PathBuf,

    /// Validated frontmatter
    pub frontmatter: PostFrontmatter,

    /// Markdown body without frontmatter
    #[serde(skip)]
    pub content: String,

    /// Outline of the body
    pub toc: Vec<TocItem>,
}

/// A post whose frontmatter failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PostIssue {
    pub slug: String,
    pub path: PathBuf,
    pub error: String,
}

/// Every post of a content directory, split by status.
#[derive(Debug, Default)]
pub struct PostCatalog {
    /// Published posts, newest first
    posts: Vec<Post>,

    /// Number of valid posts marked `published: false`
    drafts: usize,

    /// Posts that failed to parse
    issues: Vec<PostIssue>,
}

impl PostCatalog {
    /// Load and parse all posts in the content directory.
    pub async fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let start = Instant::now();

        let paths = discover_posts(&config.content_dir)?;
        tracing::debug!("Found {} post files", paths.len());

        // Reading and parsing both stay off the async workers.
        let catalog = tokio::task::spawn_blocking(move || {
            let sources = paths
                .into_par_iter()
                .map(|path| {
                    let source = fs::read_to_string(&path)
                        .map_err(|e| CatalogError::ReadError(format!("{}: {}", path.display(), e)))?;
                    Ok((path, source))
                })
                .collect::<Result<Vec<_>, CatalogError>>()?;
            Ok::<_, CatalogError>(Self::from_sources(sources))
        })
        .await
        .map_err(|e| CatalogError::ReadError(e.to_string()))??;

        tracing::info!(
            "Loaded {} posts ({} drafts, {} invalid) in {}ms",
            catalog.posts.len(),
            catalog.drafts,
            catalog.issues.len(),
            start.elapsed().as_millis()
        );

        Ok(catalog)
    }

    /// Build a catalog from already read `(path, source)` pairs.
    pub fn from_sources(sources: Vec<(PathBuf, String)>) -> Self {
        let parsed: Vec<_> = sources
            .into_par_iter()
            .map(|(path, source)| {
                let slug = slug_from_path(&path.to_string_lossy().replace('\\', "/"));
                let result = parse_mdx_content(&source);
                (slug, path, result)
            })
            .collect();

        let mut catalog = Self::default();

        for (slug, path, result) in parsed {
            match result {
                ParseResult::Success(post) => {
                    if !post.frontmatter.published {
                        tracing::debug!("Skipping unpublished post {}", slug);
                        catalog.drafts += 1;
                        continue;
                    }

                    let toc = extract_toc(&post.content);
                    catalog.posts.push(Post {
                        slug,
                        path,
                        frontmatter: post.frontmatter,
                        content: post.content,
                        toc,
                    });
                }
                ParseResult::Failure { error, .. } => {
                    tracing::warn!("Skipping {}: {}", path.display(), error);
                    catalog.issues.push(PostIssue { slug, path, error });
                }
            }
        }

        catalog.posts.sort_by(newest_first);
        catalog.issues.sort_by(|a, b| a.slug.cmp(&b.slug));

        catalog
    }

    /// Published posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Number of unpublished posts.
    pub fn drafts(&self) -> usize {
        self.drafts
    }

    /// Posts that failed validation.
    pub fn issues(&self) -> &[PostIssue] {
        &self.issues
    }

    /// Look up a published post by slug.
    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Write a JSON index of every published post.
    pub async fn export_index(&self, output: &Path) -> Result<usize, CatalogError> {
        let json = serde_json::to_string_pretty(&self.posts)
            .map_err(|e| CatalogError::WriteError(e.to_string()))?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CatalogError::WriteError(e.to_string()))?;
        }

        tokio::fs::write(output, json)
            .await
            .map_err(|e| CatalogError::WriteError(format!("{}: {}", output.display(), e)))?;

        Ok(self.posts.len())
    }
}

/// Find `.mdx` files directly inside the content directory.
fn discover_posts(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    if !dir.exists() {
        return Err(CatalogError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("mdx"))
        .collect();

    paths.sort();
    Ok(paths)
}

/// Newest date first. Unparseable dates go last, ties by slug.
pub(crate) fn newest_first(a: &Post, b: &Post) -> Ordering {
    let date_a = parse_date(&a.frontmatter.date);
    let date_b = parse_date(&b.frontmatter.date);

    match (date_a, date_b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.slug.cmp(&b.slug))
}
