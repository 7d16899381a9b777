//! Scaffold a blog in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");
    scaffold(Path::new("."), yes)?;
    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio check' to validate your posts.");
    Ok(())
}

/// Write the config file and a sample post under `root`.
fn scaffold(root: &Path, yes: bool) -> Result<()> {
    let posts_dir = root.join("content").join("posts");

    if posts_dir.exists() && !yes {
        tracing::warn!("content/posts/ already exists. Use --yes to overwrite.");
        return Ok(());
    }
    fs::create_dir_all(&posts_dir).context("Failed to create content/posts directory")?;

    let config_path = root.join("blog.toml");
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write blog.toml")?;
        tracing::info!("Created blog.toml");
    }

    let post_path = posts_dir.join("hello-world.mdx");
    if !post_path.exists() || yes {
        fs::write(&post_path, DEFAULT_POST).context("Failed to write hello-world.mdx")?;
        tracing::info!("Created content/posts/hello-world.mdx");
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Folio Configuration

[site]
# Blog title
title = "My Blog"

# Date display locale: "ko" or "en"
locale = "ko"

[content]
# Directory containing .mdx posts
dir = "content/posts"

[list]
# Posts per page
page_size = 10

[export]
# Output of 'folio export'
output = "dist/posts.json"
"#;

const DEFAULT_POST: &str = r#"---
title: "Hello, World"
description: "The first post"
date: 2024-01-15
tags: [intro, folio]
published: true
---

# Hello, World

Welcome to the blog.

## Writing posts

Every post starts with a frontmatter block between `---` lines.

### Fields

`title` and `date` are required. `tags`, `description`, `updatedAt` and
`published` are optional.

## Next steps

Run `folio list` to see your posts.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use folio_mdx::{extract_toc, parse_mdx_content};
    use tempfile::tempdir;

    #[test]
    fn sample_post_is_valid() {
        let post = parse_mdx_content(DEFAULT_POST).ok().unwrap();

        assert_eq!(post.frontmatter.title, "Hello, World");
        assert_eq!(post.frontmatter.tags, vec!["intro", "folio"]);
        assert_eq!(extract_toc(&post.content).len(), 3);
    }

    #[test]
    fn sample_config_parses() {
        let config: crate::config::ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.content.dir, "content/posts");
    }

    #[test]
    fn scaffolds_files() {
        let temp = tempdir().unwrap();

        scaffold(temp.path(), false).unwrap();

        assert!(temp.path().join("blog.toml").exists());
        assert!(temp
            .path()
            .join("content/posts/hello-world.mdx")
            .exists());
    }

    #[test]
    fn keeps_existing_posts_without_yes() {
        let temp = tempdir().unwrap();
        let posts = temp.path().join("content").join("posts");
        fs::create_dir_all(&posts).unwrap();

        scaffold(temp.path(), false).unwrap();

        assert!(!temp.path().join("blog.toml").exists());
        assert!(!posts.join("hello-world.mdx").exists());
    }
}
