//! Post listing command.

use std::path::Path;

use anyhow::Result;
use folio_mdx::{format_date, DateLocale};
use folio_posts::{paginate, CatalogConfig, Post, PostCatalog};

use crate::config::load_config;

/// Run the list command.
pub async fn run(config_path: &Path, tags: &[String], page: usize) -> Result<()> {
    let config = load_config(config_path)?;

    let catalog = PostCatalog::load(&CatalogConfig {
        content_dir: config.content_dir(),
    })
    .await?;

    let posts = catalog.filter_by_tags(tags);
    let page = paginate(&posts, page, config.list.page_size);

    println!("{}", config.site.title);
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(" + "));
    }
    println!();

    for post in page.items {
        println!("{}", format_entry(post, config.site.locale));
    }

    println!();
    println!(
        "Page {}/{} ({} posts)",
        page.number, page.total_pages, page.total_items
    );

    Ok(())
}

/// One listing line: date, title, slug and tags.
fn format_entry(post: &Post, locale: DateLocale) -> String {
    let fm = &post.frontmatter;
    let mut line = format!(
        "{}  {} ({})",
        format_date(&fm.date, locale),
        fm.title,
        post.slug
    );

    if !fm.tags.is_empty() {
        line.push_str(&format!("  [{}]", fm.tags.join(", ")));
    }

    line
}
