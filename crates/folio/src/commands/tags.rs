//! Tag listing command.

use std::path::Path;

use anyhow::Result;
use folio_posts::{CatalogConfig, PostCatalog};

use crate::config::load_config;

/// Run the tags command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let catalog = PostCatalog::load(&CatalogConfig {
        content_dir: config.content_dir(),
    })
    .await?;

    let tags = catalog.all_tags();
    if tags.is_empty() {
        tracing::info!("No tags found");
        return Ok(());
    }

    for tag in tags {
        println!("{} ({})", tag.name, tag.count);
    }

    Ok(())
}
