//! JSON index export command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_posts::{CatalogConfig, PostCatalog};

use crate::config::load_config;

/// Run the export command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let output = output.unwrap_or_else(|| PathBuf::from(&config.export.output));

    tracing::info!("Exporting post index...");

    let catalog = PostCatalog::load(&CatalogConfig {
        content_dir: config.content_dir(),
    })
    .await?;

    let count = catalog.export_index(&output).await?;

    tracing::info!("Wrote {} posts to {}", count, output.display());

    Ok(())
}
