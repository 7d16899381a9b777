//! Frontmatter validation command.

use std::path::Path;

use anyhow::Result;
use folio_posts::{CatalogConfig, PostCatalog};

use crate::config::load_config;

/// Run the check command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let catalog = PostCatalog::load(&CatalogConfig {
        content_dir: config.content_dir(),
    })
    .await?;

    for issue in catalog.issues() {
        println!("{}: {}", issue.path.display(), issue.error);
    }

    if !catalog.issues().is_empty() {
        anyhow::bail!("{} post(s) failed validation", catalog.issues().len());
    }

    tracing::info!(
        "All posts valid ({} published, {} drafts)",
        catalog.posts().len(),
        catalog.drafts()
    );

    Ok(())
}
