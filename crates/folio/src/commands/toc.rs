//! Table of contents command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_mdx::{extract_toc, parse_mdx_content, TocItem};

/// Run the toc command.
pub fn run(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let result = parse_mdx_content(&source);
    if let Some(error) = result.error() {
        tracing::warn!("{}: {}", file.display(), error);
    }

    let body = result
        .into_data()
        .map(|post| post.content)
        .unwrap_or_default();

    for item in extract_toc(&body) {
        println!("{}", format_item(&item));
    }

    Ok(())
}

/// `##` entries flush left, `###` entries indented.
fn format_item(item: &TocItem) -> String {
    let indent = "  ".repeat(usize::from(item.depth.saturating_sub(2)));
    format!("{}- {} (#{})", indent, item.text, item.id)
}
