//! Parse result inspection command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_mdx::parse_mdx_content;

/// Run the show command.
pub fn run(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let result = parse_mdx_content(&source);
    let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;

    println!("{}", json);

    Ok(())
}
