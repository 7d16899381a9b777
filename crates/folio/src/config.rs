//! Configuration file structure (blog.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_mdx::DateLocale;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Locale for displayed dates
    #[serde(default)]
    pub locale: DateLocale,
}

#[derive(Debug, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_dir")]
    pub dir: String,
}

#[derive(Debug, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_output")]
    pub output: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            locale: DateLocale::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: default_export_output(),
        }
    }
}

fn default_title() -> String {
    "My Blog".to_string()
}
fn default_content_dir() -> String {
    "content/posts".to_string()
}
fn default_page_size() -> usize {
    10
}
fn default_export_output() -> String {
    "dist/posts.json".to_string()
}

impl ConfigFile {
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.content.dir)
    }
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_missing() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("blog.toml")).unwrap();

        assert_eq!(config.content.dir, "content/posts");
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.site.locale, DateLocale::Ko);
    }

    #[test]
    fn reads_partial_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blog.toml");
        fs::write(&path, "[site]\nlocale = \"en\"\n\n[list]\npage_size = 5\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.site.locale, DateLocale::En);
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.list.page_size, 5);
        assert_eq!(config.export.output, "dist/posts.json");
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blog.toml");
        fs::write(&path, "[list]\npage_size = \"ten\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
