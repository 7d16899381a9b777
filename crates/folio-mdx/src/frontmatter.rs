//! Frontmatter block extraction.
//!
//! A document carries frontmatter when its very first line is `---` and a
//! later line is `---` as well. Everything between the two delimiter lines
//! is the metadata block; everything after the closing line is the body.

use std::sync::LazyLock;

use regex::Regex;

/// The two halves of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    /// Text between the delimiter lines (empty when there is no frontmatter)
    pub metadata_block: &'a str,

    /// Document text after the closing delimiter
    pub body: &'a str,

    /// Whether a delimiter pair was found
    pub had_delimiters: bool,
}

impl<'a> Extracted<'a> {
    fn without_frontmatter(source: &'a str) -> Self {
        Self {
            metadata_block: "",
            body: source,
            had_delimiters: false,
        }
    }
}

/// Split a document into its metadata block and body.
///
/// Only the first closing delimiter ends the block, so `---` rules further
/// down in the body are left alone. Missing delimiters are not an error: the
/// whole input becomes the body.
pub fn extract_frontmatter(source: &str) -> Extracted<'_> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)??---[ \t]*(?:\r?\n|\z)")
            .expect("Invalid frontmatter regex")
    });

    let Some(caps) = RE.captures(source) else {
        return Extracted::without_frontmatter(source);
    };

    // Group 0 always participates in a match.
    let end = caps.get(0).map_or(0, |m| m.end());
    let metadata_block = caps.get(1).map_or("", |m| m.as_str());

    Extracted {
        metadata_block,
        body: &source[end..],
        had_delimiters: true,
    }
}
