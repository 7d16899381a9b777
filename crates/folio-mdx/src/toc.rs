//! Table of contents extraction.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Anchor ID
    pub id: String,
    /// Heading text
    pub text: String,
    /// Heading level (2 or 3)
    pub depth: u8,
}

/// Markdown extensions matching GitHub-flavored markdown.
pub(crate) fn gfm_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Build the outline of a document body from its `##` and `###` headings.
///
/// Heading text is taken from the heading's own text nodes; text wrapped in
/// emphasis, links and other inline containers is not included. Identical
/// headings produce identical ids.
pub fn extract_toc(body: &str) -> Vec<TocItem> {
    let mut toc = Vec::new();

    // (level, text, inline nesting depth)
    let mut current: Option<(u8, String, usize)> = None;

    for event in Parser::new_ext(body, gfm_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new(), 0));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((depth, text, _)) = current.take() {
                    if depth == 2 || depth == 3 {
                        toc.push(TocItem {
                            id: slugify(&text),
                            text,
                            depth,
                        });
                    }
                }
            }

            Event::Start(_) => {
                if let Some((_, _, nesting)) = current.as_mut() {
                    *nesting += 1;
                }
            }

            Event::End(_) => {
                if let Some((_, _, nesting)) = current.as_mut() {
                    *nesting = nesting.saturating_sub(1);
                }
            }

            Event::Text(text) | Event::Code(text) | Event::InlineHtml(text) => {
                if let Some((_, heading, 0)) = current.as_mut() {
                    heading.push_str(&text);
                }
            }

            Event::SoftBreak => {
                if let Some((_, heading, 0)) = current.as_mut() {
                    heading.push('\n');
                }
            }

            _ => {}
        }
    }

    toc
}

/// Convert heading text to an anchor id.
///
/// Keeps ASCII lowercase letters, digits, Hangul syllables and hyphens.
/// Whitespace becomes a hyphen and hyphen runs collapse to one. Leading and
/// trailing hyphens are kept.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.to_lowercase().chars() {
        let c = if c.is_whitespace() { '-' } else { c };

        if c == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() || is_hangul_syllable(c) {
            slug.push(c);
        }
    }

    slug
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}
