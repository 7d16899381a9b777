//! Blog post parsing: frontmatter, validation and table of contents.
//!
//! Posts are MDX files with a small `key: value` frontmatter header. This
//! crate splits the header from the body, coerces each value, checks the
//! result against the post schema and builds a heading outline of the body.
//! Every function is pure and keeps no state between calls.

pub mod date;
pub mod error;
pub mod frontmatter;
pub mod parser;
pub mod schema;
pub mod toc;
pub mod value;

pub use date::{format_date, parse_date, today, DateLocale};
pub use error::{MdxError, Violation, Violations};
pub use frontmatter::{extract_frontmatter, Extracted};
pub use parser::{parse_mdx_content, parse_mdx_content_with_today, slug_from_path};
pub use schema::{
    validate, validate_post_data, validate_with_today, ParseResult, ParsedPost, PostData,
    PostFrontmatter,
};
pub use toc::{extract_toc, slugify, TocItem};
pub use value::{MetaValue, Metadata};
