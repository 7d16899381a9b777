//! MDX document parser.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::date::today;
use crate::error::MdxError;
use crate::frontmatter::extract_frontmatter;
use crate::schema::{validate_with_today, ParseResult, ParsedPost};
use crate::value::Metadata;

/// Parse a raw post: split off the frontmatter, coerce it and validate it.
///
/// Never panics. Any fault raised while parsing is turned into a failure
/// without partial data. The process panic hook still runs first, so the
/// default hook prints the message to stderr; callers that need silence
/// install their own with [`std::panic::set_hook`].
pub fn parse_mdx_content(source: &str) -> ParseResult<ParsedPost> {
    parse_mdx_content_with_today(source, &today())
}

/// Same as [`parse_mdx_content`] with an explicit fallback date.
pub fn parse_mdx_content_with_today(source: &str, today: &str) -> ParseResult<ParsedPost> {
    catch_faults(|| {
        let extracted = extract_frontmatter(source);
        let metadata = Metadata::parse(extracted.metadata_block);
        validate_with_today(&metadata, extracted.body, today)
    })
}

/// Run `parse`, turning a panic into `MdxError::Unexpected`.
///
/// Does not touch the panic hook.
fn catch_faults<T>(parse: impl FnOnce() -> ParseResult<T>) -> ParseResult<T> {
    catch_unwind(AssertUnwindSafe(parse)).unwrap_or_else(|payload| {
        ParseResult::failure(MdxError::Unexpected(panic_message(payload.as_ref())), None)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

/// Derive a post slug from its file path.
///
/// `content/posts/hello-world.mdx` becomes `hello-world`.
pub fn slug_from_path(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or_default();
    name.replacen(".mdx", "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PostFrontmatter;
    use pretty_assertions::assert_eq;

    const TODAY: &str = "2026-10-18";

    #[test]
    fn parses_complete_post() {
        let source = "---\ntitle: \"Hello\"\ndate: 2024-01-15\ntags: [a, b]\n---\nBody text";

        let result = parse_mdx_content_with_today(source, TODAY);

        assert_eq!(
            result,
            ParseResult::Success(ParsedPost {
                frontmatter: PostFrontmatter {
                    title: "Hello".to_string(),
                    description: None,
                    date: "2024-01-15".to_string(),
                    updated_at: None,
                    published: true,
                    tags: vec!["a".to_string(), "b".to_string()],
                },
                content: "Body text".to_string(),
            })
        );
    }

    #[test]
    fn parses_without_frontmatter() {
        let result = parse_mdx_content_with_today("No front matter here", TODAY);

        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("title: required"));
        assert_eq!(result.data().unwrap().content, "No front matter here");
    }

    #[test]
    fn unpublished_post() {
        let source = "---\ntitle: Draft\npublished: false\n---\n";

        let post = parse_mdx_content_with_today(source, TODAY).ok().unwrap();

        assert!(!post.frontmatter.published);
        assert_eq!(post.frontmatter.date, TODAY);
    }

    #[test]
    fn ignores_comments_and_junk_lines() {
        let source = "---\n# draft notes\ntitle: Kept\nthis line is junk\n\n---\n## Body";

        let post = parse_mdx_content_with_today(source, TODAY).ok().unwrap();

        assert_eq!(post.frontmatter.title, "Kept");
        assert_eq!(post.content, "## Body");
    }

    #[test]
    fn converts_panics_to_failures() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown error");
    }

    #[test]
    fn pipeline_fault_becomes_failure() {
        let result: ParseResult<ParsedPost> = catch_faults(|| panic!("malformed array"));

        assert_eq!(
            result,
            ParseResult::Failure {
                error: "MDX parsing failed: malformed array".to_string(),
                partial: None,
            }
        );
    }

    #[test]
    fn successful_parse_passes_through() {
        let source = "---\ntitle: A\n---\nBody";

        let result = catch_faults(|| parse_mdx_content_with_today(source, TODAY));

        assert_eq!(result, parse_mdx_content_with_today(source, TODAY));
        assert!(result.is_success());
    }

    #[test]
    fn slug_from_path_works() {
        assert_eq!(slug_from_path("content/posts/hello-world.mdx"), "hello-world");
        assert_eq!(slug_from_path("hello.mdx"), "hello");
        assert_eq!(slug_from_path("notes/readme.md"), "readme.md");
        assert_eq!(slug_from_path("posts/"), "");
    }
}
