//! Post frontmatter schema and validation.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::date::{is_iso_date, today};
use crate::error::{MdxError, Violations};
use crate::value::{MetaValue, Metadata};

const REQUIRED: &str = "required";
const DATE_FORMAT: &str = "must be in YYYY-MM-DD format";
const UNTITLED: &str = "Untitled";

/// Validated frontmatter of a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontmatter {
    /// Post title (required, non-empty)
    pub title: String,

    /// Summary shown in listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date (`YYYY-MM-DD`)
    pub date: String,

    /// Last revision date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Whether the post is listed
    #[serde(default = "default_true")]
    pub published: bool,

    /// Tags in authoring order
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Frontmatter plus the document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedPost {
    pub frontmatter: PostFrontmatter,
    pub content: String,
}

/// A fully assembled post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    pub slug: String,
    pub frontmatter: PostFrontmatter,
    pub content: String,
}

/// Outcome of parsing or validating a post.
///
/// Failures are values. A failure may carry a best-effort `partial` record
/// with defaults filled in so callers can still render something.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult<T> {
    Success(T),
    Failure { error: String, partial: Option<T> },
}

impl<T> ParseResult<T> {
    pub(crate) fn failure(error: MdxError, partial: Option<T>) -> Self {
        Self::Failure {
            error: error.to_string(),
            partial,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The validated value, if validation succeeded.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// The validated value or, failing that, the partial one.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure { partial, .. } => partial.as_ref(),
        }
    }

    /// Owned variant of [`ParseResult::data`].
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure { partial, .. } => partial,
        }
    }

    /// The error message of a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

impl<T: Serialize> Serialize for ParseResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Success(data) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            Self::Failure { error, partial } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(partial) = partial {
                    map.serialize_entry("data", partial)?;
                }
            }
        }
        map.end()
    }
}

/// Validate a metadata record, defaulting a missing date to today.
pub fn validate(metadata: &Metadata, content: &str) -> ParseResult<ParsedPost> {
    validate_with_today(metadata, content, &today())
}

/// Validate a metadata record against the post schema.
///
/// All rules run before failing. A missing or falsy `date` is replaced by
/// `today` before the format check, so it never fails on its own.
pub fn validate_with_today(
    metadata: &Metadata,
    content: &str,
    today: &str,
) -> ParseResult<ParsedPost> {
    let mut violations = Violations::new();

    let title = match metadata.get("title") {
        Some(MetaValue::String(s)) if !s.is_empty() => Some(s.clone()),
        None | Some(MetaValue::String(_)) => {
            violations.push("title", REQUIRED);
            None
        }
        Some(other) => {
            violations.push("title", expected("string", other.kind()));
            None
        }
    };

    let description = optional_string(metadata, "description", &mut violations);

    let date = match metadata.get_truthy("date") {
        None => Some(today.to_string()),
        Some(MetaValue::String(s)) => {
            if !is_iso_date(s) {
                violations.push("date", DATE_FORMAT);
            }
            Some(s.clone())
        }
        Some(other) => {
            violations.push("date", expected("string", other.kind()));
            None
        }
    };

    let updated_at = optional_string(metadata, "updatedAt", &mut violations);
    if let Some(updated_at) = &updated_at {
        if !is_iso_date(updated_at) {
            violations.push("updatedAt", DATE_FORMAT);
        }
    }

    let published = !matches!(metadata.get("published"), Some(MetaValue::Bool(false)));

    let tags = match metadata.get_truthy("tags") {
        None => Some(Vec::new()),
        Some(MetaValue::Array(items)) => Some(items.clone()),
        Some(other) => {
            violations.push("tags", expected("array", other.kind()));
            None
        }
    };

    if violations.is_empty() {
        let frontmatter = PostFrontmatter {
            title: title.unwrap_or_default(),
            description,
            date: date.unwrap_or_default(),
            updated_at,
            published,
            tags: tags.unwrap_or_default(),
        };
        return ParseResult::Success(ParsedPost {
            frontmatter,
            content: content.to_string(),
        });
    }

    let partial = PostFrontmatter {
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        description,
        date: date.unwrap_or_else(|| today.to_string()),
        updated_at,
        published,
        tags: tags.unwrap_or_default(),
    };

    ParseResult::failure(
        MdxError::Schema(violations),
        Some(ParsedPost {
            frontmatter: partial,
            content: content.to_string(),
        }),
    )
}

/// A present value must be a string. Non-strings are reported and dropped.
fn optional_string(
    metadata: &Metadata,
    key: &str,
    violations: &mut Violations,
) -> Option<String> {
    match metadata.get(key)? {
        MetaValue::String(s) => Some(s.clone()),
        other => {
            violations.push(key, expected("string", other.kind()));
            None
        }
    }
}

fn expected(want: &str, got: &str) -> String {
    format!("expected {}, received {}", want, got)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate an already assembled post object.
///
/// Applies the frontmatter rules without any defaulting of `date`, plus a
/// non-empty `slug` and a string `content`. Failures carry no partial data.
pub fn validate_post_data(data: &Value) -> ParseResult<PostData> {
    let mut violations = Violations::new();

    let Some(object) = data.as_object() else {
        violations.push("(root)", expected("object", json_kind(data)));
        return ParseResult::failure(MdxError::PostData(violations), None);
    };

    let slug = required_string(object, "slug", "slug", &mut violations);

    let frontmatter = match object.get("frontmatter") {
        None => {
            violations.push("frontmatter", REQUIRED);
            None
        }
        Some(Value::Object(fields)) => check_frontmatter(fields, &mut violations),
        Some(other) => {
            violations.push("frontmatter", expected("object", json_kind(other)));
            None
        }
    };

    let content = match object.get("content") {
        Some(Value::String(s)) => Some(s.clone()),
        None => {
            violations.push("content", REQUIRED);
            None
        }
        Some(other) => {
            violations.push("content", expected("string", json_kind(other)));
            None
        }
    };

    match (slug, frontmatter, content) {
        (Some(slug), Some(frontmatter), Some(content)) if violations.is_empty() => {
            ParseResult::Success(PostData {
                slug,
                frontmatter,
                content,
            })
        }
        _ => ParseResult::failure(MdxError::PostData(violations), None),
    }
}

fn check_frontmatter(fields: &Map<String, Value>, violations: &mut Violations) -> Option<PostFrontmatter> {
    let title = required_string(fields, "title", "frontmatter.title", violations);
    let description = optional_json_string(fields, "description", violations);

    let date = required_string(fields, "date", "frontmatter.date", violations);
    if let Some(date) = &date {
        if !is_iso_date(date) {
            violations.push("frontmatter.date", DATE_FORMAT);
        }
    }

    let updated_at = optional_json_string(fields, "updatedAt", violations);
    if let Some(updated_at) = &updated_at {
        if !is_iso_date(updated_at) {
            violations.push("frontmatter.updatedAt", DATE_FORMAT);
        }
    }

    let published = match fields.get("published") {
        None => Some(true),
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            violations.push("frontmatter.published", expected("boolean", json_kind(other)));
            None
        }
    };

    let tags = match fields.get("tags") {
        None => Some(Vec::new()),
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => tags.push(s.clone()),
                    other => violations.push(
                        format!("frontmatter.tags.{}", i),
                        expected("string", json_kind(other)),
                    ),
                }
            }
            Some(tags)
        }
        Some(other) => {
            violations.push("frontmatter.tags", expected("array", json_kind(other)));
            None
        }
    };

    Some(PostFrontmatter {
        title: title?,
        description,
        date: date?,
        updated_at,
        published: published?,
        tags: tags?,
    })
}

/// Missing and empty strings both count as missing.
fn required_string(
    fields: &Map<String, Value>,
    key: &str,
    path: &str,
    violations: &mut Violations,
) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        None | Some(Value::String(_)) => {
            violations.push(path, REQUIRED);
            None
        }
        Some(other) => {
            violations.push(path, expected("string", json_kind(other)));
            None
        }
    }
}

fn optional_json_string(
    fields: &Map<String, Value>,
    key: &str,
    violations: &mut Violations,
) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => {
            violations.push(format!("frontmatter.{}", key), expected("string", json_kind(other)));
            None
        }
    }
}
