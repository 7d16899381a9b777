//! Error types for document parsing and validation.

use std::fmt;

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path (e.g. `frontmatter.tags.0`)
    pub path: String,

    /// What is wrong with the field
    pub message: String,
}

/// Every rule a record failed, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed rule.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(Violation {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Whether any violation concerns the given field path.
    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", violation.path, violation.message)?;
        }
        Ok(())
    }
}

/// Errors reported inside a failed [`ParseResult`](crate::ParseResult).
#[derive(Debug, thiserror::Error)]
pub enum MdxError {
    #[error("frontmatter validation failed: {0}")]
    Schema(Violations),

    #[error("post data validation failed: {0}")]
    PostData(Violations),

    #[error("MDX parsing failed: {0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_violations() {
        let mut violations = Violations::new();
        violations.push("title", "required");
        violations.push("date", "must be in YYYY-MM-DD format");

        assert_eq!(
            MdxError::Schema(violations).to_string(),
            "frontmatter validation failed: title: required, date: must be in YYYY-MM-DD format"
        );
    }

    #[test]
    fn finds_paths() {
        let mut violations = Violations::new();
        violations.push("frontmatter.title", "required");

        assert!(violations.contains_path("frontmatter.title"));
        assert!(!violations.contains_path("title"));
        assert_eq!(violations.len(), 1);
    }
}
