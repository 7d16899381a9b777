//! Line-oriented metadata grammar and scalar coercion.
//!
//! This is deliberately not YAML. Each line is `key: value`; the value is
//! coerced to a [`MetaValue`] by looking at its shape. Lines that do not fit
//! the grammar are skipped without error.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A typed metadata value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    String(String),
    Array(Vec<String>),
    Bool(bool),
    Number(f64),
}

impl MetaValue {
    /// Coerce the value text of a metadata line.
    ///
    /// The text is expected to be trimmed already.
    pub fn coerce(text: &str) -> Self {
        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return Self::String(text[1..text.len() - 1].to_string());
        }

        if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
            return Self::Array(coerce_array(text));
        }

        match text {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::String(text.to_string()),
        }
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the array payload, if this is an array.
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Falsy values are replaced by defaults during validation.
    ///
    /// `false`, `0` and the empty string are falsy. Arrays never are, even
    /// when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Array(_) => true,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
        }
    }

    /// Short type name used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
        }
    }
}

/// Strict JSON first, then the lenient comma split.
fn coerce_array(text: &str) -> Vec<String> {
    if let Ok(items) = serde_json::from_str::<Vec<String>>(text) {
        return items;
    }

    text[1..text.len() - 1]
        .split(',')
        .map(|item| item.trim().replace('"', ""))
        .collect()
}

/// Renders the value back into metadata grammar.
///
/// Coercing the rendered text yields the same value again.
impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Array(items) => {
                let json = serde_json::to_string(items).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Parse one metadata line into a key/value pair.
///
/// Returns `None` for blank lines, `#` comments and lines without a `:`.
pub fn parse_line(line: &str) -> Option<(String, MetaValue)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once(':')?;

    Some((key.trim().to_string(), MetaValue::coerce(value.trim())))
}

/// Metadata record in document order.
///
/// Re-inserting a key replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every line of a metadata block.
    pub fn parse(block: &str) -> Self {
        let mut metadata = Self::new();
        for (key, value) in block.lines().filter_map(parse_line) {
            metadata.insert(key, value);
        }
        metadata
    }

    /// Insert a value, overwriting any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Look up a value, treating falsy values as absent.
    pub fn get_truthy(&self, key: &str) -> Option<&MetaValue> {
        self.get(key).filter(|value| value.is_truthy())
    }

    /// Iterate over entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn string(s: &str) -> MetaValue {
        MetaValue::String(s.to_string())
    }

    fn array(items: &[&str]) -> MetaValue {
        MetaValue::Array(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn coerces_quoted_strings() {
        assert_eq!(MetaValue::coerce("\"Hello\""), string("Hello"));
        assert_eq!(MetaValue::coerce("\"true\""), string("true"));
        assert_eq!(MetaValue::coerce("\"42\""), string("42"));
        assert_eq!(MetaValue::coerce("\"a \\n b\""), string("a \\n b"));
        assert_eq!(MetaValue::coerce("\"\""), string(""));
    }

    #[test]
    fn coerces_arrays() {
        assert_eq!(MetaValue::coerce("[\"a\", \"b\"]"), array(&["a", "b"]));
        assert_eq!(MetaValue::coerce("[a, b]"), array(&["a", "b"]));
        assert_eq!(MetaValue::coerce("[\"a\", b ]"), array(&["a", "b"]));
        assert_eq!(MetaValue::coerce("[1, 2]"), array(&["1", "2"]));
        assert_eq!(MetaValue::coerce("[]"), array(&[]));
        assert_eq!(MetaValue::coerce("[rust]"), array(&["rust"]));
    }

    #[test]
    fn coerces_booleans_and_numbers() {
        assert_eq!(MetaValue::coerce("true"), MetaValue::Bool(true));
        assert_eq!(MetaValue::coerce("false"), MetaValue::Bool(false));
        assert_eq!(MetaValue::coerce("42"), MetaValue::Number(42.0));
        assert_eq!(MetaValue::coerce("-1.5"), MetaValue::Number(-1.5));
        assert_eq!(MetaValue::coerce("1e3"), MetaValue::Number(1000.0));
    }

    #[test]
    fn falls_back_to_bare_strings() {
        assert_eq!(MetaValue::coerce("2024-01-15"), string("2024-01-15"));
        assert_eq!(MetaValue::coerce("bareword"), string("bareword"));
        assert_eq!(MetaValue::coerce("True"), string("True"));
        assert_eq!(MetaValue::coerce("42px"), string("42px"));
        assert_eq!(MetaValue::coerce("inf"), string("inf"));
        assert_eq!(MetaValue::coerce("NaN"), string("NaN"));
        assert_eq!(MetaValue::coerce(""), string(""));
        assert_eq!(MetaValue::coerce("\""), string("\""));
    }

    #[test]
    fn prefixed_literals_stay_strings() {
        assert_eq!(MetaValue::coerce("0x1F"), string("0x1F"));
        assert_eq!(MetaValue::coerce("0b1"), string("0b1"));
        assert_eq!(MetaValue::coerce("0o7"), string("0o7"));
    }

    #[test]
    fn parses_lines() {
        assert_eq!(
            parse_line("  title:  \"Hello\"  "),
            Some(("title".to_string(), string("Hello")))
        );
        assert_eq!(
            parse_line("url: https://example.com"),
            Some(("url".to_string(), string("https://example.com")))
        );
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# title: commented"), None);
        assert_eq!(parse_line("no separator here"), None);
    }

    #[test]
    fn last_write_wins() {
        let metadata = Metadata::parse("title: First\ndate: 2024-01-01\ntitle: Second");

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("title"), Some(&string("Second")));
        let keys: Vec<_> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "date"]);
    }

    #[test]
    fn skips_malformed_lines() {
        let metadata = Metadata::parse("title: Ok\n  nested\n\n# comment\n- item\npublished: false");

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get("published"), Some(&MetaValue::Bool(false)));
    }

    #[test]
    fn truthiness() {
        assert!(!string("").is_truthy());
        assert!(!MetaValue::Bool(false).is_truthy());
        assert!(!MetaValue::Number(0.0).is_truthy());
        assert!(array(&[]).is_truthy());
        assert!(string("0").is_truthy());
    }

    #[test]
    fn coercion_is_idempotent() {
        let values = [
            string("Hello"),
            string("true"),
            string("12"),
            string("say \"hi\""),
            string("[not an array]"),
            array(&["a", "b c", "d\"e"]),
            array(&[]),
            MetaValue::Bool(true),
            MetaValue::Bool(false),
            MetaValue::Number(42.0),
            MetaValue::Number(-0.25),
        ];

        for value in values {
            assert_eq!(MetaValue::coerce(&value.to_string()), value);
        }
    }

    #[test]
    fn serializes_in_document_order() {
        let metadata = Metadata::parse("title: \"A\"\ntags: [x]\ncount: 3");

        let json = serde_json::to_string(&metadata).unwrap();

        assert_eq!(json, r#"{"title":"A","tags":["x"],"count":3.0}"#);
    }
}
