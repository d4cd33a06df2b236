//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::DocumentError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn default_published() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Syntax of a front-matter block, picked from its opening delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `---` ... `---`
    Yaml,
    /// `+++` ... `+++`
    Toml,
    /// `;;;` ... `;;;`
    Json,
}

impl Format {
    pub fn delimiter(self) -> &'static str {
        match self {
            Format::Yaml => "---",
            Format::Toml => "+++",
            Format::Json => ";;;",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
            Format::Json => "JSON",
        }
    }

    fn detect(content: &str) -> Option<Self> {
        [Format::Yaml, Format::Toml, Format::Json]
            .into_iter()
            .find(|format| content.starts_with(format.delimiter()))
    }
}

/// Front-matter data from a post, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        deserialize_with = "string_or_vec",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// Posts are published unless they say otherwise
    #[serde(default = "default_published", skip_serializing_if = "is_true")]
    pub published: bool,

    /// Additional custom fields, in document order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            date: None,
            author: None,
            tags: Vec::new(),
            published: true,
            extra: IndexMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), DocumentError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();
        let format = Format::detect(content).ok_or(DocumentError::MissingFrontMatter)?;

        let (block, body) = match format {
            Format::Json => split_inline(content, format)?,
            Format::Yaml | Format::Toml => split_lines(content, format)?,
        };
        let body = body.trim_start_matches(['\n', '\r']);

        if block.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = match format {
            Format::Yaml => serde_yaml::from_str::<FrontMatter>(block)
                .map_err(|e| invalid(format, e))?,
            Format::Toml => {
                let table = block.parse::<toml::Table>().map_err(|e| invalid(format, e))?;
                stringify_datetimes(toml::Value::Table(table))
                    .try_into::<FrontMatter>()
                    .map_err(|e| invalid(format, e))?
            }
            Format::Json => {
                serde_json::from_str::<FrontMatter>(block).map_err(|e| invalid(format, e))?
            }
        };

        tracing::trace!("Parsed {} front-matter: {:?}", format.name(), fm.title);
        Ok((fm, body))
    }

    /// Render as a YAML front-matter block, delimiters included
    pub fn to_yaml_block(&self) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n", yaml))
    }

    /// Parse the date field into a calendar date
    pub fn parse_date(&self) -> Result<NaiveDate, DocumentError> {
        let raw = self.date.as_deref().ok_or(DocumentError::MissingDate)?;
        parse_date_string(raw).ok_or_else(|| DocumentError::InvalidDate(raw.to_string()))
    }
}

fn invalid(format: Format, err: impl std::fmt::Display) -> DocumentError {
    DocumentError::InvalidFrontMatter {
        format: format.name(),
        message: err.to_string(),
    }
}

/// Split a block whose delimiters sit on lines of their own
fn split_lines(content: &str, format: Format) -> Result<(&str, &str), DocumentError> {
    let delimiter = format.delimiter();
    let rest = &content[delimiter.len()..];

    // The opening delimiter must be alone on its line
    let rest = match rest.find('\n') {
        Some(pos) if rest[..pos].trim().is_empty() => &rest[pos + 1..],
        None if rest.trim().is_empty() => {
            return Err(DocumentError::UnterminatedFrontMatter { delimiter })
        }
        _ => return Err(DocumentError::MissingFrontMatter),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(DocumentError::UnterminatedFrontMatter { delimiter })
}

/// Split a block closed by its delimiter at the end of a line
fn split_inline(content: &str, format: Format) -> Result<(&str, &str), DocumentError> {
    let delimiter = format.delimiter();
    let rest = &content[delimiter.len()..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed.ends_with(delimiter) {
            let end_pos = offset + trimmed.len() - delimiter.len();
            return Ok((&rest[..end_pos], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(DocumentError::UnterminatedFrontMatter { delimiter })
}

/// TOML dates are typed values; front-matter keeps them as text
fn stringify_datetimes(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::Datetime(dt) => toml::Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            toml::Value::Array(items.into_iter().map(stringify_datetimes).collect())
        }
        toml::Value::Table(table) => toml::Value::Table(
            table
                .into_iter()
                .map(|(key, value)| (key, stringify_datetimes(value)))
                .collect(),
        ),
        other => other,
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date string in various formats, keeping only the calendar date
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.date_naive());
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Inline build config with Terraform
date: 2024-01-15 10:30:00
tags:
  - terraform
  - cloud build
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Inline build config with Terraform"));
        assert_eq!(fm.tags, vec!["terraform", "cloud build"]);
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = "+++\ntitle = \"Triggers\"\ndate = 2024-03-01\ntags = [\"gcp\"]\n+++\nBody\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Triggers"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-01"));
        assert_eq!(fm.tags, vec!["gcp"]);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#";;;
{"title": "Test Post", "date": "2024-01-15", "tags": ["a", "b"]}
;;;

This is content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(body.starts_with("This is content."));
    }

    #[test]
    fn test_single_string_tags() {
        let content = "---\ntitle: One\ndate: 2024-01-15\ntags: Notes\n---\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_null_tags() {
        let content = "---\ntitle: One\ntags:\n---\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_extra_fields_keep_order() {
        let content = "---\ntitle: One\nzeta: 1\nalpha: two\n---\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\ndate: 2024-01-15\r\n---\r\nBody\r\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_missing_frontmatter_rejected() {
        let err = FrontMatter::parse("# Just markdown\n").unwrap_err();
        assert!(matches!(err, DocumentError::MissingFrontMatter));
    }

    #[test]
    fn test_unterminated_frontmatter_rejected() {
        let err = FrontMatter::parse("---\ntitle: Never closed\n\nBody").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnterminatedFrontMatter { delimiter: "---" }
        ));
    }

    #[test]
    fn test_unterminated_toml_rejected() {
        let err = FrontMatter::parse("+++\ntitle = \"Open\"\n\nBody").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnterminatedFrontMatter { delimiter: "+++" }
        ));
    }

    #[test]
    fn test_unterminated_json_rejected() {
        let err = FrontMatter::parse(";;;\n{\"title\": \"Open\"}\n\nBody").unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnterminatedFrontMatter { delimiter: ";;;" }
        ));
    }

    #[test]
    fn test_text_after_opening_delimiter_rejected() {
        let err = FrontMatter::parse("--- title: x\ndate: 2024-01-15\n---\n").unwrap_err();
        assert!(matches!(err, DocumentError::MissingFrontMatter));

        let err = FrontMatter::parse("+++ title = 1\n+++\n").unwrap_err();
        assert!(matches!(err, DocumentError::MissingFrontMatter));
    }

    #[test]
    fn test_trailing_space_after_opening_delimiter_allowed() {
        let (fm, body) = FrontMatter::parse("--- \ntitle: T\ndate: 2024-1-5\n---\nBody").unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(fm.parse_date().unwrap(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_json_delimiter_inside_value() {
        let content = ";;;\n{\"title\": \"a;;;b\", \"date\": \"2024-01-15\"}\n;;;\nBody\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("a;;;b"));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_json_single_line_block() {
        let (fm, body) = FrontMatter::parse(";;;{\"title\": \"Inline\"};;;\nBody").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Inline"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_prose_block_rejected() {
        let content = "---\n- just a list\n- of things\n---\nBody";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::InvalidFrontMatter { format: "YAML", .. }
        ));
    }

    #[test]
    fn test_closing_delimiter_must_be_its_own_line() {
        let content = "---\ntitle: Dashes\n---- not a delimiter\n---\nBody";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for raw in [
            "2024-01-15",
            "2024/01/15",
            "2024-01-15 10:30:00",
            "2024-01-15 10:30",
            "2024-01-15T10:30:00",
            "2024-01-15T10:30:00+02:00",
            "2024-01-15T10:30:00Z",
        ] {
            assert_eq!(parse_date_string(raw), Some(expected), "{}", raw);
        }
        assert_eq!(parse_date_string("2024-02-30"), None);
        assert_eq!(parse_date_string("last tuesday"), None);
    }

    #[test]
    fn test_parse_date_errors() {
        let fm = FrontMatter::default();
        assert!(matches!(fm.parse_date(), Err(DocumentError::MissingDate)));

        let fm = FrontMatter {
            date: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(matches!(fm.parse_date(), Err(DocumentError::InvalidDate(d)) if d == "soon"));
    }

    #[test]
    fn test_yaml_block_reparses() {
        let fm = FrontMatter {
            title: Some("Colons: everywhere".to_string()),
            date: Some("2024-01-15".to_string()),
            tags: vec!["terraform".to_string()],
            ..Default::default()
        };

        let block = fm.to_yaml_block().unwrap();
        let (parsed, body) = FrontMatter::parse(&block).unwrap();
        assert_eq!(parsed, fm);
        assert_eq!(body, "");
    }
}
