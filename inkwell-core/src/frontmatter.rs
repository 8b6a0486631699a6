//! Frontmatter parsing from markdown files.

use crate::models::{BlogFrontmatter, NoteFrontmatter};
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid date in `{field}`: {value}")]
    InvalidDate { field: &'static str, value: String },
}

static FRONTMATTER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?$").expect("valid regex")
});

/// Split a document into its raw YAML frontmatter and markdown body
///
/// ```
/// use inkwell_core::frontmatter::split_frontmatter;
///
/// let (yaml, body) = split_frontmatter("---\ntitle: Hi\n---\n# Body\n");
/// assert_eq!(yaml, Some("title: Hi"));
/// assert_eq!(body, "# Body\n");
/// ```
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    match FRONTMATTER_REGEX.captures(content) {
        Some(caps) => {
            let yaml = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            (Some(yaml), body)
        }
        None => (None, content),
    }
}

/// Parse frontmatter into `T`, returning it with the markdown body.
/// Documents without a frontmatter block get `T::default()`.
pub fn parse_frontmatter<T>(content: &str) -> Result<(T, String), FrontmatterError>
where
    T: DeserializeOwned + Default,
{
    let (yaml, body) = split_frontmatter(content);
    let frontmatter = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)?,
        _ => T::default(),
    };
    Ok((frontmatter, body.to_string()))
}

/// Parse a blog post; `title` is required and must be non-empty
///
/// # Example
///
/// ```
/// use inkwell_core::frontmatter::parse_blog_frontmatter;
///
/// let content = "---\ntitle: My Post\npubDate: 2025-01-01\n---\n# Hello World\n";
///
/// let (fm, body) = parse_blog_frontmatter(content).unwrap();
/// assert_eq!(fm.title, "My Post");
/// assert_eq!(fm.pub_date, Some("2025-01-01".to_string()));
/// assert!(body.trim().starts_with("# Hello World"));
/// ```
pub fn parse_blog_frontmatter(content: &str) -> Result<(BlogFrontmatter, String), FrontmatterError> {
    let (frontmatter, body) = match parse_frontmatter::<BlogFrontmatter>(content) {
        Ok(parsed) => parsed,
        Err(FrontmatterError::YamlError(e)) if e.to_string().contains("missing field `title`") => {
            return Err(FrontmatterError::MissingField("title".to_string()));
        }
        Err(e) => return Err(e),
    };

    if frontmatter.title.trim().is_empty() {
        return Err(FrontmatterError::MissingField("title".to_string()));
    }

    Ok((frontmatter, body))
}

/// Parse a note; every field is optional
pub fn parse_note_frontmatter(content: &str) -> Result<(NoteFrontmatter, String), FrontmatterError> {
    parse_frontmatter(content)
}

/// Parse a frontmatter date: `YYYY-MM-DD` or RFC 3339
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FrontmatterError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| FrontmatterError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parse an optional frontmatter date
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, FrontmatterError> {
    value.map(|v| parse_date(field, v)).transpose()
}
