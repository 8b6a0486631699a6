//! Content model structs for the blog and notes collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Title used for notes that do not declare one
pub const UNTITLED_NOTE: &str = "Untitled note";

/// Frontmatter schema of the `blog` collection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlogFrontmatter {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub pub_date: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub updated_date: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub draft: bool,
}

/// Frontmatter schema of the `notes` collection; everything is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NoteFrontmatter {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub author: Option<String>,
}

/// A rendered blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// URL slug (e.g., "2024/hello-world")
    pub slug: String,

    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,

    /// Effective publication date: `pubDate`, else `date`, else build day
    pub pub_date: NaiveDate,

    /// The raw `date` field, preferred over `pub_date` when sorting
    pub date: Option<NaiveDate>,

    pub updated_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub draft: bool,

    /// Rendered HTML content
    pub content_html: String,

    /// Table of contents HTML
    pub toc_html: Option<String>,

    /// Slugs of notes this post links to
    pub outgoing_links: Vec<String>,

    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl BlogPost {
    /// Date used for ordering posts
    pub fn sort_date(&self) -> NaiveDate {
        self.date.unwrap_or(self.pub_date)
    }

    /// Output path relative to the output root
    pub fn output_rel_path(&self) -> String {
        format!("blog/{}.html", self.slug)
    }

    pub fn url_with_base(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.output_rel_path())
    }
}

/// A rendered note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteEntry {
    /// URL slug (e.g., "rust/ownership")
    pub slug: String,

    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,

    /// Rendered HTML content
    pub content_html: String,

    /// Table of contents HTML
    pub toc_html: Option<String>,

    /// Slugs of notes this note links to
    pub outgoing_links: Vec<String>,

    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl NoteEntry {
    /// First path segment of a nested note ("rust" for "rust/ownership")
    pub fn category(&self) -> Option<&str> {
        self.slug.split_once('/').map(|(category, _)| category)
    }

    /// Output path relative to the output root
    pub fn output_rel_path(&self) -> String {
        format!("notes/{}.html", self.slug)
    }

    pub fn url_with_base(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.output_rel_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(slug: &str) -> NoteEntry {
        NoteEntry {
            slug: slug.to_string(),
            title: UNTITLED_NOTE.to_string(),
            description: None,
            author: None,
            content_html: String::new(),
            toc_html: None,
            outgoing_links: vec![],
            source_path: None,
        }
    }

    #[test]
    fn test_note_category() {
        assert_eq!(note("rust/ownership").category(), Some("rust"));
        assert_eq!(note("a/b/c").category(), Some("a"));
        assert_eq!(note("standalone").category(), None);
    }

    #[test]
    fn test_note_urls() {
        let n = note("rust/ownership");
        assert_eq!(n.output_rel_path(), "notes/rust/ownership.html");
        assert_eq!(n.url_with_base("/site/"), "/site/notes/rust/ownership.html");
    }

    #[test]
    fn test_blog_frontmatter_uses_camel_case_keys() {
        let fm: BlogFrontmatter =
            serde_yaml::from_str("title: Hi\npubDate: 2024-03-01\nupdatedDate: 2024-04-01\n")
                .unwrap();
        assert_eq!(fm.pub_date.as_deref(), Some("2024-03-01"));
        assert_eq!(fm.updated_date.as_deref(), Some("2024-04-01"));
        assert!(!fm.draft);
    }
}
