//! Slug generation and de-duplication.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid regex"));

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace and underscores with hyphens
/// - Remove punctuation (unicode letters and digits survive)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use inkwell_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    let cleaned = input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| match g {
            " " | "_" | "\t" | "\n" => Some("-"),
            _ => {
                let c = g.chars().next()?;
                (c == '-' || c.is_alphanumeric()).then_some(g)
            }
        })
        .collect::<String>();

    HYPHEN_RUNS
        .replace_all(&cleaned, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug for a content file: its path relative to the collection root,
/// extension dropped, each segment slugified.
///
/// ```
/// use inkwell_core::slug::path_slug;
/// use std::path::Path;
///
/// assert_eq!(path_slug(Path::new("Rust Notes/Ownership Rules.md")), "rust-notes/ownership-rules");
/// ```
pub fn path_slug(relative: &Path) -> String {
    let stem = relative.with_extension("");
    stem.components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Hands out unique slugs within one document, GitHub style:
/// `intro`, `intro-1`, `intro-2`, ...
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = match slugify(text) {
            s if s.is_empty() => "section".to_string(),
            s => s,
        };
        self.claim(base)
    }

    /// Reserve an explicit id so later generated slugs avoid it.
    pub fn claim(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        if self.seen.contains_key(&base) {
            loop {
                let count = self.seen.entry(base.clone()).or_default();
                *count += 1;
                candidate = format!("{}-{}", base, count);
                if !self.seen.contains_key(&candidate) {
                    break;
                }
            }
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}
