//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Main configuration struct matching the inkwell.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub include_drafts: bool,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    pub description: String,
    pub url: String,

    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content_dir")]
    pub content: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content_dir(),
            output: default_output_dir(),
        }
    }
}

/// Markdown pipeline switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Curly quotes, dashes and ellipses
    #[serde(default = "default_true")]
    pub smartypants: bool,

    /// Rewrite `> [!TYPE]` block quotes into callout containers
    #[serde(default = "default_true")]
    pub callouts: bool,

    /// Append `#` anchor links to headings
    #[serde(default = "default_true")]
    pub heading_anchors: bool,

    #[serde(default)]
    pub wiki_links: WikiLinkConfig,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            smartypants: true,
            callouts: true,
            heading_anchors: true,
            wiki_links: WikiLinkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiLinkConfig {
    /// Path under `base_url` that wiki links resolve into
    #[serde(default = "default_wiki_base")]
    pub base: String,
}

fn default_wiki_base() -> String {
    String::from("notes/")
}

impl Default for WikiLinkConfig {
    fn default() -> Self {
        Self {
            base: default_wiki_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocConfig {
    #[serde(default = "default_true")]
    pub enable: bool,

    /// Deepest heading level listed (1-6)
    #[serde(default = "default_toc_depth")]
    pub depth: u32,
}

fn default_toc_depth() -> u32 {
    2
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            enable: true,
            depth: default_toc_depth(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration with defaults everywhere except the site title
    pub fn default_for(title: &str) -> Self {
        Self {
            site: SiteConfig {
                title: title.to_string(),
                author: String::new(),
                description: String::new(),
                url: String::new(),
                lang: None,
            },
            paths: PathsConfig::default(),
            base_url: default_base_url(),
            markdown: MarkdownConfig::default(),
            toc: TocConfig::default(),
            include_drafts: false,
            config_path: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.toc.depth) {
            return Err(ConfigError::Invalid {
                field: "toc.depth",
                reason: format!("expected 1-6, got {}", self.toc.depth),
            });
        }
        Ok(())
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Get a nested config value using dotted path (e.g., "site.title")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["site", "title"] => Some(self.site.title.clone()),
            ["site", "author"] => Some(self.site.author.clone()),
            ["site", "description"] => Some(self.site.description.clone()),
            ["site", "url"] => Some(self.site.url.clone()),
            ["site", "lang"] => self.site.lang.clone(),
            ["base_url"] => Some(self.base_url.clone()),
            ["toc", "enable"] => Some(self.toc.enable.to_string()),
            ["toc", "depth"] => Some(self.toc.depth.to_string()),
            ["markdown", "callouts"] => Some(self.markdown.callouts.to_string()),
            _ => None,
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }

    /// URL prefix wiki links resolve into, e.g. "/notes/"
    pub fn wiki_link_base(&self) -> String {
        normalize_base_url(&format!(
            "{}{}",
            self.normalized_base_url(),
            self.markdown.wiki_links.base
        ))
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }
    format!("/{}/", segments.join("/"))
}
