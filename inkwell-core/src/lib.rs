//! # inkwell-core
//!
//! Core library for the inkwell blog generator.
//!
//! This crate turns the `blog` and `notes` content collections into HTML:
//! frontmatter parsing, the markdown pipeline (callouts, wiki links, heading
//! anchors, table of contents), collection queries and site configuration.

pub mod builder;
pub mod config;
pub mod content;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod slug;

pub use builder::{BuildError, Site, SiteBuilder, SiteManifest};
pub use config::Config;
pub use content::{blog_tags, note_categories, sorted_notes, sorted_posts, ContentStats};
pub use markdown::{CalloutTransformer, Document, MarkdownProcessor, Node, Rendered};
pub use models::{BlogFrontmatter, BlogPost, NoteEntry, NoteFrontmatter};
pub use slug::slugify;
