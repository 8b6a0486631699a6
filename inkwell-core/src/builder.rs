//! Site building logic - discovers both collections and renders them.

use crate::{
    config::Config,
    content::{blog_tags, note_categories, sorted_notes, sorted_posts, ContentStats},
    frontmatter::{
        parse_blog_frontmatter, parse_note_frontmatter, parse_optional_date, FrontmatterError,
    },
    markdown::MarkdownProcessor,
    models::*,
    slug::path_slug,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Collection directory names under the content root
pub const BLOG_DIR: &str = "blog";
pub const NOTES_DIR: &str = "notes";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate slug in {collection}: {slug}")]
    DuplicateSlug {
        collection: &'static str,
        slug: String,
    },
}

/// A markdown file read from disk, not yet rendered
struct SourceFile<F> {
    path: PathBuf,
    slug: String,
    frontmatter: F,
    body: String,
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
    today: NaiveDate,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        let processor = MarkdownProcessor::from_config(&config);
        Self {
            config,
            processor,
            today: Local::now().date_naive(),
        }
    }

    /// Fallback publication date for posts without `pubDate` or `date`
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Build both collections
    pub fn build(&self) -> Result<Site, BuildError> {
        let content_dir = self.config.content_dir();
        tracing::info!("Reading content from {:?}", content_dir);

        let post_sources =
            self.read_collection(&content_dir.join(BLOG_DIR), BLOG_DIR, parse_blog_frontmatter)?;
        let note_sources =
            self.read_collection(&content_dir.join(NOTES_DIR), NOTES_DIR, parse_note_frontmatter)?;

        let post_sources: Vec<_> = post_sources
            .into_iter()
            .filter(|source| {
                let keep = self.config.include_drafts || !source.frontmatter.draft;
                if !keep {
                    tracing::debug!("Skipping draft: {}", source.slug);
                }
                keep
            })
            .collect();

        // Wiki links resolve against every note slug
        let known_notes: HashSet<String> =
            note_sources.iter().map(|source| source.slug.clone()).collect();

        let mut posts = Vec::with_capacity(post_sources.len());
        for source in post_sources {
            match self.render_post(source, &known_notes) {
                Ok(post) => posts.push(post),
                Err((path, e)) => tracing::error!("Failed to parse {:?}: {}", path, e),
            }
        }

        let notes: Vec<NoteEntry> = note_sources
            .into_iter()
            .map(|source| self.render_note(source, &known_notes))
            .collect();

        tracing::info!("Built {} posts and {} notes", posts.len(), notes.len());

        Ok(Site { posts, notes })
    }

    /// Read and parse every markdown file of one collection
    fn read_collection<F>(
        &self,
        dir: &Path,
        collection: &'static str,
        parse: impl Fn(&str) -> Result<(F, String), FrontmatterError>,
    ) -> Result<Vec<SourceFile<F>>, BuildError> {
        if !dir.is_dir() {
            tracing::debug!("No {} collection at {:?}", collection, dir);
            return Ok(Vec::new());
        }

        let mut sources: Vec<SourceFile<F>> = Vec::new();
        let mut seen = HashSet::new();

        for path in discover_markdown_files(dir) {
            let content = fs::read_to_string(&path)?;
            let (frontmatter, body) = match parse(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::error!("Failed to parse {:?}: {}", path, e);
                    // Continue with other files
                    continue;
                }
            };

            let slug = path_slug(path.strip_prefix(dir).unwrap_or(path.as_path()));
            if !seen.insert(slug.clone()) {
                tracing::warn!("Duplicate slug: {}", slug);
                return Err(BuildError::DuplicateSlug { collection, slug });
            }

            sources.push(SourceFile {
                path,
                slug,
                frontmatter,
                body,
            });
        }

        tracing::debug!("Found {} {} entries", sources.len(), collection);
        Ok(sources)
    }

    fn render_post(
        &self,
        source: SourceFile<BlogFrontmatter>,
        known_notes: &HashSet<String>,
    ) -> Result<BlogPost, (PathBuf, FrontmatterError)> {
        let fm = source.frontmatter;
        let (pub_date, date, updated_date) =
            post_dates(&fm).map_err(|e| (source.path.clone(), e))?;

        let rendered = self.processor.convert(&source.body, known_notes);

        Ok(BlogPost {
            slug: source.slug,
            title: fm.title,
            description: fm.description,
            author: fm.author,
            pub_date: pub_date.or(date).unwrap_or(self.today),
            date,
            updated_date,
            tags: fm.tags,
            categories: fm.categories,
            draft: fm.draft,
            content_html: rendered.html,
            toc_html: rendered.toc_html,
            outgoing_links: rendered.outgoing_links,
            source_path: Some(source.path),
        })
    }

    fn render_note(
        &self,
        source: SourceFile<NoteFrontmatter>,
        known_notes: &HashSet<String>,
    ) -> NoteEntry {
        let fm = source.frontmatter;
        let rendered = self.processor.convert(&source.body, known_notes);

        NoteEntry {
            slug: source.slug,
            title: fm
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNTITLED_NOTE.to_string()),
            description: fm.description,
            author: fm.author,
            content_html: rendered.html,
            toc_html: rendered.toc_html,
            outgoing_links: rendered.outgoing_links,
            source_path: Some(source.path),
        }
    }
}

/// The (pubDate, date, updatedDate) fields of a post
fn post_dates(
    fm: &BlogFrontmatter,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>, Option<NaiveDate>), FrontmatterError> {
    Ok((
        parse_optional_date("pubDate", fm.pub_date.as_deref())?,
        parse_optional_date("date", fm.date.as_deref())?,
        parse_optional_date("updatedDate", fm.updated_date.as_deref())?,
    ))
}

/// Markdown files under `dir`, in a stable order
fn discover_markdown_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "md" || ext == "markdown")
        })
        .map(|e| e.into_path())
        .collect()
}

/// Rendered site content
#[derive(Debug, Clone, Default)]
pub struct Site {
    pub posts: Vec<BlogPost>,
    pub notes: Vec<NoteEntry>,
}

impl Site {
    pub fn find_post(&self, slug: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn find_note(&self, slug: &str) -> Option<&NoteEntry> {
        self.notes.iter().find(|n| n.slug == slug)
    }

    pub fn stats(&self) -> ContentStats {
        ContentStats::collect(&self.posts, &self.notes)
    }

    /// Machine-readable index of the site, written as `index.json`
    pub fn manifest(&self, base_url: &str) -> SiteManifest {
        SiteManifest {
            posts: sorted_posts(&self.posts, None)
                .into_iter()
                .map(|p| PostSummary {
                    slug: p.slug.clone(),
                    url: p.url_with_base(base_url),
                    title: p.title.clone(),
                    description: p.description.clone(),
                    pub_date: p.pub_date,
                    tags: p.tags.clone(),
                    categories: p.categories.clone(),
                })
                .collect(),
            notes: sorted_notes(&self.notes, None)
                .into_iter()
                .map(|n| NoteSummary {
                    slug: n.slug.clone(),
                    url: n.url_with_base(base_url),
                    title: n.title.clone(),
                    category: n.category().map(str::to_string),
                })
                .collect(),
            tags: blog_tags(&self.posts),
            categories: note_categories(&self.notes),
            stats: self.stats(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteManifest {
    pub posts: Vec<PostSummary>,
    pub notes: Vec<NoteSummary>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub stats: ContentStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub pub_date: NaiveDate,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub category: Option<String>,
}
