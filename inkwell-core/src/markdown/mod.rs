//! Markdown processing pipeline with custom extensions.

pub mod callouts;
pub mod tree;
pub mod wikilinks;

#[cfg(test)]
mod test_integration;

use crate::config::{Config, MarkdownConfig, TocConfig};
use crate::slug::Slugger;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;

pub use callouts::{callout_icon, CalloutMarker, CalloutTransformer};
pub use tree::{Document, Node};
pub use wikilinks::WikilinkTransformer;

/// A heading collected for ids and the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    pub level: u32,
    pub title: String,
    pub id: String,
}

/// Output of [`MarkdownProcessor::convert`]
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub html: String,
    /// Slugs of notes referenced through wiki links
    pub outgoing_links: Vec<String>,
    pub toc_html: Option<String>,
    pub headings: Vec<TocItem>,
}

/// Markdown processor with custom extensions
pub struct MarkdownProcessor {
    options: Options,
    markdown: MarkdownConfig,
    toc: TocConfig,
    wiki_base: String,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self::with_options(MarkdownConfig::default(), TocConfig::default(), "/notes/")
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_options(
            config.markdown.clone(),
            config.toc.clone(),
            &config.wiki_link_base(),
        )
    }

    pub fn with_options(markdown: MarkdownConfig, toc: TocConfig, wiki_base: &str) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        if markdown.smartypants {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        // ENABLE_GFM stays off: it turns `> [!NOTE]` into a typed block
        // quote and strips the marker before CalloutTransformer sees it.

        Self {
            options,
            markdown,
            toc,
            wiki_base: wiki_base.to_string(),
        }
    }

    /// Convert markdown to HTML with all custom transforms
    ///
    /// `known_notes` holds the slugs wiki links can resolve to.
    pub fn convert(&self, markdown: &str, known_notes: &HashSet<String>) -> Rendered {
        let parser = Parser::new_ext(markdown, self.options);
        let mut document = Document::from_events(parser);

        if self.markdown.callouts {
            let count = CalloutTransformer::new().transform(&mut document);
            if count > 0 {
                tracing::debug!("Rewrote {} callouts", count);
            }
        }

        let events = document.into_events();

        // Collect headings before wiki links turn heading text into markup
        let headings = collect_headings(&events);

        let wikilinks = WikilinkTransformer::new(known_notes, &self.wiki_base);
        let (events, outgoing_links) = wikilinks.transform(events);

        let events = attach_heading_ids(events, &headings);
        let events = if self.markdown.heading_anchors {
            add_heading_anchors(events)
        } else {
            events
        };

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        let toc_html = if self.toc.enable {
            render_toc(&headings, self.toc.depth)
        } else {
            None
        };

        Rendered {
            html: html_output,
            outgoing_links,
            toc_html,
            headings,
        }
    }

    /// Convert markdown to HTML without link tracking
    pub fn convert_simple(&self, markdown: &str) -> String {
        self.convert(markdown, &HashSet::new()).html
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_headings(events: &[Event<'_>]) -> Vec<TocItem> {
    let mut slugger = Slugger::new();
    let mut toc = Vec::new();
    let mut current: Option<(u32, Option<String>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((*level as u32, id.as_ref().map(|s| s.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, title)) = current.as_mut() {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit, title)) = current.take() {
                    let id = match explicit {
                        Some(id) => slugger.claim(id),
                        None => slugger.slug(&title),
                    };
                    toc.push(TocItem {
                        level,
                        title: title.trim().to_string(),
                        id,
                    });
                }
            }
            _ => {}
        }
    }

    toc
}

fn attach_heading_ids<'a>(events: Vec<Event<'a>>, headings: &[TocItem]) -> Vec<Event<'a>> {
    let mut heading_iter = headings.iter();

    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let id = heading_iter
                    .next()
                    .map(|h| CowStr::from(h.id.clone()))
                    .or(id);
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        })
        .collect()
}

fn add_heading_anchors(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut result = Vec::with_capacity(events.len());
    let mut current_id: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { ref id, .. }) => {
                current_id = id.as_ref().map(|s| s.to_string());
                result.push(event);
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some(id) = current_id.take() {
                    let anchor = format!(
                        r##"<a class="anchor-link" href="#{}" aria-label="Link to heading">#</a>"##,
                        html_escape(&id)
                    );
                    result.push(Event::InlineHtml(CowStr::from(anchor)));
                }
                result.push(Event::End(TagEnd::Heading(level)));
            }
            other => result.push(other),
        }
    }

    result
}

fn render_toc(headings: &[TocItem], depth: u32) -> Option<String> {
    let items: Vec<&TocItem> = headings.iter().filter(|h| h.level <= depth).collect();
    if items.is_empty() {
        return None;
    }

    let mut html = String::from(r#"<nav class="toc-nav"><ul class="toc-list">"#);
    for h in items {
        html.push_str(&format!(
            r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
            h.level,
            html_escape(&h.id),
            html_escape(&h.title)
        ));
    }
    html.push_str("</ul></nav>");
    Some(html)
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let processor = MarkdownProcessor::new();
        let html = processor.convert_simple("# Hello World\n\nThis is a **test**.");
        assert!(html.contains(r#"<h1 id="hello-world">"#));
        assert!(html.contains("<strong>test</strong>"));
    }

    #[test]
    fn test_tables() {
        let processor = MarkdownProcessor::new();
        let md = r#"
| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |
"#;
        let html = processor.convert_simple(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Header 1</th>"));
    }

    #[test]
    fn test_heading_anchor_appended() {
        let processor = MarkdownProcessor::new();
        let html = processor.convert_simple("## Setup");
        assert!(html.contains(
            r##"<h2 id="setup">Setup<a class="anchor-link" href="#setup" aria-label="Link to heading">#</a></h2>"##
        ));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let processor = MarkdownProcessor::new();
        let rendered = processor.convert("## Notes\n\n## Notes\n\n## Custom {#notes-1}", &HashSet::new());
        let ids: Vec<&str> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes-1", "notes-1-1"]);
    }

    #[test]
    fn test_explicit_heading_id_is_kept() {
        let processor = MarkdownProcessor::new();
        let html = processor.convert_simple("# Intro {#start}");
        assert!(html.contains(r#"<h1 id="start">"#));
    }

    #[test]
    fn test_toc_respects_depth() {
        let processor = MarkdownProcessor::new();
        let rendered = processor.convert("# One\n\n## Two\n\n### Three", &HashSet::new());
        let toc = rendered.toc_html.unwrap();
        assert!(toc.contains(r##"<li class="toc-level-1"><a href="#one">One</a></li>"##));
        assert!(toc.contains(r##"<li class="toc-level-2"><a href="#two">Two</a></li>"##));
        assert!(!toc.contains("Three"));
    }

    #[test]
    fn test_toc_disabled_or_empty() {
        let processor = MarkdownProcessor::with_options(
            MarkdownConfig::default(),
            TocConfig {
                enable: false,
                depth: 6,
            },
            "/notes/",
        );
        assert!(processor.convert("# One", &HashSet::new()).toc_html.is_none());

        let processor = MarkdownProcessor::new();
        assert!(processor.convert("no headings", &HashSet::new()).toc_html.is_none());
    }
}
