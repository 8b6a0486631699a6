//! Wiki links: `[[Target]]`, `[[Target|Alias]]` and `[[Target#Section]]`.
//!
//! Links point into the notes collection. Targets that are not a known note
//! still render, with an extra `new-wiki-link` class so the stylesheet can
//! flag them.

use super::html_escape;
use crate::slug::slugify;
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use std::collections::HashSet;

/// Transformer for wiki link syntax
pub struct WikilinkTransformer<'k> {
    known: &'k HashSet<String>,
    base: String,
}

impl<'k> WikilinkTransformer<'k> {
    /// `base` is the URL prefix notes live under, e.g. `/notes/`.
    pub fn new(known: &'k HashSet<String>, base: &str) -> Self {
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { known, base }
    }

    /// Transform events, converting wiki links to anchors
    ///
    /// Returns (transformed_events, outgoing_links)
    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> (Vec<Event<'a>>, Vec<String>) {
        let mut result = Vec::with_capacity(events.len());
        let mut outgoing = Vec::new();
        let mut in_code_block = false;
        let mut pending = String::new();

        for event in events {
            match event {
                Event::Text(text) if !in_code_block => {
                    pending.push_str(&text);
                    continue;
                }
                other => {
                    self.flush(&mut pending, &mut result, &mut outgoing);
                    match &other {
                        Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
                        Event::End(TagEnd::CodeBlock) => in_code_block = false,
                        _ => {}
                    }
                    result.push(other);
                }
            }
        }
        self.flush(&mut pending, &mut result, &mut outgoing);

        (result, outgoing)
    }

    fn flush<'a>(&self, pending: &mut String, out: &mut Vec<Event<'a>>, outgoing: &mut Vec<String>) {
        if pending.is_empty() {
            return;
        }
        let text = std::mem::take(pending);
        if text.contains("[[") && text.contains("]]") {
            self.process_wikilinks(&text, out, outgoing);
        } else {
            out.push(Event::Text(CowStr::from(text)));
        }
    }

    fn process_wikilinks<'a>(&self, text: &str, out: &mut Vec<Event<'a>>, outgoing: &mut Vec<String>) {
        let mut remaining = text;

        while let Some(start) = remaining.find("[[") {
            let Some(len) = remaining[start..].find("]]") else {
                break;
            };

            if start > 0 {
                out.push(Event::Text(CowStr::from(remaining[..start].to_string())));
            }

            let inner = &remaining[start + 2..start + len];
            match self.render_link(inner) {
                Some((html, slug)) => {
                    out.push(Event::InlineHtml(CowStr::from(html)));
                    outgoing.push(slug);
                }
                None => out.push(Event::Text(CowStr::from(
                    remaining[start..start + len + 2].to_string(),
                ))),
            }

            remaining = &remaining[start + len + 2..];
        }

        if !remaining.is_empty() {
            out.push(Event::Text(CowStr::from(remaining.to_string())));
        }
    }

    /// Render `[[inner]]` as an anchor, returning the markup and target slug.
    fn render_link(&self, inner: &str) -> Option<(String, String)> {
        let (target, display) = match inner.split_once('|') {
            Some((target, display)) => (target.trim(), Some(display.trim())),
            None => (inner.trim(), None),
        };

        let (target_base, fragment) = match target.split_once('#') {
            Some((base, frag)) => (base.trim(), Some(slugify(frag)).filter(|f| !f.is_empty())),
            None => (target, None),
        };

        let slug = target_base
            .split('/')
            .map(slugify)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        if slug.is_empty() {
            return None;
        }

        let mut href = format!("{}{}.html", self.base, slug);
        if let Some(frag) = &fragment {
            href.push('#');
            href.push_str(frag);
        }

        let class = if self.known.contains(&slug) {
            "wiki-link"
        } else {
            "wiki-link new-wiki-link"
        };
        let display = display.filter(|d| !d.is_empty()).unwrap_or(target);

        let html = format!(
            r#"<a href="{}" class="{}">{}</a>"#,
            html_escape(&href),
            class,
            html_escape(display)
        );
        Some((html, slug))
    }
}
