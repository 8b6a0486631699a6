//! Obsidian-style callouts.
//!
//! A block quote whose first line reads `[!TYPE] Optional title` is replaced
//! by a styled container:
//!
//! ```text
//! <div class="callout" data-callout="note">
//! <div class="callout-title"><span class="callout-icon">📝</span><span>Title</span></div>
//! <div class="callout-content"> ...remaining block content... </div>
//! </div>
//! ```
//!
//! Block quotes that do not carry the marker are left untouched.

use super::html_escape;
use super::tree::{Document, Node};
use once_cell::sync::Lazy;
use pulldown_cmark::Event;
use regex::Regex;
use std::collections::HashMap;

/// Glyph used for types missing from the icon table.
pub const DEFAULT_ICON: &str = "📝";

static CALLOUT_ICONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("note", "📝"),
        ("tip", "💡"),
        ("warning", "⚠️"),
        ("danger", "🔥"),
        ("info", "ℹ️"),
        ("question", "❓"),
        ("success", "✅"),
        ("failure", "❌"),
        ("bug", "🐛"),
        ("quote", "💬"),
        ("example", "📖"),
        ("abstract", "📄"),
        ("todo", "📋"),
    ])
});

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[!([A-Za-z]+)\][ \t]*(.*)$").expect("valid regex"));

const CONTENT_OPEN: &str = r#"<div class="callout-content">"#;
const DIV_CLOSE: &str = "</div>";

/// Icon for a lowercased callout type.
pub fn callout_icon(kind: &str) -> &'static str {
    CALLOUT_ICONS.get(kind).copied().unwrap_or(DEFAULT_ICON)
}

/// The `[!TYPE] Title` header of a callout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutMarker {
    /// Lowercased type, e.g. `note`.
    pub kind: String,
    /// Display title; the capitalized type when none was written.
    pub title: String,
    /// Whether a title followed the marker.
    pub explicit_title: bool,
}

impl CalloutMarker {
    /// Match the first line of `text`.
    ///
    /// Returns the marker and the byte offset where the text after the marker
    /// line begins.
    pub fn parse(text: &str) -> Option<(Self, usize)> {
        let (line, rest) = match text.find('\n') {
            Some(pos) => (&text[..pos], pos + 1),
            None => (text, text.len()),
        };

        let caps = MARKER_RE.captures(line)?;
        let kind = caps.get(1)?.as_str().to_lowercase();
        let written = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        let explicit_title = !written.is_empty();
        let title = if explicit_title {
            written.to_string()
        } else {
            capitalize(&kind)
        };

        Some((
            Self {
                kind,
                title,
                explicit_title,
            },
            rest,
        ))
    }

    pub fn icon(&self) -> &'static str {
        callout_icon(&self.kind)
    }

    fn render_open(&self) -> String {
        format!(r#"<div class="callout" data-callout="{}">"#, self.kind)
    }

    fn render_title(&self) -> String {
        format!(
            r#"<div class="callout-title"><span class="callout-icon">{}</span><span>{}</span></div>"#,
            self.icon(),
            html_escape(&self.title)
        )
    }
}

/// Rewrites callout block quotes into styled containers.
#[derive(Debug, Default)]
pub struct CalloutTransformer;

impl CalloutTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite every callout in `doc`, returning how many were rewritten.
    pub fn transform(&self, doc: &mut Document<'_>) -> usize {
        rewrite_children(&mut doc.children)
    }
}

fn rewrite_children(children: &mut Vec<Node<'_>>) -> usize {
    let mut rewritten = 0;
    let mut i = 0;

    while i < children.len() {
        let replacement = match &mut children[i] {
            Node::BlockQuote(body) => rewrite_block_quote(body),
            _ => None,
        };

        match replacement {
            Some(nodes) => {
                // Step over the spliced nodes; callout bodies are not revisited
                let inserted = nodes.len();
                children.splice(i..=i, nodes);
                i += inserted;
                rewritten += 1;
            }
            None => {
                if let Some(nested) = children[i].children_mut() {
                    rewritten += rewrite_children(nested);
                }
                i += 1;
            }
        }
    }

    rewritten
}

/// Build the replacement nodes for a callout block quote.
///
/// Returns `None`, leaving `body` untouched, when the quote is not a callout.
///
/// With an explicit title the first text node keeps the title in place of
/// the marker line. Without one the marker line is removed, along with a
/// hard break ending it, and a paragraph left holding only the emptied text
/// node is dropped.
fn rewrite_block_quote<'a>(body: &mut Vec<Node<'a>>) -> Option<Vec<Node<'a>>> {
    let (marker, drop_first) = {
        let inline = match body.first_mut() {
            Some(Node::Paragraph(inline)) => inline,
            _ => return None,
        };
        let text = match inline.first_mut() {
            Some(Node::Text(text)) => text,
            _ => return None,
        };

        let (marker, rest) = CalloutMarker::parse(text)?;
        if marker.explicit_title {
            *text = if rest < text.len() {
                format!("{}\n{}", marker.title, &text[rest..])
            } else {
                marker.title.clone()
            };
            (marker, false)
        } else {
            text.replace_range(..rest, "");
            let emptied = text.is_empty();
            if emptied && matches!(inline.get(1), Some(Node::Leaf(Event::HardBreak))) {
                inline.remove(1);
            }
            (marker, emptied && inline.len() == 1)
        }
    };

    if drop_first {
        body.remove(0);
    }

    let mut nodes = Vec::with_capacity(body.len() + 5);
    nodes.push(Node::Html(marker.render_open()));
    nodes.push(Node::Html(marker.render_title()));
    nodes.push(Node::html(CONTENT_OPEN));
    nodes.append(body);
    nodes.push(Node::html(DIV_CLOSE));
    nodes.push(Node::html(DIV_CLOSE));

    tracing::trace!(kind = %marker.kind, "rewrote callout");
    Some(nodes)
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
