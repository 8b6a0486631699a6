//! Document tree built from pulldown-cmark events.
//!
//! pulldown-cmark hands out a flat event stream. Transforms that move whole
//! blocks around (callouts) are much simpler on a tree, so the processor
//! folds the stream into [`Document`], lets the transforms mutate it, and
//! flattens it back before HTML rendering.
//!
//! Adjacent text and soft breaks collapse into a single [`Node::Text`] whose
//! value carries `\n` at each soft break. The HTML writer emits the same bytes
//! for both shapes, so the fold is invisible in the output.

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

/// A node of a parsed markdown document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// A plain `>` block quote.
    BlockQuote(Vec<Node<'a>>),
    Paragraph(Vec<Node<'a>>),
    /// Literal text, soft breaks included as `\n`.
    Text(String),
    /// Raw markup, written verbatim by the renderer.
    Html(String),
    /// Any other container (headings, lists, emphasis, links, ...).
    Element { tag: Tag<'a>, children: Vec<Node<'a>> },
    /// Any other non-container event (inline code, breaks, rules, ...).
    Leaf(Event<'a>),
}

impl<'a> Node<'a> {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(value.into())
    }

    /// Paragraph holding a single text node.
    pub fn paragraph(value: impl Into<String>) -> Self {
        Node::Paragraph(vec![Node::text(value)])
    }

    pub fn children(&self) -> Option<&[Node<'a>]> {
        match self {
            Node::BlockQuote(children)
            | Node::Paragraph(children)
            | Node::Element { children, .. } => Some(children),
            Node::Text(_) | Node::Html(_) | Node::Leaf(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node<'a>>> {
        match self {
            Node::BlockQuote(children)
            | Node::Paragraph(children)
            | Node::Element { children, .. } => Some(children),
            Node::Text(_) | Node::Html(_) | Node::Leaf(_) => None,
        }
    }

    fn from_tag(tag: Tag<'a>, children: Vec<Node<'a>>) -> Self {
        match tag {
            Tag::BlockQuote(None) => Node::BlockQuote(children),
            Tag::Paragraph => Node::Paragraph(children),
            tag => Node::Element { tag, children },
        }
    }

    fn flatten_into(self, out: &mut Vec<Event<'a>>) {
        match self {
            Node::BlockQuote(children) => {
                out.push(Event::Start(Tag::BlockQuote(None)));
                flatten_all(children, out);
                out.push(Event::End(TagEnd::BlockQuote(None)));
            }
            Node::Paragraph(children) => {
                out.push(Event::Start(Tag::Paragraph));
                flatten_all(children, out);
                out.push(Event::End(TagEnd::Paragraph));
            }
            Node::Text(value) => {
                if !value.is_empty() {
                    out.push(Event::Text(CowStr::from(value)));
                }
            }
            Node::Html(value) => out.push(Event::Html(CowStr::from(value))),
            Node::Element { tag, children } => {
                let end = tag.to_end();
                out.push(Event::Start(tag));
                flatten_all(children, out);
                out.push(Event::End(end));
            }
            Node::Leaf(event) => out.push(event),
        }
    }
}

/// Root of a parsed markdown document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document<'a> {
    pub children: Vec<Node<'a>>,
}

impl<'a> Document<'a> {
    pub fn new(children: Vec<Node<'a>>) -> Self {
        Self { children }
    }

    /// Fold a balanced event stream into a tree.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut root: Vec<Node<'a>> = Vec::new();
        let mut open: Vec<(Tag<'a>, Vec<Node<'a>>)> = Vec::new();

        for event in events {
            match event {
                Event::Start(tag) => open.push((tag, Vec::new())),
                Event::End(_) => {
                    if let Some((tag, children)) = open.pop() {
                        let node = Node::from_tag(tag, children);
                        current(&mut open, &mut root).push(node);
                    }
                }
                Event::Text(text) => push_text(current(&mut open, &mut root), &text),
                Event::SoftBreak => push_text(current(&mut open, &mut root), "\n"),
                other => current(&mut open, &mut root).push(Node::Leaf(other)),
            }
        }

        // A truncated stream still yields every node seen so far
        while let Some((tag, children)) = open.pop() {
            let node = Node::from_tag(tag, children);
            current(&mut open, &mut root).push(node);
        }

        Self { children: root }
    }

    /// Flatten the tree back into an event stream for the HTML writer.
    pub fn into_events(self) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        flatten_all(self.children, &mut out);
        out
    }
}

fn current<'s, 'a>(
    open: &'s mut [(Tag<'a>, Vec<Node<'a>>)],
    root: &'s mut Vec<Node<'a>>,
) -> &'s mut Vec<Node<'a>> {
    match open.last_mut() {
        Some((_, children)) => children,
        None => root,
    }
}

fn push_text(children: &mut Vec<Node<'_>>, text: &str) {
    if let Some(Node::Text(existing)) = children.last_mut() {
        existing.push_str(text);
    } else {
        children.push(Node::text(text));
    }
}

fn flatten_all<'a>(children: Vec<Node<'a>>, out: &mut Vec<Event<'a>>) {
    for child in children {
        child.flatten_into(out);
    }
}
