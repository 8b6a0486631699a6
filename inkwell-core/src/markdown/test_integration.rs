//! Integration tests for markdown processing

use super::*;

const ICONS: [(&str, &str); 13] = [
    ("NOTE", "📝"),
    ("TIP", "💡"),
    ("WARNING", "⚠️"),
    ("DANGER", "🔥"),
    ("INFO", "ℹ️"),
    ("QUESTION", "❓"),
    ("SUCCESS", "✅"),
    ("FAILURE", "❌"),
    ("BUG", "🐛"),
    ("QUOTE", "💬"),
    ("EXAMPLE", "📖"),
    ("ABSTRACT", "📄"),
    ("TODO", "📋"),
];

fn without_callouts() -> MarkdownProcessor {
    MarkdownProcessor::with_options(
        MarkdownConfig {
            callouts: false,
            ..MarkdownConfig::default()
        },
        TocConfig::default(),
        "/notes/",
    )
}

#[test]
fn test_callout_full_markup() {
    let html = MarkdownProcessor::new().convert_simple("> [!NOTE] Title\n> Content");

    assert_eq!(
        html,
        concat!(
            r#"<div class="callout" data-callout="note">"#,
            r#"<div class="callout-title"><span class="callout-icon">📝</span><span>Title</span></div>"#,
            r#"<div class="callout-content">"#,
            "\n<p>Title\nContent</p>\n",
            "</div></div>"
        )
    );
}

#[test]
fn test_every_type_gets_its_icon() {
    let processor = MarkdownProcessor::new();
    for (kind, icon) in ICONS {
        let html = processor.convert_simple(&format!("> [!{kind}] Hello"));
        let lower = kind.to_lowercase();

        assert!(
            html.contains(&format!(r#"data-callout="{lower}""#)),
            "{kind}: {html}"
        );
        assert!(
            html.contains(&format!(r#"<span class="callout-icon">{icon}</span><span>Hello</span>"#)),
            "{kind}: {html}"
        );
    }
}

#[test]
fn test_unknown_type_uses_default_icon() {
    let html = MarkdownProcessor::new().convert_simple("> [!CUSTOM] Hello");
    assert!(html.contains(r#"data-callout="custom""#));
    assert!(html.contains(r#"<span class="callout-icon">📝</span>"#));
}

#[test]
fn test_title_defaults_to_capitalized_type() {
    let processor = MarkdownProcessor::new();

    let html = processor.convert_simple("> [!note]\n> Body");
    assert!(html.contains("<span>Note</span>"));
    assert!(html.contains("<p>Body</p>"));

    let html = processor.convert_simple("> [!note] My Title\n>\n> Body");
    assert!(html.contains("<span>My Title</span>"));
    assert!(
        html.ends_with(concat!(r#"<div class="callout-content">"#, "\n<p>My Title</p>\n<p>Body</p>\n</div></div>")),
        "{html}"
    );

    let html = processor.convert_simple("> [!note]   \n>\n> Body");
    assert!(html.contains("<span>Note</span>"));
    assert!(html.contains(concat!(r#"<div class="callout-content">"#, "\n<p>Body</p>")));
}

#[test]
fn test_hard_break_after_marker_line() {
    let processor = MarkdownProcessor::new();

    let html = processor.convert_simple("> [!note] Title  \n> body");
    assert!(html.contains(concat!(r#"<div class="callout-content">"#, "\n<p>Title<br />\nbody</p>")), "{html}");

    for md in ["> [!note]  \n> body", "> [!note]\\\n> body"] {
        let html = processor.convert_simple(md);
        assert!(html.contains(concat!(r#"<div class="callout-content">"#, "\n<p>body</p>")), "{md}: {html}");
        assert!(!html.contains("<br />"), "{md}: {html}");
    }
}

#[test]
fn test_marker_detection_is_case_insensitive() {
    let processor = MarkdownProcessor::new();
    for marker in ["[!Note]", "[!NOTE]", "[!note]"] {
        let html = processor.convert_simple(&format!("> {marker} x"));
        assert!(html.contains(r#"data-callout="note""#), "{marker}");
    }
}

#[test]
fn test_content_paragraphs_preserved_in_order() {
    let md = "> [!tip]\n>\n> First paragraph.\n>\n> Second paragraph.";
    let html = MarkdownProcessor::new().convert_simple(md);

    let content = html
        .split(r#"<div class="callout-content">"#)
        .nth(1)
        .expect("content section");
    assert_eq!(
        content,
        "\n<p>First paragraph.</p>\n<p>Second paragraph.</p>\n</div></div>"
    );
}

#[test]
fn test_siblings_keep_their_positions() {
    let md = "Before.\n\n> [!warning] Careful\n> Body.\n\nAfter.";
    let html = MarkdownProcessor::new().convert_simple(md);

    assert!(html.starts_with("<p>Before.</p>\n<div class=\"callout\" data-callout=\"warning\">"));
    assert!(html.ends_with("</div></div>\n<p>After.</p>\n"));
}

#[test]
fn test_non_matching_quotes_render_unchanged() {
    let inputs = [
        "> plain quote",
        "> [!note missing bracket",
        "> [note] not a callout",
        "> *[!note]* emphasised first",
        ">\n> - [!note] list first",
        "> [!no te] space",
    ];

    let with = MarkdownProcessor::new();
    let without = without_callouts();
    for md in inputs {
        let html = with.convert_simple(md);
        assert_eq!(html, without.convert_simple(md), "{md}");
        assert!(html.contains("<blockquote>"), "{md}: {html}");
    }
}

#[test]
fn test_callouts_can_be_disabled() {
    let html = without_callouts().convert_simple("> [!NOTE] Title");
    assert!(html.contains("<blockquote>"));
    assert!(html.contains("[!NOTE] Title"));
}

#[test]
fn test_callout_inside_list_item() {
    let md = "- item\n\n  > [!info] Inside\n  > text";
    let html = MarkdownProcessor::new().convert_simple(md);

    assert!(html.contains(r#"<li>"#));
    assert!(html.contains(r#"data-callout="info""#));
    assert!(!html.contains("<blockquote>"));
}

#[test]
fn test_nested_callout_in_body_is_left_as_quote() {
    let md = "> [!note] Outer\n>\n> > [!tip] Inner";
    let html = MarkdownProcessor::new().convert_simple(md);

    assert!(html.contains(r#"data-callout="note""#));
    assert!(!html.contains(r#"data-callout="tip""#));
    assert!(html.contains("<blockquote>"));
}

#[test]
fn test_callout_body_keeps_rich_content() {
    let md = "> [!example] Code\n>\n> ```rust\n> fn main() {}\n> ```\n>\n> - one\n> - two";
    let html = MarkdownProcessor::new().convert_simple(md);

    assert!(html.contains(r#"<code class="language-rust">fn main() {}"#));
    assert!(html.contains("<li>one</li>"));
}

#[test]
fn test_wikilinks_resolve_inside_callouts() {
    let known = HashSet::from(["ownership".to_string()]);
    let md = "> [!note] Read this\n> See [[Ownership]].";
    let rendered = MarkdownProcessor::new().convert(md, &known);

    assert_eq!(rendered.outgoing_links, vec!["ownership"]);
    assert!(rendered
        .html
        .contains(r#"<a href="/notes/ownership.html" class="wiki-link">Ownership</a>"#));
}

#[test]
fn test_wikilinks_not_rewritten_in_code() {
    let md = "Use `[[literal]]` here.\n\n```\n[[also literal]]\n```";
    let rendered = MarkdownProcessor::new().convert(md, &HashSet::new());

    assert!(rendered.outgoing_links.is_empty());
    assert!(rendered.html.contains("<code>[[literal]]</code>"));
}

#[test]
fn test_headings_inside_callouts_get_ids() {
    let md = "> [!abstract]\n>\n> ## Summary";
    let rendered = MarkdownProcessor::new().convert(md, &HashSet::new());

    assert!(rendered.html.contains(r#"<h2 id="summary">"#));
    assert_eq!(rendered.headings.len(), 1);
}

#[test]
fn test_smart_punctuation_is_configurable() {
    let smart = MarkdownProcessor::new().convert_simple("\"quoted\"");
    assert!(smart.contains('\u{201c}'));

    let plain = MarkdownProcessor::with_options(
        MarkdownConfig {
            smartypants: false,
            ..MarkdownConfig::default()
        },
        TocConfig::default(),
        "/notes/",
    )
    .convert_simple("\"quoted\"");
    assert!(plain.contains("\"quoted\""));
    assert!(!plain.contains('\u{201c}'));
}
