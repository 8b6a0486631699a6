//! Queries over the blog and notes collections.

use crate::models::{BlogPost, NoteEntry};
use serde::Serialize;
use std::collections::BTreeSet;

/// Posts newest first, optionally truncated to `limit`.
///
/// Posts are ordered by their `date` field when present, otherwise by the
/// effective publication date. Equal dates keep their input order.
pub fn sorted_posts(posts: &[BlogPost], limit: Option<usize>) -> Vec<&BlogPost> {
    let mut sorted: Vec<&BlogPost> = posts.iter().collect();
    sorted.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}

/// Notes ordered by title (case-insensitive), optionally limited to one category.
pub fn sorted_notes<'n>(notes: &'n [NoteEntry], category: Option<&str>) -> Vec<&'n NoteEntry> {
    let mut selected: Vec<&NoteEntry> = notes
        .iter()
        .filter(|note| match category {
            Some(category) => note.category() == Some(category),
            None => true,
        })
        .collect();
    selected.sort_by_cached_key(|note| note.title.to_lowercase());
    selected
}

/// Every tag used by any post, sorted and de-duplicated.
pub fn blog_tags(posts: &[BlogPost]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every note category (first slug segment of nested notes), sorted.
pub fn note_categories(notes: &[NoteEntry]) -> Vec<String> {
    notes
        .iter()
        .filter_map(|note| note.category().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Collection counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub posts: usize,
    pub notes: usize,
    pub tags: usize,
    pub categories: usize,
}

impl ContentStats {
    pub fn collect(posts: &[BlogPost], notes: &[NoteEntry]) -> Self {
        Self {
            posts: posts.len(),
            notes: notes.len(),
            tags: blog_tags(posts).len(),
            categories: note_categories(notes).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn post(slug: &str, pub_date: NaiveDate, date: Option<NaiveDate>, tags: &[&str]) -> BlogPost {
        BlogPost {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: None,
            author: None,
            pub_date,
            date,
            updated_date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            categories: vec![],
            draft: false,
            content_html: String::new(),
            toc_html: None,
            outgoing_links: vec![],
            source_path: None,
        }
    }

    fn note(slug: &str, title: &str) -> NoteEntry {
        NoteEntry {
            slug: slug.to_string(),
            title: title.to_string(),
            description: None,
            author: None,
            content_html: String::new(),
            toc_html: None,
            outgoing_links: vec![],
            source_path: None,
        }
    }

    #[test]
    fn test_sorted_posts_newest_first() {
        let posts = vec![
            post("old", day(2023, 1, 1), None, &[]),
            post("new", day(2024, 6, 1), None, &[]),
            post("dated", day(2020, 1, 1), Some(day(2024, 1, 1)), &[]),
        ];
        let slugs: Vec<&str> = sorted_posts(&posts, None).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "dated", "old"]);
    }

    #[test]
    fn test_sorted_posts_limit_and_ties() {
        let posts = vec![
            post("a", day(2024, 1, 1), None, &[]),
            post("b", day(2024, 1, 1), None, &[]),
            post("c", day(2022, 1, 1), None, &[]),
        ];
        let slugs: Vec<&str> = sorted_posts(&posts, Some(2))
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_sorted_notes_by_title_and_category() {
        let notes = vec![
            note("rust/zeta", "zeta"),
            note("rust/alpha", "Alpha"),
            note("go/beta", "Beta"),
            note("loose", "Loose"),
        ];

        let all: Vec<&str> = sorted_notes(&notes, None).iter().map(|n| n.title.as_str()).collect();
        assert_eq!(all, vec!["Alpha", "Beta", "Loose", "zeta"]);

        let rust: Vec<&str> = sorted_notes(&notes, Some("rust"))
            .iter()
            .map(|n| n.slug.as_str())
            .collect();
        assert_eq!(rust, vec!["rust/alpha", "rust/zeta"]);
    }

    #[test]
    fn test_tags_and_categories() {
        let posts = vec![
            post("a", day(2024, 1, 1), None, &["rust", "blog"]),
            post("b", day(2024, 1, 2), None, &["rust", "astro"]),
        ];
        let notes = vec![note("rust/x", "x"), note("rust/y", "y"), note("go/z", "z"), note("top", "t")];

        assert_eq!(blog_tags(&posts), vec!["astro", "blog", "rust"]);
        assert_eq!(note_categories(&notes), vec!["go", "rust"]);
        assert_eq!(
            ContentStats::collect(&posts, &notes),
            ContentStats {
                posts: 2,
                notes: 4,
                tags: 3,
                categories: 2
            }
        );
    }
}
