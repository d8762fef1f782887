//! Pure projections over the cached note list.
//!
//! Everything here recomputes from the cache and never touches the server;
//! applying the same view twice yields the same result as applying it once,
//! and filters compose in any order.

use memopad_types::models::Note;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Title,
}

/// Case-insensitive substring match across title, content, and tags.
/// An empty term matches everything.
pub fn search(notes: &[Note], term: &str) -> Vec<Note> {
    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
                || note.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Notes carrying exactly this tag.
pub fn filter_tag(notes: &[Note], tag: &str) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.tags.iter().any(|t| t == tag))
        .cloned()
        .collect()
}

/// Notes with exactly this color token.
pub fn filter_color(notes: &[Note], color: &str) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.color == color)
        .cloned()
        .collect()
}

pub fn sort(notes: &[Note], order: SortOrder) -> Vec<Note> {
    let mut sorted: Vec<Note> = notes.to_vec();
    match order {
        SortOrder::Newest => sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortOrder::Oldest => sorted.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        SortOrder::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
    }
    sorted
}

/// Distinct tags across all notes, sorted.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<String> = notes.iter().flat_map(|n| n.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}

/// The full view pipeline: search, then the single-tag and single-color
/// filters, then sort. Mirrors what a list screen derives on every render.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    pub search: String,
    pub tag: Option<String>,
    pub color: Option<String>,
    pub sort: SortOrder,
}

impl NoteQuery {
    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        let mut result = search(notes, &self.search);
        if let Some(tag) = &self.tag {
            result = filter_tag(&result, tag);
        }
        if let Some(color) = &self.color {
            result = filter_color(&result, color);
        }
        sort(&result, self.sort)
    }

    /// Back to the unfiltered, newest-first view.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn note(title: &str, content: &str, tags: &[&str], color: &str, day: u32) -> Note {
        let ts = Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap();
        Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            color: color.to_string(),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn fixture() -> Vec<Note> {
        vec![
            note("Groceries", "milk and eggs", &["home"], "#ffffff", 1),
            note("Standup notes", "review Groceries PR", &["work", "daily"], "#f0ede8", 3),
            note("Ideas", "side project", &["work"], "#ffffff", 2),
        ]
    }

    #[test]
    fn search_spans_title_content_and_tags() {
        let notes = fixture();

        let by_title = search(&notes, "groceries");
        assert_eq!(by_title.len(), 2); // title match + content match

        let by_tag = search(&notes, "daily");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].title, "Standup notes");

        assert_eq!(search(&notes, "").len(), 3);
        assert_eq!(search(&notes, "nope").len(), 0);
    }

    #[test]
    fn tag_and_color_filters_are_exact() {
        let notes = fixture();
        assert_eq!(filter_tag(&notes, "work").len(), 2);
        assert_eq!(filter_tag(&notes, "wor").len(), 0);
        assert_eq!(filter_color(&notes, "#ffffff").len(), 2);
    }

    #[test]
    fn sorts_cover_all_orders() {
        let notes = fixture();

        let newest: Vec<String> = sort(&notes, SortOrder::Newest)
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(newest, vec!["Standup notes", "Ideas", "Groceries"]);

        let oldest: Vec<String> = sort(&notes, SortOrder::Oldest)
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(oldest, vec!["Groceries", "Ideas", "Standup notes"]);

        let by_title: Vec<String> = sort(&notes, SortOrder::Title)
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(by_title, vec!["Groceries", "Ideas", "Standup notes"]);
    }

    #[test]
    fn filters_are_idempotent() {
        let notes = fixture();

        let once = filter_tag(&notes, "work");
        let twice = filter_tag(&once, "work");
        assert_eq!(once.len(), twice.len());

        let sorted_once = sort(&notes, SortOrder::Title);
        let sorted_twice = sort(&sorted_once, SortOrder::Title);
        let titles = |v: &[Note]| v.iter().map(|n| n.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&sorted_once), titles(&sorted_twice));
    }

    #[test]
    fn filters_compose_in_any_order() {
        let notes = fixture();

        let tag_then_color = filter_color(&filter_tag(&notes, "work"), "#ffffff");
        let color_then_tag = filter_tag(&filter_color(&notes, "#ffffff"), "work");
        assert_eq!(tag_then_color.len(), 1);
        assert_eq!(tag_then_color.len(), color_then_tag.len());
        assert_eq!(tag_then_color[0].title, color_then_tag[0].title);
    }

    #[test]
    fn query_pipeline_combines_everything() {
        let notes = fixture();
        let query = NoteQuery {
            search: "o".into(), // matches all three
            tag: Some("work".into()),
            color: None,
            sort: SortOrder::Oldest,
        };

        let result = query.apply(&notes);
        let titles: Vec<String> = result.into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Ideas", "Standup notes"]);

        let mut query = query;
        query.clear();
        assert_eq!(query.apply(&notes).len(), 3);
    }

    #[test]
    fn all_tags_is_distinct_and_sorted() {
        let notes = fixture();
        assert_eq!(all_tags(&notes), vec!["daily", "home", "work"]);
    }
}
