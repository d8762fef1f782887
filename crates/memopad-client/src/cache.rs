use memopad_types::models::Note;
use uuid::Uuid;

/// Local mirror of the caller's notes, in server order (most recently
/// updated first). The cache is only ever replaced wholesale from a fresh
/// `list` — never patched incrementally — so it cannot drift from the
/// server between refreshes.
#[derive(Debug, Default)]
pub struct NoteCache {
    notes: Vec<Note>,
}

impl NoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(title: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            content: String::new(),
            tags: vec![],
            color: "#ffffff".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn replace_all_swaps_the_whole_list() {
        let mut cache = NoteCache::new();
        cache.replace_all(vec![note("a"), note("b")]);
        assert_eq!(cache.len(), 2);

        let replacement = vec![note("c")];
        let id = replacement[0].id;
        cache.replace_all(replacement);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(id).unwrap().title, "c");

        cache.clear();
        assert!(cache.is_empty());
    }
}
