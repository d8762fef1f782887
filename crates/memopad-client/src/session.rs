//! Client-side state machines: signed-out ⇄ signed-in, and the per-note
//! viewing ⇄ editing cycle with staged drafts.

use memopad_types::api::UpdateMemoRequest;
use memopad_types::models::{Note, User};
use uuid::Uuid;

/// Gates all server operations. The token itself lives in the ApiClient;
/// this tracks who is signed in.
#[derive(Debug, Default)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn {
        user: User,
    },
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn { user } => Some(user),
            Self::SignedOut => None,
        }
    }
}

/// Staged edit fields, separate from the cache. Nothing here reaches the
/// server until an explicit save; dropping the session discards it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub color: String,
}

impl Draft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
            color: note.color.clone(),
        }
    }

    /// Comma-separated tag entry: trim each piece, drop empties.
    pub fn set_tag_input(&mut self, value: &str) {
        self.tags = parse_tag_input(value);
    }

    /// Renders the tag list back into the entry field.
    pub fn tag_input(&self) -> String {
        self.tags.join(", ")
    }
}

pub fn parse_tag_input(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// One note's viewing ⇄ editing transition. Created from the cached note,
/// committed with `into_request`, or simply dropped to cancel.
#[derive(Debug)]
pub struct EditSession {
    note_id: Uuid,
    pub draft: Draft,
}

impl EditSession {
    pub fn begin(note: &Note) -> Self {
        Self {
            note_id: note.id,
            draft: Draft::from_note(note),
        }
    }

    pub fn note_id(&self) -> Uuid {
        self.note_id
    }

    /// Commit: the full draft goes out, matching an editor that saves every
    /// field it staged.
    pub fn into_request(self) -> (Uuid, UpdateMemoRequest) {
        (
            self.note_id,
            UpdateMemoRequest {
                title: Some(self.draft.title),
                content: Some(self.draft.content),
                tags: Some(self.draft.tags),
                color: Some(self.draft.color),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note() -> Note {
        Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            color: "#ffffff".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn tag_input_parses_and_renders() {
        assert_eq!(parse_tag_input("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_tag_input("a,,  ,b"), vec!["a", "b"]);
        assert_eq!(parse_tag_input(""), Vec::<String>::new());

        let mut draft = Draft::from_note(&note());
        assert_eq!(draft.tag_input(), "a, b");
        draft.set_tag_input("x, y, z");
        assert_eq!(draft.tags, vec!["x", "y", "z"]);
    }

    #[test]
    fn draft_stages_without_touching_the_note() {
        let original = note();
        let mut session = EditSession::begin(&original);

        session.draft.title = "Changed".to_string();
        session.draft.set_tag_input("");

        // The source note is untouched until a save round-trips the server.
        assert_eq!(original.title, "Title");
        assert_eq!(original.tags, vec!["a", "b"]);

        let (id, request) = session.into_request();
        assert_eq!(id, original.id);
        assert_eq!(request.title.as_deref(), Some("Changed"));
        assert_eq!(request.tags, Some(vec![]));
    }

    #[test]
    fn session_state_machine() {
        let mut session = Session::default();
        assert!(!session.is_signed_in());
        assert!(session.user().is_none());

        session = Session::SignedIn {
            user: User {
                id: Uuid::new_v4(),
                email: "a@b.com".to_string(),
                name: "Tester".to_string(),
                created_at: Utc::now(),
            },
        };
        assert!(session.is_signed_in());
        assert_eq!(session.user().unwrap().email, "a@b.com");
    }
}
