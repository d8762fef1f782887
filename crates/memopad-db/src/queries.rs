use crate::Database;
use crate::models::{NoteRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        name: &str,
        password_hash: &str,
        created_at: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, name, password, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, email, name, password_hash, created_at),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    // -- Notes --

    pub fn insert_note(&self, note: &NoteRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO notes (id, user_id, title, content, tags, color, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    note.id,
                    note.user_id,
                    note.title,
                    note.content,
                    note.tags,
                    note.color,
                    note.created_at,
                    note.updated_at
                ],
            )?;
            Ok(())
        })
    }

    /// All notes owned by `user_id`, most recently updated first.
    pub fn list_notes(&self, user_id: &str) -> Result<Vec<NoteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, content, tags, color, created_at, updated_at
                 FROM notes
                 WHERE user_id = ?1
                 ORDER BY updated_at DESC",
            )?;

            let rows = stmt
                .query_map([user_id], note_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Fetch a note only if it is owned by `user_id`. Used as the ownership
    /// check before update/delete; absence and wrong owner are
    /// indistinguishable to the caller.
    pub fn get_note_owned(&self, note_id: &str, user_id: &str) -> Result<Option<NoteRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, content, tags, color, created_at, updated_at
                 FROM notes
                 WHERE id = ?1 AND user_id = ?2",
            )?;

            let row = stmt.query_row([note_id, user_id], note_from_row).optional()?;
            Ok(row)
        })
    }

    /// Full-field replacement; callers merge partial updates beforehand.
    pub fn update_note(
        &self,
        note_id: &str,
        title: &str,
        content: &str,
        tags: Option<&str>,
        color: &str,
        updated_at: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE notes SET title = ?2, content = ?3, tags = ?4, color = ?5, updated_at = ?6
                 WHERE id = ?1",
                rusqlite::params![note_id, title, content, tags, color, updated_at],
            )?;
            Ok(())
        })
    }

    pub fn delete_note(&self, note_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM notes WHERE id = ?1", [note_id])?;
            Ok(())
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is always a literal from this crate, never user input.
    let sql = format!(
        "SELECT id, email, name, password, created_at FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                name: row.get(2)?,
                password: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn note_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<NoteRow, rusqlite::Error> {
    Ok(NoteRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        tags: row.get(4)?,
        color: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn seed_user(db: &Database, id: &str, email: &str) {
        db.create_user(id, email, "Tester", "hash", "2026-01-01T00:00:00Z")
            .unwrap();
    }

    fn seed_note(db: &Database, id: &str, user_id: &str, title: &str, updated_at: &str) {
        db.insert_note(&NoteRow {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            content: String::new(),
            tags: None,
            color: "#ffffff".to_string(),
            created_at: updated_at.to_string(),
            updated_at: updated_at.to_string(),
        })
        .unwrap();
    }

    #[test]
    fn user_lookup_by_email_and_id() {
        let db = test_db();
        seed_user(&db, "u1", "a@example.com");

        let by_email = db.get_user_by_email("a@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, "u1");
        assert_eq!(by_email.name, "Tester");

        let by_id = db.get_user_by_id("u1").unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");

        assert!(db.get_user_by_email("b@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected_by_unique_constraint() {
        let db = test_db();
        seed_user(&db, "u1", "a@example.com");
        let err = db.create_user("u2", "a@example.com", "Other", "hash", "2026-01-01T00:00:00Z");
        assert!(err.is_err());
    }

    #[test]
    fn list_orders_by_updated_at_desc() {
        let db = test_db();
        seed_user(&db, "u1", "a@example.com");
        seed_note(&db, "n1", "u1", "first", "2026-01-01T10:00:00Z");
        seed_note(&db, "n2", "u1", "second", "2026-01-02T10:00:00Z");
        seed_note(&db, "n3", "u1", "third", "2026-01-01T12:00:00Z");

        let notes = db.list_notes("u1").unwrap();
        let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "third", "first"]);
    }

    #[test]
    fn notes_are_owner_scoped() {
        let db = test_db();
        seed_user(&db, "u1", "a@example.com");
        seed_user(&db, "u2", "b@example.com");
        seed_note(&db, "n1", "u1", "mine", "2026-01-01T10:00:00Z");

        assert_eq!(db.list_notes("u2").unwrap().len(), 0);
        assert!(db.get_note_owned("n1", "u2").unwrap().is_none());
        assert!(db.get_note_owned("n1", "u1").unwrap().is_some());
    }

    #[test]
    fn update_replaces_fields_and_bumps_timestamp() {
        let db = test_db();
        seed_user(&db, "u1", "a@example.com");
        seed_note(&db, "n1", "u1", "before", "2026-01-01T10:00:00Z");

        db.update_note(
            "n1",
            "after",
            "new content",
            Some(r#"["a","b"]"#),
            "#f0ede8",
            "2026-01-03T10:00:00Z",
        )
        .unwrap();

        let note = db.get_note_owned("n1", "u1").unwrap().unwrap();
        assert_eq!(note.title, "after");
        assert_eq!(note.content, "new content");
        assert_eq!(note.tags.as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(note.color, "#f0ede8");
        assert_eq!(note.updated_at, "2026-01-03T10:00:00Z");
        // created_at untouched
        assert_eq!(note.created_at, "2026-01-01T10:00:00Z");
    }

    #[test]
    fn delete_removes_note() {
        let db = test_db();
        seed_user(&db, "u1", "a@example.com");
        seed_note(&db, "n1", "u1", "gone", "2026-01-01T10:00:00Z");

        db.delete_note("n1").unwrap();
        assert!(db.get_note_owned("n1", "u1").unwrap().is_none());
        assert_eq!(db.list_notes("u1").unwrap().len(), 0);
    }
}
