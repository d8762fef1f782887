/// Database row types — these map directly to SQLite rows.
/// Distinct from memopad-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub created_at: String,
}

pub struct NoteRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    /// Raw tag column: JSON array text or NULL.
    pub tags: Option<String>,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}
