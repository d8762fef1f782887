//! Row-to-wire conversions shared by the auth and memo handlers.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use memopad_db::models::{NoteRow, UserRow};
use memopad_db::tags;
use memopad_types::models::{Note, User};

pub fn user_from_row(row: UserRow) -> User {
    User {
        id: parse_uuid(&row.id, "user id"),
        email: row.email,
        name: row.name,
        created_at: parse_timestamp(&row.created_at, &row.id),
    }
}

pub fn note_from_row(row: NoteRow) -> Note {
    Note {
        id: parse_uuid(&row.id, "note id"),
        user_id: parse_uuid(&row.user_id, "note owner id"),
        title: row.title,
        content: row.content,
        tags: tags::decode(row.tags.as_deref()),
        color: row.color,
        created_at: parse_timestamp(&row.created_at, &row.id),
        updated_at: parse_timestamp(&row.updated_at, &row.id),
    }
}

fn parse_uuid(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", what, raw, e);
        Uuid::default()
    })
}

pub fn parse_timestamp(raw: &str, row_id: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite-native timestamps come back as "YYYY-MM-DD HH:MM:SS"
            // without timezone. Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on row '{}': {}", raw, row_id, e);
            DateTime::default()
        })
}
