//! Local backup store — the fallback half of the two-path write.
//!
//! Every save is recorded here in addition to the server attempt, so a
//! failed request never loses the payload. Records carry the full note
//! field set, identical to the server schema, newest first, capped.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use memopad_types::models::Note;

/// Oldest records fall off past this point.
pub const MAX_RECORDS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRecord {
    pub note: Note,
    pub saved_at: DateTime<Utc>,
    /// Whether the server accepted this save. `false` records are the ones
    /// a future sync would replay.
    pub synced: bool,
}

pub struct BackupStore {
    path: PathBuf,
}

impl BackupStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unreadable file is an empty store, never an error —
    /// reads must not block saves.
    pub fn load(&self) -> Vec<BackupRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read backup store {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Corrupt backup store {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    /// Prepend a record and rewrite the file, dropping anything past the cap.
    pub fn record(&self, note: &Note, synced: bool) -> io::Result<()> {
        let mut records = self.load();
        records.insert(
            0,
            BackupRecord {
                note: note.clone(),
                saved_at: Utc::now(),
                synced,
            },
        );
        records.truncate(MAX_RECORDS);

        let json = serde_json::to_string(&records).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }

    /// Records the server never accepted.
    pub fn pending(&self) -> Vec<BackupRecord> {
        self.load().into_iter().filter(|r| !r.synced).collect()
    }
}
