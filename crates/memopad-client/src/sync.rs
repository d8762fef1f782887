//! Orchestrates the API client, the cache, the session state, and the
//! backup store into the sync behavior the views sit on: every mutation is
//! pushed to the server, backed up locally, and followed by a wholesale
//! cache refresh.

use tracing::warn;
use uuid::Uuid;

use memopad_types::api::{CreateMemoRequest, UpdateMemoRequest};
use memopad_types::models::{DEFAULT_COLOR, DEFAULT_TITLE, Note, User};

use crate::api::ApiClient;
use crate::backup::BackupStore;
use crate::cache::NoteCache;
use crate::error::ClientError;
use crate::session::{EditSession, Session};

pub struct SyncedNotes {
    api: ApiClient,
    cache: NoteCache,
    session: Session,
    backup: Option<BackupStore>,
}

impl SyncedNotes {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
            cache: NoteCache::new(),
            session: Session::SignedOut,
            backup: None,
        }
    }

    /// Attach the local fallback store; saves are then dual-written.
    pub fn with_backup(mut self, store: BackupStore) -> Self {
        self.backup = Some(store);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notes(&self) -> &[Note] {
        self.cache.notes()
    }

    // -- Session --

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, ClientError> {
        let auth = self.api.register(email, password, name).await?;
        self.session = Session::SignedIn {
            user: auth.user.clone(),
        };
        self.refresh().await?;
        Ok(auth.user)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        let auth = self.api.login(email, password).await?;
        self.session = Session::SignedIn {
            user: auth.user.clone(),
        };
        self.refresh().await?;
        Ok(auth.user)
    }

    /// Drops the token and the mirrored notes; drafts die with their
    /// sessions.
    pub fn sign_out(&mut self) {
        self.api.clear_token();
        self.session = Session::SignedOut;
        self.cache.clear();
    }

    // -- Sync --

    /// Re-fetch-and-replace: the cache only ever changes to match a fresh
    /// server listing.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let notes = self.api.list_memos().await?;
        self.cache.replace_all(notes);
        Ok(())
    }

    pub async fn create(&mut self, req: CreateMemoRequest) -> Result<Note, ClientError> {
        match self.api.create_memo(&req).await {
            Ok(note) => {
                self.record_backup(&note, true);
                self.refresh().await?;
                Ok(note)
            }
            Err(e) => {
                // Primary store failed; the payload survives locally.
                let fallback = provisional_note(&req, self.owner_id());
                self.record_backup(&fallback, false);
                Err(e)
            }
        }
    }

    pub async fn update(
        &mut self,
        memo_id: Uuid,
        req: UpdateMemoRequest,
    ) -> Result<Note, ClientError> {
        match self.api.update_memo(memo_id, &req).await {
            Ok(note) => {
                self.record_backup(&note, true);
                self.refresh().await?;
                Ok(note)
            }
            Err(e) => {
                // Merge against the cached note when we have it; otherwise
                // keep the raw request fields against the id so even an
                // uncached update survives locally.
                let fallback = match self.cache.get(memo_id) {
                    Some(existing) => merged_note(existing, &req),
                    None => orphan_note(memo_id, &req, self.owner_id()),
                };
                self.record_backup(&fallback, false);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, memo_id: Uuid) -> Result<(), ClientError> {
        self.api.delete_memo(memo_id).await?;
        self.refresh().await
    }

    // -- Editing --

    /// viewing → editing for a cached note.
    pub fn begin_edit(&self, memo_id: Uuid) -> Option<EditSession> {
        self.cache.get(memo_id).map(EditSession::begin)
    }

    /// editing → viewing via explicit save. Cancel is just dropping the
    /// session; nothing unsaved ever reaches the server.
    pub async fn save_edit(&mut self, session: EditSession) -> Result<Note, ClientError> {
        let (memo_id, request) = session.into_request();
        self.update(memo_id, request).await
    }

    fn owner_id(&self) -> Uuid {
        self.session.user().map(|u| u.id).unwrap_or_default()
    }

    fn record_backup(&self, note: &Note, synced: bool) {
        if let Some(store) = &self.backup {
            if let Err(e) = store.record(note, synced) {
                warn!("Backup write failed for note {}: {}", note.id, e);
            }
        }
    }
}

/// A locally-built note standing in for a create the server never saw.
/// Applies the same field defaults the server would have.
fn provisional_note(req: &CreateMemoRequest, owner: Uuid) -> Note {
    let now = chrono::Utc::now();
    Note {
        id: Uuid::new_v4(),
        user_id: owner,
        title: match &req.title {
            Some(t) if !t.is_empty() => t.clone(),
            _ => DEFAULT_TITLE.to_string(),
        },
        content: req.content.clone().unwrap_or_default(),
        tags: req.tags.clone().unwrap_or_default(),
        color: match &req.color {
            Some(c) if !c.is_empty() => c.clone(),
            _ => DEFAULT_COLOR.to_string(),
        },
        created_at: now,
        updated_at: now,
    }
}

/// Fallback for a failed update of a note missing from the cache: the raw
/// request fields against the id, with nothing to merge into.
fn orphan_note(memo_id: Uuid, req: &UpdateMemoRequest, owner: Uuid) -> Note {
    let now = chrono::Utc::now();
    Note {
        id: memo_id,
        user_id: owner,
        title: req.title.clone().unwrap_or_default(),
        content: req.content.clone().unwrap_or_default(),
        tags: req.tags.clone().unwrap_or_default(),
        color: req.color.clone().unwrap_or_default(),
        created_at: now,
        updated_at: now,
    }
}

/// The note as it would look had the server applied this partial update.
fn merged_note(existing: &Note, req: &UpdateMemoRequest) -> Note {
    Note {
        id: existing.id,
        user_id: existing.user_id,
        title: req.title.clone().unwrap_or_else(|| existing.title.clone()),
        content: req
            .content
            .clone()
            .unwrap_or_else(|| existing.content.clone()),
        tags: req.tags.clone().unwrap_or_else(|| existing.tags.clone()),
        color: req.color.clone().unwrap_or_else(|| existing.color.clone()),
        created_at: existing.created_at,
        updated_at: chrono::Utc::now(),
    }
}
