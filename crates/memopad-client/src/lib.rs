//! Client sync layer for the memopad service.
//!
//! Holds a local mirror of the caller's notes that is refreshed wholesale
//! after every mutation, derives pure views over it (search, filters, sort),
//! stages edits in drafts, and backs every save with a local write so a
//! server failure never loses the payload.

pub mod api;
pub mod backup;
pub mod cache;
pub mod error;
pub mod session;
pub mod sync;
pub mod views;

pub use api::ApiClient;
pub use backup::BackupStore;
pub use cache::NoteCache;
pub use error::ClientError;
pub use session::{Draft, EditSession, Session};
pub use sync::SyncedNotes;
pub use views::{NoteQuery, SortOrder};
