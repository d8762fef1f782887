pub mod auth;
pub mod convert;
pub mod error;
pub mod memos;
pub mod middleware;
