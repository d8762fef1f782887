use serde::Deserialize;
use thiserror::Error;

/// Client-side mirror of the server's error taxonomy, plus transport
/// failures. Nothing here is retried automatically; callers surface the
/// error and leave prior state unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A signed-out session tried a server operation.
    #[error("not signed in")]
    SignedOut,

    #[error("backup write failed: {0}")]
    Backup(#[from] std::io::Error),
}

/// Wire shape of the server's JSON error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetails {
    #[allow(dead_code)]
    pub code: String,
    pub message: String,
}

/// Map a non-success response onto the taxonomy, draining the body for the
/// server's message when it has one.
pub(crate) async fn from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => status.to_string(),
    };

    match status.as_u16() {
        400 => ClientError::Validation(message),
        401 => ClientError::Auth(message),
        404 => ClientError::NotFound(message),
        409 => ClientError::Conflict(message),
        _ => ClientError::Server(message),
    }
}
