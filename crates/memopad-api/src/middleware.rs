use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use memopad_types::api::Claims;

use crate::auth::AppState;
use crate::error::{ApiError, TOKEN_INVALID};

/// Extract and validate the bearer JWT, then expose the claims to handlers.
/// Missing header, malformed token, bad signature, and expiry all collapse
/// into the same AuthError.
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(auth) = bearer.map_err(|_| ApiError::Auth(TOKEN_INVALID.into()))?;

    let token_data = decode::<Claims>(
        auth.token(),
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Auth(TOKEN_INVALID.into()))?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}
