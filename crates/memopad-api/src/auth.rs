use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use memopad_db::Database;
use memopad_types::api::{AuthResponse, Claims, LoginRequest, MeResponse, RegisterRequest};
use memopad_types::models::User;

use crate::convert::user_from_row;
use crate::error::{ApiError, AUTH_FAILED};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

/// Session tokens expire 24 hours after issuance.
const TOKEN_TTL_HOURS: i64 = 24;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();
    let name = req.name.trim().to_string();

    // Validate input
    if !valid_email_shape(&email) {
        return Err(ApiError::Validation("email: not a valid email address".into()));
    }
    if req.password.len() < 6 {
        return Err(ApiError::Validation(
            "password: must be at least 6 characters".into(),
        ));
    }
    if name.chars().count() < 2 {
        return Err(ApiError::Validation(
            "name: must be at least 2 characters".into(),
        ));
    }

    // Check if email is taken
    if state.db.get_user_by_email(&email)?.is_some() {
        return Err(ApiError::Conflict("email is already registered".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))?
        .to_string();

    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    state.db.create_user(
        &user_id.to_string(),
        &email,
        &name,
        &password_hash,
        &now.to_rfc3339(),
    )?;

    let token = create_token(&state.jwt_secret, user_id, &email)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: User {
                id: user_id,
                email,
                name,
                created_at: now,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();

    // Unknown email and wrong password yield the identical error.
    let user = state
        .db
        .get_user_by_email(&email)?
        .ok_or_else(|| ApiError::Auth(AUTH_FAILED.into()))?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("stored hash unparseable: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Auth(AUTH_FAILED.into()))?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt user id '{}': {}", user.id, e)))?;

    let token = create_token(&state.jwt_secret, user_id, &user.email)?;

    Ok(Json(AuthResponse {
        token,
        user: user_from_row(user),
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_id(&claims.sub.to_string())?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;

    Ok(Json(MeResponse {
        user: user_from_row(user),
    }))
}

pub fn create_token(secret: &str, user_id: Uuid, email: &str) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("token encoding failed: {}", e)))
}

/// Same shape as the classic `/^[^\s@]+@[^\s@]+\.[^\s@]+$/` check: one `@`,
/// non-empty local part, domain with a dot and non-empty segments around it.
fn valid_email_shape(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tld)) => !head.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn email_shape_validation() {
        assert!(valid_email_shape("a@b.com"));
        assert!(valid_email_shape("first.last@sub.domain.org"));

        assert!(!valid_email_shape(""));
        assert!(!valid_email_shape("plain"));
        assert!(!valid_email_shape("no@dot"));
        assert!(!valid_email_shape("@b.com"));
        assert!(!valid_email_shape("a@.com"));
        assert!(!valid_email_shape("a@b."));
        assert!(!valid_email_shape("a b@c.com"));
        assert!(!valid_email_shape("a@b@c.com"));
    }

    #[test]
    fn token_round_trips_until_expiry() {
        let user_id = Uuid::new_v4();
        let token = create_token("secret", user_id, "a@b.com").unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.email, "a@b.com");
        assert!(data.claims.exp > chrono::Utc::now().timestamp() as usize);
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".into(),
            exp: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = create_token("secret", Uuid::new_v4(), "a@b.com").unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
