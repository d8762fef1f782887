use reqwest::header;
use tracing::debug;
use uuid::Uuid;

use memopad_types::api::{
    AuthResponse, CreateMemoRequest, DeleteResponse, LoginRequest, MeResponse, RegisterRequest,
    UpdateMemoRequest,
};
use memopad_types::models::Note;

use crate::error::{ClientError, from_response};

/// Thin HTTP client over the REST surface. Holds the bearer token after
/// sign-in; every protected call attaches it as `Authorization: Bearer`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn bearer(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::SignedOut)
    }

    // -- Auth --

    /// Registers and stores the returned token for subsequent calls.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }

        let auth: AuthResponse = response.json().await?;
        debug!("Registered as {}", auth.user.email);
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Logs in and stores the returned token for subsequent calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }

        let auth: AuthResponse = response.json().await?;
        debug!("Logged in as {}", auth.user.email);
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn me(&self) -> Result<MeResponse, ClientError> {
        let response = self
            .http
            .get(self.url("/auth/me"))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()?))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }
        Ok(response.json().await?)
    }

    // -- Memos --

    pub async fn list_memos(&self) -> Result<Vec<Note>, ClientError> {
        let response = self
            .http
            .get(self.url("/memos"))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()?))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn create_memo(&self, req: &CreateMemoRequest) -> Result<Note, ClientError> {
        let response = self
            .http
            .post(self.url("/memos"))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()?))
            .json(req)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn update_memo(
        &self,
        memo_id: Uuid,
        req: &UpdateMemoRequest,
    ) -> Result<Note, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/memos/{}", memo_id)))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()?))
            .json(req)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn delete_memo(&self, memo_id: Uuid) -> Result<DeleteResponse, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/memos/{}", memo_id)))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()?))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(from_response(response).await);
        }
        Ok(response.json().await?)
    }
}
