//! Authentication endpoints.
//!
//! `login` and `register` hit public endpoints: they go out unsigned and a
//! rejection is an `ApiError::Authentication`, never a session reset.

use reqwest::Response;
use tracing::debug;

use crate::models::{RegisterRequest, TokenResponse, User};

use super::{ApiError, Transport};

pub struct AuthApi<'a> {
    transport: &'a Transport,
}

impl<'a> AuthApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Exchange credentials for a bearer token (`POST /auth/login`, form-encoded).
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = self.transport.url("/auth/login");
        debug!(url = %url, "Exchanging credentials");
        let response = self
            .transport
            .http()
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        let response = Self::accept(response).await?;
        Transport::decode(response, &url).await
    }

    /// Create an account (`POST /auth/register`). Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let url = self.transport.url("/auth/register");
        debug!(url = %url, "Registering user");
        let response = self.transport.http().post(&url).json(request).send().await?;
        let response = Self::accept(response).await?;
        Transport::decode(response, &url).await
    }

    /// Profile of the token holder (`GET /auth/me`, signed).
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.transport.get("/auth/me").await
    }

    async fn accept(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            return Err(ApiError::from_status(status, &body));
        }
        Err(ApiError::authentication(status, &body))
    }
}
