//! Shared HTTP execution path for every backend call.
//!
//! Each request passes through two steps around `reqwest`:
//! - `sign`: attach the stored bearer token, if any
//! - `inspect`: map failures to `ApiError`; a 401 also resets the session
//!   and sends the user back to the login route

use std::sync::Arc;

use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

use super::ApiError;

/// Where the transport sends the user when a credential stops working.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, route: &str);
}

impl<F> LoginRedirect for F
where
    F: Fn(&str) + Send + Sync,
{
    fn redirect_to_login(&self, route: &str) {
        self(route)
    }
}

/// Redirect that does nothing, for headless callers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self, _route: &str) {}
}

/// HTTP client for the WealthFlow API.
/// Clone is cheap - the client, storage, redirect hook and session channel are shared.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    config: Arc<ClientConfig>,
    storage: Arc<dyn KeyValueStore>,
    redirect: Arc<dyn LoginRedirect>,
    session: Arc<watch::Sender<Session>>,
}

impl Transport {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn KeyValueStore>,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let (session, _) = watch::channel(Session::loading());

        Ok(Self {
            client,
            config: Arc::new(config),
            storage,
            redirect,
            session: Arc::new(session),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    pub(crate) fn session_channel(&self) -> &watch::Sender<Session> {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    // ===== Middleware =====

    /// Attach the stored token as a bearer credential.
    ///
    /// Reads storage rather than the in-memory session so requests issued
    /// before `init` or during `login` are signed too.
    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => request.bearer_auth(token),
            Ok(_) => request,
            Err(e) => {
                warn!(error = %e, "Failed to read token from storage, sending unsigned");
                request
            }
        }
    }

    /// Pass successful responses through; turn everything else into `ApiError`.
    async fn inspect(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ApiError::AuthorizationExpired);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, "Request failed");
        Err(ApiError::from_status(status, &body))
    }

    /// Drop the stored credential after the backend rejected it.
    ///
    /// Clears both storage entries and publishes the anonymous session. In an
    /// interactive context the login redirect runs last.
    pub fn expire_session(&self) {
        info!("Credential rejected, clearing stored session");
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear storage entry");
            }
        }
        self.session.send_replace(Session::anonymous());
        if self.config.context.is_interactive() {
            self.redirect.redirect_to_login(&self.config.login_route);
        }
    }

    /// Sign, send and inspect a request.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.sign(request).send().await?;
        self.inspect(response).await
    }

    pub(crate) async fn decode<T: DeserializeOwned>(
        response: Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    // ===== Verbs =====

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.execute(self.client.get(&url)).await?;
        Self::decode(response, &url).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self.execute(self.client.get(&url).query(query)).await?;
        Self::decode(response, &url).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self.execute(self.client.post(&url).json(body)).await?;
        Self::decode(response, &url).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(url = %url, "PUT");
        let response = self.execute(self.client.put(&url).json(body)).await?;
        Self::decode(response, &url).await
    }

    /// DELETE; whatever the backend echoes back is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE");
        self.execute(self.client.delete(&url)).await?;
        Ok(())
    }
}
