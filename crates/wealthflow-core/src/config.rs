//! Client configuration shared by the transport and the session store.

use std::time::Duration;

/// Default backend mount point (FastAPI `API_V1_STR` on the dev server)
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Route the front end shows when a session expires
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "WEALTHFLOW_API_URL";

/// Where the client is running.
///
/// Session rehydration and the login redirect only make sense in front of a
/// user; batch or server code runs `Headless`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    #[default]
    Interactive,
    Headless,
}

impl ExecutionContext {
    pub fn is_interactive(self) -> bool {
        self == ExecutionContext::Interactive
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub login_route: String,
    pub context: ExecutionContext,
    /// Left unset, reqwest's defaults apply.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            context: ExecutionContext::default(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Defaults, with `WEALTHFLOW_API_URL` applied when set and non-empty
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn headless(mut self) -> Self {
        self.context = ExecutionContext::Headless;
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Base URL without a trailing slash, ready for `format!("{}{}", base, path)`
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}
