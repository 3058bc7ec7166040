use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::api::{ApiError, Transport};
use crate::models::{RegisterRequest, User};
use crate::storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};

/// Snapshot of who is signed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Anonymous,
    Authenticated,
}

impl Session {
    /// State at startup, before `init` has run
    pub fn loading() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            token: None,
            loading: false,
        }
    }

    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            loading: false,
        }
    }

    /// A token without a user does not count as signed in.
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.user.is_some() && self.token.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    /// Get the bearer token if the session is authenticated
    pub fn token(&self) -> Option<&str> {
        if self.is_authenticated() {
            self.token.as_deref()
        } else {
            None
        }
    }

    pub fn user(&self) -> Option<&User> {
        if self.is_authenticated() {
            self.user.as_ref()
        } else {
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}

/// Owner of the session lifecycle: `init`, `login`, `register`, `logout`.
///
/// State is published on a `watch` channel shared with the transport, which
/// also resets it on 401. Lifecycle operations are serialized; a `logout`
/// issued during a `login` waits for the login to finish.
pub struct SessionStore {
    transport: Transport,
    lifecycle: Mutex<()>,
}

impl SessionStore {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            lifecycle: Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn current(&self) -> Session {
        self.transport.session_channel().borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.transport.session_channel().subscribe()
    }

    fn storage(&self) -> &dyn KeyValueStore {
        &**self.transport.storage()
    }

    fn publish(&self, session: Session) {
        self.transport.session_channel().send_replace(session);
    }

    /// Rehydrate from storage.
    ///
    /// A stored user that no longer deserializes is stale state: both entries
    /// are dropped and the session resolves anonymous. Headless contexts have
    /// nothing to rehydrate and return the current state untouched.
    pub async fn init(&self) -> Session {
        let _guard = self.lifecycle.lock().await;

        if !self.transport.config().context.is_interactive() {
            debug!("Headless context, skipping session rehydration");
            return self.current();
        }

        let resolved = match self.read_stored() {
            Some((token, user)) => {
                debug!(user_id = user.id, "Session restored from storage");
                Session::authenticated(user, token)
            }
            None => {
                self.clear_storage();
                Session::anonymous()
            }
        };
        self.publish(resolved.clone());
        resolved
    }

    fn read_stored(&self) -> Option<(String, User)> {
        let token = self.read(TOKEN_KEY)?;
        let raw_user = self.read(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some((token, user)),
            Err(e) => {
                warn!(error = %e, "Stored user is unreadable, discarding session");
                None
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage().get(key) {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read storage entry");
                None
            }
        }
    }

    fn clear_storage(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage().remove(key) {
                warn!(key, error = %e, "Failed to clear storage entry");
            }
        }
    }

    /// Exchange credentials, load the profile, then publish in one step.
    ///
    /// A rejected exchange leaves the session and storage untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let _guard = self.lifecycle.lock().await;
        self.login_locked(email, password).await
    }

    /// Create the account, then run the login sequence with the same credentials.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<User, ApiError> {
        let _guard = self.lifecycle.lock().await;

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.map(str::to_string),
        };
        let created = self.transport.auth().register(&request).await?;
        debug!(user_id = created.id, "Registered, logging in");

        self.login_locked(email, password).await
    }

    /// Clear storage and publish the anonymous session. Always succeeds.
    pub async fn logout(&self) {
        let _guard = self.lifecycle.lock().await;
        self.clear_storage();
        self.publish(Session::anonymous());
        info!("Logged out");
    }

    async fn login_locked(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let issued = self.transport.auth().login(email, password).await?;
        let token = issued.access_token;

        let previous = (self.read(TOKEN_KEY), self.read(USER_KEY));

        // Must land before /auth/me: the transport signs from storage
        self.storage().set(TOKEN_KEY, &token)?;

        let user = match self.fetch_profile().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Profile fetch failed after login");
                self.restore(&token, previous);
                return Err(e);
            }
        };

        self.publish(Session::authenticated(user.clone(), token));
        info!(user_id = user.id, "Logged in");
        Ok(user)
    }

    async fn fetch_profile(&self) -> Result<User, ApiError> {
        let user = self.transport.auth().current_user().await?;
        let serialized = serde_json::to_string(&user).map_err(StorageError::from)?;
        self.storage().set(USER_KEY, &serialized)?;
        Ok(user)
    }

    /// Put back the entries that were there before a failed login.
    ///
    /// Skipped when storage no longer holds the token this login wrote,
    /// i.e. a 401 reset already cleared it.
    fn restore(&self, issued: &str, previous: (Option<String>, Option<String>)) {
        if self.read(TOKEN_KEY).as_deref() != Some(issued) {
            return;
        }
        let (token, user) = previous;
        for (key, value) in [(TOKEN_KEY, token), (USER_KEY, user)] {
            let result = match value {
                Some(v) => self.storage().set(key, &v),
                None => self.storage().remove(key),
            };
            if let Err(e) = result {
                warn!(key, error = %e, "Failed to restore storage entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoRedirect;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn user() -> User {
        User {
            id: 1,
            email: "a@b.com".into(),
            full_name: Some("Ada".into()),
            is_active: true,
            subscription_tier: None,
            subscription_expires_at: None,
        }
    }

    fn session_store(config: ClientConfig) -> (SessionStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let transport = Transport::new(config, storage.clone(), Arc::new(NoRedirect)).unwrap();
        (SessionStore::new(transport), storage)
    }

    #[test]
    fn test_phase() {
        assert_eq!(Session::loading().phase(), SessionPhase::Loading);
        assert_eq!(Session::anonymous().phase(), SessionPhase::Anonymous);
        assert_eq!(
            Session::authenticated(user(), "T1".into()).phase(),
            SessionPhase::Authenticated
        );

        // Token without a user is anonymous
        let half = Session {
            user: None,
            token: Some("T1".into()),
            loading: false,
        };
        assert_eq!(half.phase(), SessionPhase::Anonymous);
        assert_eq!(half.token(), None);
    }

    #[test]
    fn test_starts_loading() {
        let (store, _) = session_store(ClientConfig::default());
        assert_eq!(store.current(), Session::loading());
    }

    #[tokio::test]
    async fn test_init_empty_storage_resolves_anonymous() {
        let (store, _) = session_store(ClientConfig::default());
        assert_eq!(store.init().await, Session::anonymous());
        assert_eq!(store.current(), Session::anonymous());
    }

    #[tokio::test]
    async fn test_init_restores_stored_session() {
        let (store, storage) = session_store(ClientConfig::default());
        storage.set(TOKEN_KEY, "T1").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        let first = store.init().await;
        assert_eq!(first, Session::authenticated(user(), "T1".into()));

        // Idempotent with unchanged storage
        let second = store.init().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_init_discards_unparseable_user() {
        let (store, storage) = session_store(ClientConfig::default());
        storage.set(TOKEN_KEY, "T1").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        assert_eq!(store.init().await, Session::anonymous());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_init_token_without_user_clears() {
        let (store, storage) = session_store(ClientConfig::default());
        storage.set(TOKEN_KEY, "T1").unwrap();

        assert_eq!(store.init().await, Session::anonymous());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_init_headless_is_noop() {
        let (store, storage) = session_store(ClientConfig::default().headless());
        storage.set(TOKEN_KEY, "T1").unwrap();

        assert_eq!(store.init().await, Session::loading());
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_always_anonymous() {
        let (store, storage) = session_store(ClientConfig::default());
        storage.set(TOKEN_KEY, "T1").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();
        store.init().await;

        let mut rx = store.subscribe();
        store.logout().await;

        assert_eq!(store.current(), Session::anonymous());
        assert!(storage.is_empty());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Session::anonymous());

        // Idempotent
        store.logout().await;
        assert_eq!(store.current(), Session::anonymous());
    }
}
