//! Client library for the WealthFlow personal-finance API.
//!
//! - `storage`: injected key-value capability holding `token` and `user`
//! - `api`: the signing/401-aware `Transport` and typed resource clients
//! - `auth`: the `SessionStore` lifecycle built on top of the transport
//! - `models`: request and response types
//!
//! ```ignore
//! let storage = Arc::new(FileStore::in_cache_dir()?);
//! let transport = Transport::new(ClientConfig::from_env(), storage, Arc::new(NoRedirect))?;
//! let session = SessionStore::new(transport.clone());
//! session.init().await;
//! session.login("a@b.com", "secret").await?;
//! let goals = transport.savings_goals().list().await?;
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{ApiError, LoginRedirect, NoRedirect, Transport};
pub use auth::{Session, SessionPhase, SessionStore};
pub use config::{ClientConfig, ExecutionContext};
pub use storage::{FileStore, KeyValueStore, KeyringStore, MemoryStore, StorageError};
