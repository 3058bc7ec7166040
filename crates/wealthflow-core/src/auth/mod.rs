//! Authentication module for managing the user session.
//!
//! `SessionStore` owns the lifecycle (`init`, `login`, `register`, `logout`)
//! and mirrors `token` and `user` into the injected key-value storage.
//! `Session` is the published snapshot.

pub mod session;

pub use session::{Session, SessionPhase, SessionStore};
