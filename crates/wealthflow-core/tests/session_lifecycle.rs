//! Integration tests for the session store lifecycle.


use std::sync::Arc;
use std::time::Duration;

use fixtures::{mount_login, mount_profile, rejected_credentials, user_json, Harness};
use serde_json::json;
use wealthflow_core::models::User;
use wealthflow_core::storage::{TOKEN_KEY, USER_KEY};
use wealthflow_core::{
    ApiError, ClientConfig, FileStore, KeyValueStore, NoRedirect, Session, SessionPhase,
    SessionStore, Transport,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse_user(value: serde_json::Value) -> User {
    serde_json::from_value(value).unwrap()
}

/// Seed storage with a signed-in user and rehydrate.
async fn signed_in(h: &Harness, token: &str) -> Session {
    h.storage.set(TOKEN_KEY, token).unwrap();
    h.storage
        .set(USER_KEY, &user_json(9, "old@b.com").to_string())
        .unwrap();
    let session = h.store.init().await;
    assert_eq!(session.phase(), SessionPhase::Authenticated);
    session
}

#[tokio::test]
async fn test_login_publishes_token_and_profile() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T1").await;
    mount_profile(&server, "T1", user_json(1, "a@b.com")).await;

    let h = Harness::new(&server);
    assert_eq!(h.store.init().await, Session::anonymous());
    let mut rx = h.store.subscribe();

    let user = h.store.login("a@b.com", "pw").await.unwrap();

    let expected = parse_user(user_json(1, "a@b.com"));
    assert_eq!(user, expected);
    assert_eq!(h.store.current(), Session::authenticated(expected.clone(), "T1".into()));

    // One transition, straight to authenticated
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().phase(), SessionPhase::Authenticated);

    assert_eq!(h.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("T1"));
    let stored: User = serde_json::from_str(&h.storage.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn test_login_persists_token_before_profile_request() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T1").await;
    // Only a request signed with the fresh token gets a profile
    mount_profile(&server, "T1", user_json(1, "a@b.com")).await;

    let h = Harness::new(&server);
    h.store.init().await;
    assert!(h.store.login("a@b.com", "pw").await.is_ok());

    let requests = server.received_requests().await.unwrap();
    let login = requests.iter().find(|r| r.url.path() == "/auth/login").unwrap();
    assert!(login.headers.get("authorization").is_none());
    let me = requests.iter().find(|r| r.url.path() == "/auth/me").unwrap();
    assert_eq!(me.headers.get("authorization").unwrap(), "Bearer T1");
}

#[tokio::test]
async fn test_rejected_login_leaves_state_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(rejected_credentials())
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    let before = signed_in(&h, "T0").await;

    let err = h.store.login("a@b.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication(ref m) if m == "Incorrect email or password"));

    assert_eq!(h.store.current(), before);
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("T0"));
    assert!(h.storage.get(USER_KEY).unwrap().is_some());
    assert_eq!(h.redirect_count(), 0);
}

#[tokio::test]
async fn test_login_401_is_an_authentication_failure_not_a_reset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    let before = signed_in(&h, "T0").await;

    let err = h.store.login("a@b.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
    assert_eq!(h.store.current(), before);
    assert_eq!(h.redirect_count(), 0);
}

#[tokio::test]
async fn test_profile_failure_restores_previous_storage() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T2").await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    let before = signed_in(&h, "T1").await;

    let err = h.store.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Server(_)));

    assert_eq!(h.store.current(), before);
    assert_eq!(h.storage.get(TOKEN_KEY).unwrap().as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_profile_401_resets_session() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T2").await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.store.init().await;

    let err = h.store.login("a@b.com", "pw").await.unwrap_err();
    assert!(err.is_expired());
    assert_eq!(h.store.current(), Session::anonymous());
    assert!(h.storage.is_empty());
    assert_eq!(h.redirect_count(), 1);
}

#[tokio::test]
async fn test_register_then_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "new@b.com",
            "password": "pw",
            "full_name": "Ada Lovelace"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, "new@b.com")))
        .expect(1)
        .mount(&server)
        .await;
    mount_login(&server, "new@b.com", "T5").await;
    mount_profile(&server, "T5", user_json(5, "new@b.com")).await;

    let h = Harness::new(&server);
    h.store.init().await;

    let user = h
        .store
        .register("new@b.com", "pw", Some("Ada Lovelace"))
        .await
        .unwrap();
    assert_eq!(user.id, 5);
    assert_eq!(h.store.current().token(), Some("T5"));
}

#[tokio::test]
async fn test_register_then_failed_login_stays_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, "new@b.com")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(rejected_credentials())
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.store.init().await;

    let err = h.store.register("new@b.com", "pw", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
    assert_eq!(h.store.current(), Session::anonymous());
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_register_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "The user with this email already exists"})),
        )
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.store.init().await;

    let err = h.store.register("dup@b.com", "pw", None).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Authentication(ref m) if m == "The user with this email already exists"
    ));
    assert_eq!(h.store.current(), Session::anonymous());
}

#[tokio::test]
async fn test_logout_after_login() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T1").await;
    mount_profile(&server, "T1", user_json(1, "a@b.com")).await;

    let h = Harness::new(&server);
    h.store.init().await;
    h.store.login("a@b.com", "pw").await.unwrap();

    h.store.logout().await;
    assert_eq!(h.store.current(), Session::anonymous());
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_logout_during_login_runs_after_it() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T1").await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_json(1, "a@b.com"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let h = Harness::new(&server);
    h.store.init().await;
    let mut rx = h.store.subscribe();

    // The login takes the lifecycle lock first; the logout queues behind it
    let (login, ()) = tokio::join!(h.store.login("a@b.com", "pw"), h.store.logout());
    assert_eq!(login.unwrap().id, 1);

    assert_eq!(h.store.current(), Session::anonymous());
    assert!(h.storage.is_empty());
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), Session::anonymous());
}

#[tokio::test]
async fn test_login_recovers_from_corrupt_storage_file() {
    let server = MockServer::start().await;
    mount_login(&server, "a@b.com", "T1").await;
    mount_profile(&server, "T1", user_json(1, "a@b.com")).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("storage.json");
    std::fs::write(&file, r#"{"token": "T0", "user": trunc"#).unwrap();

    let storage = Arc::new(FileStore::new(&file));
    let transport = Transport::new(
        ClientConfig::new(server.uri()),
        storage.clone(),
        Arc::new(NoRedirect),
    )
    .unwrap();
    let store = SessionStore::new(transport);

    assert_eq!(store.init().await, Session::anonymous());

    let user = store.login("a@b.com", "pw").await.unwrap();
    assert_eq!(user.id, 1);
    assert!(store.current().is_authenticated());

    let reopened = FileStore::new(&file);
    assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("T1"));
    assert!(reopened.get(USER_KEY).unwrap().is_some());

    store.logout().await;
    assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
}
