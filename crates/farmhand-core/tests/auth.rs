mod support;

use farmhand_core::auth::{AuthClient, RegisterForm, SecurityQuestion};
use farmhand_core::models::Seeds;
use farmhand_core::session::MemoryTokenStore;
use farmhand_core::{Error, ResourceSync, Session, TokenStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::FakeBackend;

fn register_form(username: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_string(),
        password: "hunter2".to_string(),
        confirm_password: "hunter2".to_string(),
        security_question: Some(SecurityQuestion::Pet),
        security_answer: "Moti".to_string(),
    }
}

#[tokio::test]
async fn login_persists_token_in_store() {
    let backend = FakeBackend::start().await;
    backend.add_user("ravi", "hunter2", "Moti");
    let store = MemoryTokenStore::new();
    let session = Session::restore(store.clone()).unwrap();
    let auth = AuthClient::new(backend.api(), session.clone());

    let message = auth.login(" ravi ", "hunter2").await.unwrap();

    assert_eq!(message, "Login successful");
    assert!(session.is_authenticated());
    assert_eq!(
        store.load_token().unwrap().unwrap().expose(),
        session.token().unwrap().expose()
    );
}

#[tokio::test]
async fn failed_login_leaves_session_signed_out() {
    let backend = FakeBackend::start().await;
    backend.add_user("ravi", "hunter2", "Moti");
    let auth = AuthClient::new(backend.api(), Session::in_memory());

    let error = auth.login("ravi", "wrong").await.unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert_eq!(error.to_string(), "Invalid username or password");
    assert!(!auth.session().is_authenticated());
}

#[tokio::test]
async fn register_then_login() {
    let backend = FakeBackend::start().await;
    let auth = AuthClient::new(backend.api(), Session::in_memory());

    let message = auth.register(&register_form("meena")).await.unwrap();
    assert_eq!(message, "User registered successfully");
    assert!(!auth.session().is_authenticated());

    auth.login("meena", "hunter2").await.unwrap();
    assert!(auth.session().is_authenticated());
}

#[tokio::test]
async fn duplicate_username_maps_conflict_message() {
    let backend = FakeBackend::start().await;
    backend.add_user("ravi", "hunter2", "Moti");
    let auth = AuthClient::new(backend.api(), Session::in_memory());

    let error = auth.register(&register_form("ravi")).await.unwrap_err();

    assert_eq!(error.status(), Some(409));
    assert_eq!(
        error.to_string(),
        "Username already exists. Please choose another one."
    );
}

#[tokio::test]
async fn mismatched_passwords_send_nothing() {
    let backend = FakeBackend::start().await;
    let auth = AuthClient::new(backend.api(), Session::in_memory());
    let mut form = register_form("meena");
    form.confirm_password = "hunter3".to_string();

    let error = auth.register(&form).await.unwrap_err();

    assert_eq!(error.field(), Some("confirm_password"));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn forgot_password_resets_with_security_answer() {
    let backend = FakeBackend::start().await;
    backend.add_user("ravi", "hunter2", "Moti");
    let auth = AuthClient::new(backend.api(), Session::in_memory());

    let error = auth
        .forgot_password("ravi", "Tommy", "new-pass")
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "Invalid username or security answer");

    let message = auth
        .forgot_password("ravi", "moti", "new-pass")
        .await
        .unwrap();
    assert_eq!(message, "Password has been reset successfully");
    assert_eq!(backend.password_of("ravi").as_deref(), Some("new-pass"));
}

#[tokio::test]
async fn logout_clears_token_and_blocks_later_calls_locally() {
    let backend = FakeBackend::start().await;
    backend.add_user("ravi", "hunter2", "Moti");
    let store = MemoryTokenStore::new();
    let session = Session::restore(store.clone()).unwrap();
    let auth = AuthClient::new(backend.api(), session.clone());
    auth.login("ravi", "hunter2").await.unwrap();

    let message = auth.logout().await.unwrap();

    assert_eq!(message, "Logout successful");
    assert!(store.load_token().unwrap().is_none());
    let requests_after_logout = backend.requests().len();

    let seeds: ResourceSync<Seeds> = ResourceSync::new(backend.api(), session);
    assert!(matches!(seeds.load().await, Err(Error::NotAuthenticated)));
    assert_eq!(backend.requests().len(), requests_after_logout);
}

#[tokio::test]
async fn logout_keeps_token_when_server_fails() {
    let backend = FakeBackend::start().await;
    let session = backend.signed_in_session();
    let auth = AuthClient::new(backend.api(), session.clone());
    backend.fail_next("POST", "/logout", 500, json!({ "message": "Failed to logout" }));

    let error = auth.logout().await.unwrap_err();

    assert_eq!(error.to_string(), "Failed to logout");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn logout_with_rejected_token_still_clears_it() {
    let backend = FakeBackend::start().await;
    let session = Session::in_memory();
    session
        .begin(farmhand_core::SessionToken::new("expired").unwrap())
        .unwrap();
    let auth = AuthClient::new(backend.api(), session.clone());

    auth.logout().await.unwrap();

    assert!(!session.is_authenticated());
}
