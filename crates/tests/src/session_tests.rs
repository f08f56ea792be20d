use std::sync::Arc;

use api_client::{MemoryTokenStore, Session, SessionState, TokenStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::AppErrorKind;

use crate::common::{user_json, MockApi};

#[tokio::test]
async fn login_stores_token_and_later_requests_carry_it() {
    let api = MockApi::start().await;
    api.respond(
        "POST",
        "/api/auth/login",
        200,
        json!({ "token": "tok-1", "user": user_json("u1", "Ana Lima", "Perito") }),
    );
    api.respond("GET", "/api/auth/logged-user", 200, json!({ "user": user_json("u1", "Ana Lima", "Perito") }));

    let store = Arc::new(MemoryTokenStore::new());
    let session = Session::new(api.client(store.clone()));

    let user = session.login(" ana@odx.test ", "segredo").await.unwrap();
    assert_eq!(user.nome, "Ana Lima");
    assert_eq!(store.load().as_deref(), Some("tok-1"));
    assert!(matches!(session.state(), SessionState::Authenticated(ref u) if u.id == "u1"));

    let login = &api.requests_to("POST", "/api/auth/login")[0];
    assert_eq!(login.authorization, None);
    assert_eq!(login.json(), json!({ "email": "ana@odx.test", "senha": "segredo" }));

    let restored = session.fetch_logged_user().await.unwrap();
    assert_eq!(restored.map(|u| u.id), Some("u1".to_string()));
    let check = &api.requests_to("GET", "/api/auth/logged-user")[0];
    assert_eq!(check.authorization.as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn rejected_login_shows_server_message() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/auth/login", 401, json!({ "msg": "Credenciais inválidas" }));

    let store = Arc::new(MemoryTokenStore::new());
    let session = Session::new(api.client(store.clone()));

    let err = session.login("ana@odx.test", "errada").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.user_message(), "Credenciais inválidas");
    assert_eq!(session.state(), SessionState::Failed("Credenciais inválidas".to_string()));
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn blank_credentials_never_reach_the_server() {
    let api = MockApi::start().await;
    let session = Session::new(api.client(Arc::new(MemoryTokenStore::new())));

    let err = session.login("   ", "").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Validation);
    assert!(api.requests().is_empty());
}

#[tokio::test]
async fn expired_token_is_cleared_on_restore() {
    let api = MockApi::start().await;
    api.respond("GET", "/api/auth/logged-user", 401, json!({ "message": "Token expirado" }));

    let store = Arc::new(MemoryTokenStore::with_token("velho"));
    let session = Session::new(api.client(store.clone()));

    assert!(session.fetch_logged_user().await.is_err());
    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn server_failure_on_restore_is_reported() {
    let api = MockApi::start().await;
    api.respond("GET", "/api/auth/logged-user", 500, json!({ "error": "Banco indisponível" }));

    let store = Arc::new(MemoryTokenStore::with_token("tok"));
    let session = Session::new(api.client(store.clone()));

    assert!(session.fetch_logged_user().await.is_err());
    assert_eq!(session.state(), SessionState::Failed("Banco indisponível".to_string()));
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn logout_clears_token_even_when_server_fails() {
    let api = MockApi::start().await;
    api.respond("POST", "/api/auth/logout", 500, json!({}));

    let store = Arc::new(MemoryTokenStore::with_token("tok"));
    let session = Session::new(api.client(store.clone()));

    session.logout().await;
    assert_eq!(store.load(), None);
    assert_eq!(session.state(), SessionState::Unauthenticated);
    let call = &api.requests_to("POST", "/api/auth/logout")[0];
    assert_eq!(call.authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn any_401_clears_the_stored_token() {
    let api = MockApi::start().await;
    api.respond("GET", "/api/cases", 401, json!({ "message": "Não autorizado" }));

    let store = Arc::new(MemoryTokenStore::with_token("tok"));
    let client = api.client(store.clone());
    let err = api_client::api::cases::list_cases(&client, &shared_types::PageQuery::new(1, 20))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(store.load(), None);
}
