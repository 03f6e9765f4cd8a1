//! Integration tests for the forgot/reset password flow.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use lenslocked_auth::TokenManager;
use lenslocked_database::{PasswordResetRepository, UserRepository};

#[tokio::test]
async fn test_forgot_password_emails_link_without_leaking_token() {
    let app = helpers::TestApp::new();
    app.signup("alice@example.com", "junglebook").await;

    let response = app
        .request(
            "POST",
            "/forgot-pw",
            Some(json!({ "email": "alice@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let sent = app.outbox.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].subject, "Reset your password");
    assert!(
        sent[0]
            .plaintext
            .contains("http://localhost:3000/reset-pw?token=")
    );

    let token = app.last_reset_token().await;
    assert!(!response.body.to_string().contains(&token));
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/forgot-pw",
            Some(json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.outbox.sent().await.is_empty());
}

#[tokio::test]
async fn test_reset_password_round_trip() {
    let app = helpers::TestApp::new();
    let old_session = app.signup("alice@example.com", "junglebook").await;
    app.request(
        "POST",
        "/forgot-pw",
        Some(json!({ "email": "alice@example.com" })),
        None,
    )
    .await;
    let token = app.last_reset_token().await;

    let response = app
        .request(
            "POST",
            "/reset-pw",
            Some(json!({ "token": token, "password": "newpassword" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "alice@example.com");
    let new_session = response.session.unwrap();

    let me = app.request("GET", "/users/me", None, Some(&new_session)).await;
    assert_eq!(me.status, StatusCode::OK);
    let stale = app.request("GET", "/users/me", None, Some(&old_session)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let signin = app
        .request(
            "POST",
            "/signin",
            Some(json!({ "email": "alice@example.com", "password": "newpassword" })),
            None,
        )
        .await;
    assert_eq!(signin.status, StatusCode::OK);

    let reuse = app
        .request(
            "POST",
            "/reset-pw",
            Some(json!({ "token": token, "password": "anotherpassword" })),
            None,
        )
        .await;
    assert_eq!(reuse.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_weak_password_keeps_token_usable() {
    let app = helpers::TestApp::new();
    app.signup("alice@example.com", "junglebook").await;
    app.request(
        "POST",
        "/forgot-pw",
        Some(json!({ "email": "alice@example.com" })),
        None,
    )
    .await;
    let token = app.last_reset_token().await;

    let weak = app
        .request(
            "POST",
            "/reset-pw",
            Some(json!({ "token": token, "password": "short" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let ok = app
        .request(
            "POST",
            "/reset-pw",
            Some(json!({ "token": token, "password": "newpassword" })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_is_gone_and_kept() {
    let app = helpers::TestApp::new();
    app.signup("alice@example.com", "junglebook").await;
    app.request(
        "POST",
        "/forgot-pw",
        Some(json!({ "email": "alice@example.com" })),
        None,
    )
    .await;
    let token = app.last_reset_token().await;

    let alice = app
        .db
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    PasswordResetRepository::upsert(
        &app.db,
        alice.id,
        &TokenManager::hash(&token),
        Utc::now() - Duration::minutes(1),
    )
    .await
    .unwrap();

    let response = app
        .request(
            "POST",
            "/reset-pw",
            Some(json!({ "token": token, "password": "newpassword" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["error"], "EXPIRED");
    assert_eq!(app.db.reset_count().await, 1);

    assert_eq!(app.stores.password_resets.purge_expired().await.unwrap(), 1);
    assert_eq!(app.db.reset_count().await, 0);
}

#[tokio::test]
async fn test_alice_scenario_consume_twice() {
    let app = helpers::TestApp::new();
    let alice = app
        .stores
        .users
        .create("alice@example.com", "junglebook")
        .await
        .unwrap();

    let reset = app
        .stores
        .password_resets
        .create("alice@example.com")
        .await
        .unwrap();
    let token = reset.token.unwrap();

    let first = app
        .stores
        .password_resets
        .consume(token.expose())
        .await
        .unwrap();
    assert_eq!(first.id, alice.id);

    let second = app
        .stores
        .password_resets
        .consume(token.expose())
        .await
        .unwrap_err();
    assert!(second.is(lenslocked_core::error::ErrorKind::NotFound));
}
