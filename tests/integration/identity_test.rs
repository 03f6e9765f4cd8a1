//! Integration tests for the identity middleware and signed-in routes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_me_requires_user() {
    let app = helpers::TestApp::new();

    let anonymous = app.request("GET", "/users/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["error"], "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/users/me", None, Some("not-a-real-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = helpers::TestApp::new();
    let token = app.signup("alice@example.com", "junglebook").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_stale_cookie_does_not_block_public_routes() {
    let app = helpers::TestApp::new();
    let response = app
        .request("GET", "/health", None, Some("stale-token"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_email_ends_session() {
    let app = helpers::TestApp::new();
    let token = app.signup("alice@example.com", "junglebook").await;

    let response = app
        .request(
            "PUT",
            "/users/me/email",
            Some(json!({ "email": "alice@new.example" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.session.as_deref(), Some(""));

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let signin = app
        .request(
            "POST",
            "/signin",
            Some(json!({ "email": "alice@new.example", "password": "junglebook" })),
            None,
        )
        .await;
    assert_eq!(signin.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_email_to_taken_address_conflicts() {
    let app = helpers::TestApp::new();
    app.signup("bob@example.com", "junglebook").await;
    let token = app.signup("alice@example.com", "junglebook").await;

    let response = app
        .request(
            "PUT",
            "/users/me/email",
            Some(json!({ "email": "bob@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_email_requires_user() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "PUT",
            "/users/me/email",
            Some(json!({ "email": "alice@new.example" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
