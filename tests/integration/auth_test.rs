//! Integration tests for signup, signin, and signout.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
}

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/signup",
            Some(json!({ "email": "Alice@Example.com", "password": "junglebook" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["email"], "alice@example.com");
    assert!(response.body["data"].get("password_hash").is_none());

    let cookie = response
        .set_cookies
        .iter()
        .find(|c| c.starts_with("session="))
        .unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!response.session.unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();
    app.signup("alice@example.com", "junglebook").await;

    let response = app
        .request(
            "POST",
            "/signup",
            Some(json!({ "email": "alice@example.com", "password": "otherpassword" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_bad_input() {
    let app = helpers::TestApp::new();

    let bad_email = app
        .request(
            "POST",
            "/signup",
            Some(json!({ "email": "not-an-email", "password": "junglebook" })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        bad_email.body["details"]["email"][0],
        "A valid email address is required"
    );

    let short_password = app
        .request(
            "POST",
            "/signup",
            Some(json!({ "email": "alice@example.com", "password": "short" })),
            None,
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signin_success_and_failure() {
    let app = helpers::TestApp::new();
    app.signup("alice@example.com", "junglebook").await;

    let ok = app
        .request(
            "POST",
            "/signin",
            Some(json!({ "email": "alice@example.com", "password": "junglebook" })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert!(ok.session.is_some());

    let wrong = app
        .request(
            "POST",
            "/signin",
            Some(json!({ "email": "alice@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request(
            "POST",
            "/signin",
            Some(json!({ "email": "nobody@example.com", "password": "junglebook" })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_signin_elsewhere_signs_out_previous_browser() {
    let app = helpers::TestApp::new();
    let first = app.signup("alice@example.com", "junglebook").await;

    let second = app
        .request(
            "POST",
            "/signin",
            Some(json!({ "email": "alice@example.com", "password": "junglebook" })),
            None,
        )
        .await
        .session
        .unwrap();

    let stale = app.request("GET", "/users/me", None, Some(&first)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let live = app.request("GET", "/users/me", None, Some(&second)).await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(app.db.session_count().await, 1);
}

#[tokio::test]
async fn test_signout_clears_cookie_and_is_idempotent() {
    let app = helpers::TestApp::new();
    let token = app.signup("alice@example.com", "junglebook").await;

    let response = app.request("POST", "/signout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.session.as_deref(), Some(""));

    let again = app.request("POST", "/signout", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::OK);

    let anonymous = app.request("POST", "/signout", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);

    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}
