//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use lenslocked_api::{AppStores, build_app};
use lenslocked_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, LoggingConfig, ServerConfig,
};
use lenslocked_database::MemoryDatabase;
use lenslocked_email::OutboxMailer;

/// Test application backed by in-memory tables and an outbox mailer.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared tables, for direct inspection
    pub db: MemoryDatabase,
    /// Every email the app has sent
    pub outbox: OutboxMailer,
    /// Stores behind the router
    pub stores: AppStores,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = Arc::new(test_config());
        let db = MemoryDatabase::new();
        let outbox = OutboxMailer::new();

        let stores = AppStores::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            Arc::new(outbox.clone()),
            &config,
        );
        let router = build_app(
            stores
                .clone()
                .into_state(Arc::clone(&config), Arc::new(db.clone())),
        );

        Self {
            router,
            db,
            outbox,
            stores,
            config,
        }
    }

    /// Sign up through the API and return the session token
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/signup",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );
        response.session.expect("signup sets a session cookie")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = session {
            req = req.header(header::COOKIE, format!("session={token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();

        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        let session = set_cookies
            .iter()
            .find_map(|c| c.strip_prefix("session="))
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string());

        TestResponse {
            status,
            body,
            session,
            set_cookies,
        }
    }

    /// Pull the reset token out of the most recent email
    pub async fn last_reset_token(&self) -> String {
        let email = self.outbox.last().await.expect("no email was sent");
        let link = email
            .plaintext
            .split_whitespace()
            .find(|word| word.contains("/reset-pw?"))
            .expect("email has no reset link");
        let link = url::Url::parse(link).expect("reset link is a valid URL");
        link.query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .expect("reset link has a token")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Value of a `session` cookie set by the response; empty when cleared
    pub session: Option<String>,
    /// Raw `Set-Cookie` headers
    pub set_cookies: Vec<String>,
}

/// Config for tests: defaults plus a database URL that is never dialed.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::with_url("postgres://unused/lenslocked_test"),
        auth: AuthConfig::default(),
        email: EmailConfig::default(),
        logging: LoggingConfig::default(),
    }
}
