//! Route definitions for the Lenslocked HTTP API.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware::identity::{require_user, resolve_identity};
use crate::state::AppState;

/// Build the router with every route and the identity middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(password_routes())
        .merge(user_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ))
        .with_state(state)
}

/// Liveness (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Signup, signin, signout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/signin", post(handlers::auth::signin))
        .route("/signout", post(handlers::auth::signout))
}

/// Forgot and reset password
fn password_routes() -> Router<AppState> {
    Router::new()
        .route("/forgot-pw", post(handlers::password::forgot_password))
        .route("/reset-pw", post(handlers::password::reset_password))
}

/// Endpoints that require a signed-in user
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/me/email", put(handlers::user::update_email))
        .route_layer(axum_middleware::from_fn(require_user))
}
