//! # lenslocked-api
//!
//! HTTP API layer for Lenslocked built on Axum.
//!
//! Provides the JSON endpoints for signup, signin, signout, profile, and
//! the password reset flow, along with the identity middleware that turns
//! a `session` cookie into the current user.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

pub use app::{AppStores, build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
