//! Axum middleware stack.

pub mod identity;
pub mod logging;
