//! Custom Axum extractors.

pub mod current_user;
pub mod json;

pub use current_user::CurrentUser;
pub use json::ValidatedJson;
