//! Extractors reading the user attached by the identity middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use lenslocked_entity::User;

use crate::error::ApiError;
use crate::middleware::identity;

/// The signed-in user. Rejects with 401 when there is none.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity::user(&parts.extensions)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(ApiError::unauthenticated)
    }
}
