//! Request-scoped identity.
//!
//! [`resolve_identity`] runs on every request: it looks up the `session`
//! cookie and, if it names a live session, stores the user in the request
//! extensions. A missing or stale cookie is not an error; the request just
//! carries no user. [`require_user`] guards routes that need one.

use axum::extract::{Request, State};
use axum::http::Extensions;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use lenslocked_core::error::ErrorKind;
use lenslocked_entity::User;

use crate::cookie::read_session;
use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in user, as stored in request extensions.
#[derive(Debug, Clone)]
pub struct Identity(pub User);

/// Attach `user` to a request's extensions.
pub fn with_user(extensions: &mut Extensions, user: User) {
    extensions.insert(Identity(user));
}

/// The user attached to a request, if any.
pub fn user(extensions: &Extensions) -> Option<&User> {
    extensions.get::<Identity>().map(|identity| &identity.0)
}

/// Resolve the session cookie to a user and attach it to the request.
pub async fn resolve_identity(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = read_session(&jar) {
        match state.sessions.user(&token).await {
            Ok(found) => with_user(request.extensions_mut(), found),
            Err(e) if e.is(ErrorKind::NotFound) => {
                debug!("Session cookie does not match a live session");
            }
            Err(e) => {
                warn!(error = %e, "Session lookup failed; continuing without a user");
            }
        }
    }

    next.run(request).await
}

/// Reject requests that carry no user with 401.
pub async fn require_user(request: Request, next: Next) -> Response {
    if user(request.extensions()).is_none() {
        return ApiError::unauthenticated().into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lenslocked_core::types::UserId;

    #[test]
    fn test_extensions_round_trip() {
        let mut extensions = Extensions::new();
        assert!(user(&extensions).is_none());

        let alice = User {
            id: UserId::new(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        with_user(&mut extensions, alice.clone());
        assert_eq!(user(&extensions).map(|u| u.id), Some(alice.id));
    }
}
