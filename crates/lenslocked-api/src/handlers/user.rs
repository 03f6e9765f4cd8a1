//! Signed-in user handlers.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use crate::cookie::{clear_session, read_session};
use crate::dto::request::UpdateEmailRequest;
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::state::AppState;

/// GET /users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(user)))
}

/// PUT /users/me/email
///
/// Ends the current session; the user signs in again with the new address.
pub async fn update_email(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<UpdateEmailRequest>,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.users.update_email(user.id, &req.email).await?;

    if let Some(token) = read_session(&jar) {
        state.sessions.delete(&token).await?;
    }

    Ok((
        clear_session(jar),
        Json(ApiResponse::ok(MessageResponse::new(
            "Email updated, please sign in again",
        ))),
    ))
}
