//! Auth handlers: signup, signin, signout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use lenslocked_core::error::AppError;
use lenslocked_core::types::UserId;

use crate::cookie::{clear_session, read_session, session_cookie};
use crate::dto::request::{SigninRequest, SignupRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Start a session for `user_id` and put its token in the cookie jar.
pub(crate) async fn sign_in(
    state: &AppState,
    jar: CookieJar,
    user_id: UserId,
) -> Result<CookieJar, ApiError> {
    let session = state.sessions.create(user_id).await?;
    let token = session
        .token
        .ok_or_else(|| AppError::internal("New session is missing its token"))?;
    Ok(jar.add(session_cookie(
        token.into_inner(),
        state.config.server.cookie_secure,
    )))
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.users.create(&req.email, &req.password).await?;
    let jar = sign_in(&state, jar, user.id).await?;

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// POST /signin
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SigninRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.users.authenticate(&req.email, &req.password).await?;
    let jar = sign_in(&state, jar, user.id).await?;
    info!(user_id = %user.id, "User signed in");

    Ok((jar, Json(ApiResponse::ok(UserResponse::from(user)))))
}

/// POST /signout
///
/// Succeeds whether or not the cookie names a live session.
pub async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    if let Some(token) = read_session(&jar) {
        state.sessions.delete(&token).await?;
    }

    Ok((
        clear_session(jar),
        Json(ApiResponse::ok(MessageResponse::new("Signed out"))),
    ))
}
