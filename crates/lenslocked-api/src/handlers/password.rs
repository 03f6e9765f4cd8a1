//! Password reset handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use lenslocked_core::error::{AppError, ErrorKind};
use lenslocked_core::result::AppResult;

use crate::dto::request::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::handlers::auth::sign_in;
use crate::state::AppState;

/// Link the user follows to reach the reset form.
///
/// Fails with `Configuration` when `base_url` is not an absolute URL.
pub fn reset_url(base_url: &str, token: &str) -> AppResult<String> {
    let invalid = |e: url::ParseError| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("server.base_url is not a valid URL: {e}"),
            e,
        )
    };

    // Trailing slash so `join` appends instead of replacing the last segment.
    let base = url::Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(invalid)?;
    let mut url = base.join("reset-pw").map_err(invalid)?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url.into())
}

/// POST /forgot-pw
///
/// Emails a reset link. The token itself never appears in the response.
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    let reset = state.password_resets.create(&req.email).await?;
    let token = reset
        .token
        .ok_or_else(|| AppError::internal("New password reset is missing its token"))?;

    let url = reset_url(&state.config.server.base_url, token.expose())?;
    state.emails.forgot_password(req.email.trim(), &url).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok(MessageResponse::new(
            "Check your email for a link to reset your password",
        ))),
    ))
}

/// POST /reset-pw
///
/// Redeems the token, sets the new password, and signs the user in.
pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), ApiError> {
    // A bad password must not burn the single-use token.
    state.users.check_password(&req.password)?;

    let user = state.password_resets.consume(&req.token).await?;
    state.users.update_password(user.id, &req.password).await?;
    let jar = sign_in(&state, jar, user.id).await?;
    info!(user_id = %user.id, "Password reset completed");

    Ok((jar, Json(ApiResponse::ok(UserResponse::from(user)))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_url_encodes_token() {
        assert_eq!(
            reset_url("http://localhost:3000/", "ab-_cd==").unwrap(),
            "http://localhost:3000/reset-pw?token=ab-_cd%3D%3D"
        );
    }

    #[test]
    fn test_reset_url_keeps_base_path() {
        let link = reset_url("https://lenslocked.com/app", "abc=").unwrap();
        let parsed = url::Url::parse(&link).unwrap();
        assert_eq!(parsed.path(), "/app/reset-pw");
        let token = parsed
            .query_pairs()
            .find(|(k, _)| k == "token")
            .map(|(_, v)| v.into_owned());
        assert_eq!(token.as_deref(), Some("abc="));
    }

    #[test]
    fn test_reset_url_rejects_relative_base() {
        let err = reset_url("localhost:3000", "abc").unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
        let err = reset_url("not a url", "abc").unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }
}
