//! Authentication HTTP handlers (signup, login, logout, current user)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use forum_core::domain::User;

use crate::context::RequestContext;
use crate::cookies;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Credentials payload, shared by signup and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

fn validate_credentials(payload: &CredentialsRequest) -> Result<(), ApiError> {
    let username = payload.username.as_str();
    if username.len() < 3 || username.len() > 31 {
        return Err(ApiError::form(
            StatusCode::BAD_REQUEST,
            "Username must be between 3 and 31 characters",
        ));
    }
    if !username
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
    {
        return Err(ApiError::form(
            StatusCode::BAD_REQUEST,
            "Username may only contain lowercase letters, digits, '_' and '-'",
        ));
    }
    if payload.password.len() < 3 || payload.password.len() > 255 {
        return Err(ApiError::form(
            StatusCode::BAD_REQUEST,
            "Password must be between 3 and 255 characters",
        ));
    }
    Ok(())
}

fn issue_cookie(state: &AppState, session_id: &str) -> (header::HeaderName, String) {
    let settings = &state.config.session;
    let cookie = cookies::session_cookie(
        &settings.cookie_name,
        session_id,
        settings.lifetime_days,
        state.config.app.is_production(),
    );
    (header::SET_COOKIE, cookie.to_string())
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_credentials(&payload)?;

    let user = state
        .auth
        .signup(&payload.username, &payload.password)
        .await?;
    let session = state.sessions.create_session(user.id).await?;

    Ok((
        StatusCode::CREATED,
        [issue_cookie(&state, &session.id)],
        Json(ApiResponse::success("Signed up")),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_credentials(&payload)?;

    let user = state
        .auth
        .login(&payload.username, &payload.password)
        .await?;
    let session = state.sessions.create_session(user.id).await?;

    Ok((
        StatusCode::OK,
        [issue_cookie(&state, &session.id)],
        Json(ApiResponse::success("Logged in")),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, ApiError> {
    let session = ctx
        .session()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    state.sessions.invalidate(&session.id).await?;

    let cookie = cookies::blank_session_cookie(&state.config.session.cookie_name);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(ApiResponse::success("Logged out")),
    ))
}

/// GET /api/auth/user
pub async fn current_user(ctx: RequestContext) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = ctx.require_user()?;
    Ok(Json(ApiResponse::with_data("Authenticated", user.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn rejects_short_username() {
        let err = validate_credentials(&payload("ab", "hunter2")).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::Expected { form: true, .. }));
    }

    #[test]
    fn rejects_uppercase_username() {
        assert!(validate_credentials(&payload("Alice", "hunter2")).is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(validate_credentials(&payload("alice", "ab")).is_err());
    }

    #[test]
    fn accepts_valid_credentials() {
        assert!(validate_credentials(&payload("alice_01", "hunter2")).is_ok());
    }
}
