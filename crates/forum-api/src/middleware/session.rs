//! Session middleware (request context builder)
//!
//! Runs before route dispatch on every request: extracts the session cookie,
//! applies the public-path bypass, invokes the validator, and attaches the
//! resolved [`RequestContext`] to the request. Cookie mutations are collected
//! as an explicit directive list and appended to the response as additional
//! `Set-Cookie` headers, never replacing ones written by handlers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;

use crate::context::RequestContext;
use crate::cookies;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    let jar = CookieJar::from_headers(request.headers());
    let session_id = jar
        .get(&state.config.session.cookie_name)
        .map(|c| c.value().to_string());

    let (context, directives) = resolve_session(&state, &path, session_id.as_deref()).await?;
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;
    for cookie in directives {
        let value = HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ApiError::unexpected(format!("invalid cookie header: {}", e)))?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// Resolve the presented token into a context plus cookie directives.
///
/// The blanking directive is emitted only when a token was actually
/// presented; a cookieless request never gets a `Set-Cookie` back.
async fn resolve_session(
    state: &AppState,
    path: &str,
    session_id: Option<&str>,
) -> Result<(RequestContext, Vec<Cookie<'static>>), ApiError> {
    let settings = &state.config.session;

    // Pre-authentication endpoints skip the store round-trip entirely.
    // Not a security boundary: those handlers must not rely on context identity.
    if settings.public_paths.iter().any(|p| p == path) {
        return Ok((RequestContext::anonymous(), Vec::new()));
    }

    let Some(id) = session_id else {
        return Ok((RequestContext::anonymous(), Vec::new()));
    };

    let validated = state.sessions.validate(Some(id)).await?;
    match (validated.session, validated.user) {
        (Some(session), Some(user)) => {
            let mut directives = Vec::new();
            if session.fresh {
                debug!(user_id = %session.user_id, "reissuing renewed session cookie");
                directives.push(cookies::session_cookie(
                    &settings.cookie_name,
                    &session.id,
                    settings.lifetime_days,
                    state.config.app.is_production(),
                ));
            }
            Ok((RequestContext::authenticated(session, user), directives))
        }
        _ => {
            debug!("blanking stale session cookie");
            let directives = vec![cookies::blank_session_cookie(&settings.cookie_name)];
            Ok((RequestContext::anonymous(), directives))
        }
    }
}
