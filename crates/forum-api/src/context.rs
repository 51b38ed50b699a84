//! Per-request identity context
//!
//! Built once per request by the session middleware and attached to the
//! request extensions; immutable after construction. Either both fields are
//! set (validated session) or neither is.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use forum_core::domain::{Session, User};

use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    user: Option<User>,
    session: Option<Session>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(session: Session, user: User) -> Self {
        Self {
            user: Some(user),
            session: Some(session),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn require_user(&self) -> Result<&User, ApiError> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| ApiError::unexpected("request context missing: session middleware not installed"))
    }
}
