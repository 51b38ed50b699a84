//! API error responses
//!
//! Single terminal sink for every failure raised during request processing.
//! Expected errors carry a status, message, and form flag; anything else
//! becomes a 500 whose detail is masked in production mode.

use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use forum_core::error::DomainError;

static PRODUCTION_MODE: OnceLock<bool> = OnceLock::new();

/// Set once at startup; controls masking of unexpected-error detail.
pub fn set_production_mode(production: bool) {
    let _ = PRODUCTION_MODE.set(production);
}

fn production_mode() -> bool {
    PRODUCTION_MODE.get().copied().unwrap_or(false)
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Raised by application logic with intended client-facing semantics.
    #[error("{message}")]
    Expected {
        status: StatusCode,
        message: String,
        form: bool,
    },

    /// Anything else, including store/connectivity failures.
    #[error("{0}")]
    Unexpected(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(rename = "isFormError", skip_serializing_if = "Option::is_none")]
    pub is_form_error: Option<bool>,
}

impl ApiError {
    pub fn expected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Expected {
            status,
            message: message.into(),
            form: false,
        }
    }

    /// Expected error flagged as a form/input-validation failure.
    pub fn form(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Expected {
            status,
            message: message.into(),
            form: true,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::expected(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Expected { status, .. } => *status,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render to a response; `production` masks unexpected-error detail.
    pub fn render(self, production: bool) -> Response {
        match self {
            Self::Expected {
                status,
                message,
                form,
            } => {
                tracing::warn!(%status, "{}", message);
                let body = ErrorBody {
                    success: false,
                    error: message,
                    is_form_error: Some(form),
                };
                (status, Json(body)).into_response()
            }
            Self::Unexpected(detail) => {
                tracing::error!("Unexpected error: {}", detail);
                let error = if production {
                    "Internal Server Error".to_string()
                } else {
                    detail
                };
                let body = ErrorBody {
                    success: false,
                    error,
                    is_form_error: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(production_mode())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidCredentials => {
                Self::form(StatusCode::UNAUTHORIZED, e.to_string())
            }
            DomainError::UsernameTaken(_) => Self::form(StatusCode::CONFLICT, e.to_string()),
            DomainError::PasswordHashError(_) | DomainError::DatabaseError(_) => {
                Self::Unexpected(e.to_string())
            }
        }
    }
}
