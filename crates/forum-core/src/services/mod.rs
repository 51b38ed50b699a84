//! Domain services (business logic)

pub mod auth_service;
pub mod session_service;

pub use auth_service::AuthService;
pub use session_service::{SessionService, ValidatedSession};
