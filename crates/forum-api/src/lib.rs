//! # Forum API
//!
//! HTTP handlers, session middleware, error responses, and router.

pub mod context;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
