//! Router assembly

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health};
use crate::middleware::session_gate;
use crate::state::AppState;

/// Build the application router; the session gate wraps every route.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/auth", auth_routes)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .with_state(state)
}
