//! PostgreSQL repository implementations

pub mod session_store_impl;
pub mod user_repo_impl;

pub use session_store_impl::PgSessionStore;
pub use user_repo_impl::PgUserRepository;
