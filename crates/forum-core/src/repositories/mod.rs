//! Repository traits (ports)

pub mod session_store;
pub mod user_repository;

pub use session_store::SessionStore;
pub use user_repository::UserRepository;
