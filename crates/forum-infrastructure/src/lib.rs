//! # Forum Infrastructure
//!
//! Database implementations (adapters).

pub mod database;

pub use database::{create_pool, PgSessionStore, PgUserRepository};
