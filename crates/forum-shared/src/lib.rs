//! # Forum Shared
//!
//! Configuration, constants, and telemetry for the forum backend.

pub mod config;
pub mod constants;
pub mod telemetry;

pub use config::AppConfig;
