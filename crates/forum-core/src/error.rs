//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Username already used: {0}")]
    UsernameTaken(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
