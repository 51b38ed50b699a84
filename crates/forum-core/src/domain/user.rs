//! User domain entity

use serde::Serialize;
use uuid::Uuid;

/// Public attributes of a user, safe to return to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// A user together with its stored credential hash. Never serialized out.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}
