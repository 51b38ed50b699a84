//! Session store trait (port)
//!
//! The canonical session records live behind this trait; nothing else may
//! create or delete them. `update_expiry` must be atomic at the store level
//! so concurrent renewals of the same session cannot race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Session, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    /// Fetch a session together with its linked user in one round-trip.
    async fn find_with_user(&self, id: &str) -> Result<Option<(Session, User)>, DomainError>;

    async fn update_expiry(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
