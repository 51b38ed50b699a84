//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::{User, UserAccount};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError>;
    async fn create(&self, account: &UserAccount) -> Result<User, DomainError>;
}
