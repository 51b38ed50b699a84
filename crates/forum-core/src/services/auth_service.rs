//! Authentication service (signup/login credential checks)

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{User, UserAccount};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user, failing if the username is taken.
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, DomainError> {
        if self.users.find_by_username(username).await?.is_some() {
            warn!("signup failed: username already used: {}", username);
            return Err(DomainError::UsernameTaken(username.to_string()));
        }

        let password_hash = hash_password(password)?;
        let account = UserAccount {
            user: User {
                id: Uuid::new_v4(),
                username: username.to_string(),
            },
            password_hash,
        };

        let user = self.users.create(&account).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check credentials against the stored hash.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let account = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!("login failed: unknown username: {}", username);
                DomainError::InvalidCredentials
            })?;

        if !verify_password(password, &account.password_hash)? {
            warn!("login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = %account.user.id, "login successful");
        Ok(account.user)
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::PasswordHashError(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
