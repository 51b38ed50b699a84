//! PostgreSQL user repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use forum_core::domain::{User, UserAccount};
use forum_core::error::DomainError;
use forum_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserAccountRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

impl From<UserAccountRow> for UserAccount {
    fn from(row: UserAccountRow) -> Self {
        UserAccount {
            user: User {
                id: row.id,
                username: row.username,
            },
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        let row: Option<UserAccountRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding user by username: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, account: &UserAccount) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(account.user.id)
        .bind(&account.user.username)
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Unique-violation can still race past the service-level check.
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return DomainError::UsernameTaken(account.user.username.clone());
                }
            }
            error!("Database error creating user: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(account.user.clone())
    }
}
