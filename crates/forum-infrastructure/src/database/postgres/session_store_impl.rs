//! PostgreSQL session store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use forum_core::domain::{Session, User};
use forum_core::error::DomainError;
use forum_core::repositories::SessionStore;

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct SessionUserRow {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub username: String,
}

impl From<SessionUserRow> for (Session, User) {
    fn from(row: SessionUserRow) -> Self {
        (
            Session {
                id: row.id,
                user_id: row.user_id,
                expires_at: row.expires_at,
                fresh: false,
            },
            User {
                id: row.user_id,
                username: row.username,
            },
        )
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("inserting session", e))?;

        Ok(())
    }

    async fn find_with_user(&self, id: &str) -> Result<Option<(Session, User)>, DomainError> {
        let row: Option<SessionUserRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.user_id, s.expires_at, u.username
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding session", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn update_expiry(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        // Single UPDATE keeps concurrent renewals of one session atomic.
        sqlx::query(
            r#"
            UPDATE sessions SET expires_at = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("renewing session", e))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            DELETE FROM sessions WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("deleting session", e))?;

        Ok(())
    }
}
