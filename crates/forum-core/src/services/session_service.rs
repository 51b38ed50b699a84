//! Session validation and lifecycle
//!
//! Resolves an opaque session token into a validated (session, user) pair.
//! Expired or unknown tokens yield an empty result; sessions inside the
//! renewal window get their expiry extended in the store and come back
//! marked fresh so the caller reissues the cookie.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Session, User};
use crate::error::DomainError;
use crate::repositories::SessionStore;

/// Result of validating a session token. Either both fields are set or
/// neither is.
#[derive(Debug, Clone, Default)]
pub struct ValidatedSession {
    pub session: Option<Session>,
    pub user: Option<User>,
}

impl ValidatedSession {
    fn empty() -> Self {
        Self::default()
    }
}

pub struct SessionService {
    store: Arc<dyn SessionStore>,
    lifetime: Duration,
    renewal_threshold: Duration,
}

impl SessionService {
    /// `renewal_fraction` is the fraction of the total lifetime below which
    /// a session is proactively renewed.
    pub fn new(store: Arc<dyn SessionStore>, lifetime: Duration, renewal_fraction: f64) -> Self {
        let threshold_secs = (lifetime.num_seconds() as f64 * renewal_fraction) as i64;
        Self {
            store,
            lifetime,
            renewal_threshold: Duration::seconds(threshold_secs),
        }
    }

    /// Validate a session token, if one was presented.
    ///
    /// Safe to call concurrently for different tokens; the renewal write is
    /// delegated to the store's atomic update, so concurrent requests holding
    /// the same token cannot race into inconsistent expiry state.
    pub async fn validate(
        &self,
        session_id: Option<&str>,
    ) -> Result<ValidatedSession, DomainError> {
        let Some(id) = session_id else {
            return Ok(ValidatedSession::empty());
        };

        let Some((mut session, user)) = self.store.find_with_user(id).await? else {
            debug!("session not found");
            return Ok(ValidatedSession::empty());
        };

        let now = Utc::now();
        if session.is_expired_at(now) {
            // Fire-and-forget cleanup of the stale record.
            if let Err(e) = self.store.delete(id).await {
                warn!("failed to purge expired session: {}", e);
            }
            return Ok(ValidatedSession::empty());
        }

        if session.expires_at - now < self.renewal_threshold {
            let expires_at = now + self.lifetime;
            self.store.update_expiry(id, expires_at).await?;
            session.expires_at = expires_at;
            session.fresh = true;
            debug!(user_id = %session.user_id, "session renewed");
        }

        Ok(ValidatedSession {
            session: Some(session),
            user: Some(user),
        })
    }

    /// Issue a new session for a user (login/signup flow).
    pub async fn create_session(&self, user_id: Uuid) -> Result<Session, DomainError> {
        let session = Session::new(user_id, Utc::now() + self.lifetime);
        self.store.insert(&session).await?;
        Ok(session)
    }

    /// Delete a session record (logout flow).
    pub async fn invalidate(&self, session_id: &str) -> Result<(), DomainError> {
        self.store.delete(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::session_store::MockSessionStore;
    use chrono::DateTime;
    use mockall::predicate::eq;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
        }
    }

    fn stored_session(user_id: Uuid, expires_at: DateTime<Utc>) -> Session {
        Session {
            id: "a".repeat(40),
            user_id,
            expires_at,
            fresh: false,
        }
    }

    fn service(store: MockSessionStore) -> SessionService {
        SessionService::new(Arc::new(store), Duration::days(30), 0.5)
    }

    #[tokio::test]
    async fn absent_token_skips_store_lookup() {
        let mut store = MockSessionStore::new();
        store.expect_find_with_user().never();

        let validated = service(store).validate(None).await.unwrap();
        assert!(validated.session.is_none());
        assert!(validated.user.is_none());
    }

    #[tokio::test]
    async fn unknown_token_returns_empty_without_delete() {
        let mut store = MockSessionStore::new();
        store
            .expect_find_with_user()
            .with(eq("missing"))
            .return_once(|_| Ok(None));
        store.expect_delete().never();

        let validated = service(store).validate(Some("missing")).await.unwrap();
        assert!(validated.session.is_none());
        assert!(validated.user.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_purged_and_empty() {
        let user = sample_user();
        let session = stored_session(user.id, Utc::now() - Duration::hours(1));
        let id = session.id.clone();

        let mut store = MockSessionStore::new();
        store
            .expect_find_with_user()
            .return_once(move |_| Ok(Some((session, user))));
        store
            .expect_delete()
            .withf({
                let id = id.clone();
                move |arg| arg == id
            })
            .times(1)
            .return_once(|_| Ok(()));
        store.expect_update_expiry().never();

        let validated = service(store).validate(Some(&id)).await.unwrap();
        assert!(validated.session.is_none());
        assert!(validated.user.is_none());
    }

    #[tokio::test]
    async fn purge_failure_is_swallowed() {
        let user = sample_user();
        let session = stored_session(user.id, Utc::now() - Duration::hours(1));
        let id = session.id.clone();

        let mut store = MockSessionStore::new();
        store
            .expect_find_with_user()
            .return_once(move |_| Ok(Some((session, user))));
        store
            .expect_delete()
            .return_once(|_| Err(DomainError::DatabaseError("connection reset".into())));

        let validated = service(store).validate(Some(&id)).await.unwrap();
        assert!(validated.session.is_none());
    }

    #[tokio::test]
    async fn session_outside_renewal_window_is_returned_untouched() {
        // 20 days remaining of a 30-day lifetime, threshold is 15 days.
        let user = sample_user();
        let expires_at = Utc::now() + Duration::days(20);
        let session = stored_session(user.id, expires_at);
        let id = session.id.clone();

        let mut store = MockSessionStore::new();
        store.expect_find_with_user().return_once({
            let user = user.clone();
            move |_| Ok(Some((session, user)))
        });
        store.expect_update_expiry().never();
        store.expect_delete().never();

        let validated = service(store).validate(Some(&id)).await.unwrap();
        let session = validated.session.unwrap();
        assert!(!session.fresh);
        assert_eq!(session.expires_at, expires_at);
        assert_eq!(validated.user.unwrap(), user);
    }

    #[tokio::test]
    async fn session_inside_renewal_window_is_extended_and_fresh() {
        // 14 days remaining of a 30-day lifetime, under the 15-day threshold.
        let user = sample_user();
        let session = stored_session(user.id, Utc::now() + Duration::days(14));
        let id = session.id.clone();

        let mut store = MockSessionStore::new();
        store
            .expect_find_with_user()
            .return_once(move |_| Ok(Some((session, user))));
        store
            .expect_update_expiry()
            .withf(|_, expires_at| {
                let remaining = *expires_at - Utc::now();
                remaining > Duration::days(29) && remaining <= Duration::days(30)
            })
            .times(1)
            .return_once(|_, _| Ok(()));

        let validated = service(store).validate(Some(&id)).await.unwrap();
        let session = validated.session.unwrap();
        assert!(session.fresh);
        assert!(session.expires_at - Utc::now() > Duration::days(29));
    }

    #[tokio::test]
    async fn renewal_write_failure_propagates() {
        let user = sample_user();
        let session = stored_session(user.id, Utc::now() + Duration::days(1));
        let id = session.id.clone();

        let mut store = MockSessionStore::new();
        store
            .expect_find_with_user()
            .return_once(move |_| Ok(Some((session, user))));
        store
            .expect_update_expiry()
            .return_once(|_, _| Err(DomainError::DatabaseError("connection refused".into())));

        let result = service(store).validate(Some(&id)).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn create_session_inserts_full_lifetime() {
        let user_id = Uuid::new_v4();
        let mut store = MockSessionStore::new();
        store
            .expect_insert()
            .withf(move |s| {
                s.user_id == user_id
                    && s.fresh
                    && s.expires_at - Utc::now() > Duration::days(29)
            })
            .times(1)
            .return_once(|_| Ok(()));

        let session = service(store).create_session(user_id).await.unwrap();
        assert_eq!(session.user_id, user_id);
    }

    #[tokio::test]
    async fn invalidate_deletes_record() {
        let mut store = MockSessionStore::new();
        store
            .expect_delete()
            .with(eq("token"))
            .times(1)
            .return_once(|_| Ok(()));

        service(store).invalidate("token").await.unwrap();
    }
}
