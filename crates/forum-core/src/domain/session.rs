//! Session domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

const TOKEN_LEN: usize = 40;
const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A server-issued credential linking an opaque token to a user and an expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque token, also the primary key in the store.
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    /// Derived, never persisted: the session was just issued or renewed and
    /// its cookie must be (re)sent on this response.
    pub fresh: bool,
}

impl Session {
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_token(),
            user_id,
            expires_at,
            fresh: true,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

fn generate_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}
