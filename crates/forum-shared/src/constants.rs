//! Application constants

/// Cookie name used when the configuration does not override it.
pub const DEFAULT_SESSION_COOKIE: &str = "forum_session";

/// Default session lifetime in days.
pub const DEFAULT_SESSION_LIFETIME_DAYS: i64 = 30;

/// Fraction of the lifetime below which a session is renewed.
pub const DEFAULT_RENEWAL_FRACTION: f64 = 0.5;

/// Paths exempt from session validation by default.
pub const DEFAULT_PUBLIC_PATHS: [&str; 2] = ["/api/auth/login", "/api/auth/signup"];
