//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl AppSettings {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub lifetime_days: i64,
    pub renewal_fraction: f64,
    /// Exact-match request paths exempt from session validation.
    pub public_paths: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 3000)?
            .set_default("app.name", "forum-server")?
            .set_default("database.max_connections", 10)?
            .set_default("session.cookie_name", constants::DEFAULT_SESSION_COOKIE)?
            .set_default(
                "session.lifetime_days",
                constants::DEFAULT_SESSION_LIFETIME_DAYS,
            )?
            .set_default(
                "session.renewal_fraction",
                constants::DEFAULT_RENEWAL_FRACTION,
            )?
            .set_default(
                "session.public_paths",
                constants::DEFAULT_PUBLIC_PATHS.to_vec(),
            )?
            .set_default("cors.allowed_origin", "http://localhost:5173")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
