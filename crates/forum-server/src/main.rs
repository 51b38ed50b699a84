use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use chrono::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use forum_api::{build_router, error::set_production_mode, AppState};
use forum_core::services::{AuthService, SessionService};
use forum_infrastructure::database::connection;
use forum_infrastructure::{PgSessionStore, PgUserRepository};
use forum_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    forum_shared::telemetry::init_telemetry();

    info!("Forum server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    set_production_mode(config.app.is_production());

    // Connect to Database
    info!("Connecting to database...");
    let pool = connection::create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    // Create App State
    let sessions = Arc::new(SessionService::new(
        Arc::new(PgSessionStore::new(pool.clone())),
        Duration::days(config.session.lifetime_days),
        config.session.renewal_fraction,
    ));
    let auth = Arc::new(AuthService::new(Arc::new(PgUserRepository::new(pool))));
    let state = AppState {
        sessions,
        auth,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(config.cors.allowed_origin.parse::<HeaderValue>()?)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
