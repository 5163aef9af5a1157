// Main entry point for the Telegram auth relay

use std::sync::Arc;

use anyhow::{Context, Result};
use relay_core::domains::auth::AuthService;
use relay_core::kernel::scheduled_tasks::start_scheduler;
use relay_core::kernel::TelegramProvider;
use relay_core::server::build_app;
use relay_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Telegram Auth Relay");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Build the lifecycle controller on top of the Telegram gateway
    let provider = Arc::new(TelegramProvider::new(
        config.api_id,
        config.api_hash.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        pool.clone(),
        provider,
        config.session_expiry_days,
    ));

    // Start the session liveness sweep
    let _scheduler = start_scheduler(auth.clone(), config.sweep_interval_minutes)
        .await
        .context("Failed to start scheduled tasks")?;

    // Build application
    let app = build_app(pool, auth);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
