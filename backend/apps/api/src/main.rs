//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are rendered
//! by each context's own error type.

mod config;

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, MemoryUserRepository, PgUserRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, StatusCode, header},
    routing::get,
};
use drive::domain::repository::DriveStore;
use drive::{DriveAppState, MemoryDriveRepository, PgDriveRepository, drive_router};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,drive=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    match settings.database_url.clone() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let result = run(
                PgUserRepository::new(pool.clone()),
                PgDriveRepository::new(pool.clone()),
                &settings,
            )
            .await;

            pool.close().await;
            tracing::info!("Database pool closed");
            result
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
            run(
                MemoryUserRepository::new(),
                MemoryDriveRepository::new(),
                &settings,
            )
            .await
        }
    }
}

/// Seed, assemble and serve the application on the chosen store
async fn run<R, D>(users: R, store: D, settings: &Settings) -> anyhow::Result<()>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    D: DriveStore,
{
    // Startup seed: make sure resolution always has a fallback
    let drive_config = settings.drive_config();
    drive::ensure_default_mapping(&store, &drive_config.default_drive_url).await?;

    if let Some(email) = &settings.bootstrap_admin_email {
        // Errors here should not prevent server startup
        if let Err(e) = auth::application::promote_admin(&users, email).await {
            tracing::warn!(error = %e, "Bootstrap admin promotion failed, continuing anyway");
        }
    }

    let auth_state = AuthAppState::new(users, settings.auth_config()?);
    let drive_state = DriveAppState::new(store, auth_state.clone());

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .merge(auth_router(auth_state))
        .merge(drive_router(drive_state));

    let app = Router::new()
        .nest("/api", api)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            settings.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = settings.bind_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/ping
async fn ping() -> Json<Value> {
    Json(json!({
        "message": "pong",
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}

/// Resolves on Ctrl+C (or SIGTERM on unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
