use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use blood_donation_api::middleware::create_cors_layer;
use blood_donation_api::routes::{create_api_router, AppState};
use blood_donation_api::services::SeedService;
use blood_donation_api::storage::sqlite;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controls the log level (default: info)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://blood_donation.db".to_string());
    info!(database_url, "connecting to database");

    let pool = sqlite::connect(&database_url).await?;

    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@blooddonation.local".to_string());
    let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("ADMIN_PASSWORD not set, using default development credential");
        "admin".to_string()
    });
    SeedService::seed_admin(&pool, &admin_email, &admin_password).await?;

    let app_state = AppState::new(pool);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/v1", create_api_router())
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer()),
        );

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string());
    let addr: SocketAddr = bind_addr.parse()?;
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
