//! saffron-cloud — QR menu SaaS backend
//!
//! Long-running service that:
//! - Hosts restaurant accounts and their digital menus (JWT authenticated)
//! - Gates menu mutations and the public menu page on an active subscription
//! - Verifies Razorpay payment callbacks and maintains the subscription ledger
//! - Sweeps stale active subscriptions on a daily schedule

mod api;
mod auth;
mod config;
mod db;
mod error;
mod jobs;
mod payments;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saffron_cloud=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting saffron-cloud (env: {})", config.environment);

    // Initialize application state (DB pool + migrations)
    let state = AppState::new(&config).await?;

    // Background subscription expiry sweep (daily, first tick at startup)
    jobs::spawn_expiry_sweeper(state.pool.clone());

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("saffron-cloud HTTP listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
