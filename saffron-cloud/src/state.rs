//! Application state for saffron-cloud

use sqlx::PgPool;

use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::payments::RazorpayClient;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Shared secret guarding the admin bootstrap endpoint
    pub admin_creation_key: String,
    /// Base URL used to build public menu links
    pub public_base_url: String,
    /// Razorpay REST client (disabled when keys are missing)
    pub razorpay: RazorpayClient,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Create a new AppState: connect the pool and run pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let razorpay = RazorpayClient::new(
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        );

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            admin_creation_key: config.admin_creation_key.clone(),
            public_base_url: config.public_base_url.clone(),
            razorpay,
            rate_limiter: RateLimiter::new(),
        })
    }
}
