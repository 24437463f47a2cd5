//! Cloud server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Shared secret guarding the admin bootstrap endpoint
    pub admin_creation_key: String,
    /// Razorpay key id (payment features disabled when unset)
    pub razorpay_key_id: Option<String>,
    /// Razorpay key secret (payment features disabled when unset)
    pub razorpay_key_secret: Option<String>,
    /// Base URL used to build public menu links from restaurant slugs
    pub public_base_url: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            admin_creation_key: Self::require_secret("ADMIN_CREATION_KEY", &environment)?,
            razorpay_key_id: std::env::var("RAZORPAY_KEY_ID")
                .ok()
                .filter(|s| !s.is_empty()),
            razorpay_key_secret: std::env::var("RAZORPAY_KEY_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            environment,
        })
    }
}
