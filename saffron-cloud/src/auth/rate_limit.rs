//! Application-layer rate limiting for login and registration routes
//!
//! Fixed per-IP windows, kept in memory; entries are swept by a periodic
//! cleanup task spawned in `main`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Per-route limit configuration
struct Limit {
    route: &'static str,
    max_requests: u32,
    window_secs: u64,
}

const LOGIN_LIMIT: Limit = Limit {
    route: "login",
    max_requests: 5,
    window_secs: 60,
};

const REGISTER_LIMIT: Limit = Limit {
    route: "register",
    max_requests: 3,
    window_secs: 60,
};

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    async fn check(&self, limit: &Limit, ip: &str) -> bool {
        let mut map = self.inner.lock().await;
        let route_map = map.entry(limit.route).or_default();
        let now = Instant::now();

        let entry = route_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start).as_secs() >= limit.window_secs {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= limit.max_requests
    }

    /// Remove entries whose window started more than 5 minutes ago
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(300);
        let now = Instant::now();

        for route_map in map.values_mut() {
            route_map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
        }

        map.retain(|_, route_map| !route_map.is_empty());
    }
}

/// Extract client IP: X-Forwarded-For header first (proxy/CDN), then peer address.
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
    {
        // X-Forwarded-For can be comma-separated; first entry is the original client
        if let Some(first) = val.split(',').next() {
            let ip = first.trim();
            if !ip.is_empty() {
                return ip.to_owned();
            }
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn too_many_requests() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        axum::Json(serde_json::json!({"error": "Too many requests, try again later"})),
    )
        .into_response()
}

/// Rate limit middleware for login
pub async fn login_rate_limit(
    State(state): State<crate::state::AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check(&LOGIN_LIMIT, &ip).await {
        return Err(too_many_requests());
    }
    Ok(next.run(request).await)
}

/// Rate limit middleware for registration
pub async fn register_rate_limit(
    State(state): State<crate::state::AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = extract_ip(&request);
    if !state.rate_limiter.check(&REGISTER_LIMIT, &ip).await {
        return Err(too_many_requests());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_exhausts_within_window() {
        let limiter = RateLimiter::new();
        for _ in 0..LOGIN_LIMIT.max_requests {
            assert!(limiter.check(&LOGIN_LIMIT, "10.0.0.1").await);
        }
        assert!(!limiter.check(&LOGIN_LIMIT, "10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_limits_are_per_ip_and_per_route() {
        let limiter = RateLimiter::new();
        for _ in 0..REGISTER_LIMIT.max_requests {
            assert!(limiter.check(&REGISTER_LIMIT, "10.0.0.1").await);
        }
        assert!(!limiter.check(&REGISTER_LIMIT, "10.0.0.1").await);

        // Other IPs and other routes are unaffected
        assert!(limiter.check(&REGISTER_LIMIT, "10.0.0.2").await);
        assert!(limiter.check(&LOGIN_LIMIT, "10.0.0.1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_after_expiry() {
        let limiter = RateLimiter::new();
        for _ in 0..LOGIN_LIMIT.max_requests {
            assert!(limiter.check(&LOGIN_LIMIT, "10.0.0.1").await);
        }
        assert!(!limiter.check(&LOGIN_LIMIT, "10.0.0.1").await);

        tokio::time::advance(std::time::Duration::from_secs(LOGIN_LIMIT.window_secs + 1)).await;
        assert!(limiter.check(&LOGIN_LIMIT, "10.0.0.1").await);
    }
}
