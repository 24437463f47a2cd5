//! JWT session authentication for the management API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::status::UserRole;

use crate::state::AppState;

/// JWT claims for a platform user
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Role: admin | restaurant
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from JWT
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: i64,
    pub email: String,
    pub role: String,
}

impl UserIdentity {
    pub fn is_admin(&self) -> bool {
        UserRole::from_db(&self.role) == Some(UserRole::Admin)
    }
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a user
pub fn create_token(
    user_id: i64,
    email: &str,
    role: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a token, returning the identity it carries
pub fn decode_token(token: &str, secret: &str) -> Result<UserIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::new(ErrorCode::TokenExpired)
            }
            _ => AppError::new(ErrorCode::TokenInvalid),
        }
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::new(ErrorCode::TokenInvalid))?;

    Ok(UserIdentity {
        user_id,
        email: token_data.claims.email,
        role: token_data.claims.role,
    })
}

/// Middleware that extracts and verifies the JWT from the Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::new(ErrorCode::NotAuthenticated).into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::new(ErrorCode::TokenInvalid).into_response())?;

    let identity = decode_token(token, &state.jwt_secret).map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Middleware that requires an admin role.
///
/// Must run AFTER `auth_middleware` (requires UserIdentity in extensions).
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, Response> {
    let identity = request
        .extensions()
        .get::<UserIdentity>()
        .ok_or_else(|| AppError::new(ErrorCode::InternalError).into_response())?;

    if !identity.is_admin() {
        return Err(AppError::new(ErrorCode::AdminRequired).into_response());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(42, "owner@example.com", "restaurant", "test-secret").unwrap();
        let identity = decode_token(&token, "test-secret").unwrap();
        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.email, "owner@example.com");
        assert_eq!(identity.role, "restaurant");
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(42, "owner@example.com", "restaurant", "test-secret").unwrap();
        let err = decode_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = decode_token("not.a.jwt", "test-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_admin_role() {
        let token = create_token(1, "root@example.com", "admin", "test-secret").unwrap();
        let identity = decode_token(&token, "test-secret").unwrap();
        assert!(identity.is_admin());
    }
}
