//! Authentication endpoints: register, login, profile

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::status::UserRole;
use shared::util::now_millis;

use crate::auth::session::{UserIdentity, create_token};
use crate::db;
use crate::db::restaurants::Restaurant;
use crate::db::users::User;
use crate::state::AppState;
use crate::util::{hash_password, slugify, verify_password};

use super::ApiResult;

// ── POST /api/auth/register ──

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub restaurant_name: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub restaurant: Option<RestaurantSummary>,
}

#[derive(Serialize)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Public menu link for this restaurant (QR targets point here)
    pub menu_url: String,
}

fn restaurant_summary(restaurant: &Restaurant, base_url: &str) -> RestaurantSummary {
    RestaurantSummary {
        id: restaurant.id,
        name: restaurant.name.clone(),
        slug: restaurant.slug.clone(),
        menu_url: format!("{base_url}/menu/{}", restaurant.slug),
    }
}

/// Derive a slug from the restaurant name, appending a numeric suffix until
/// it is unique.
async fn unique_slug(state: &AppState, name: &str) -> Result<String, AppError> {
    let base = {
        let s = slugify(name);
        if s.is_empty() { "restaurant".to_string() } else { s }
    };

    let mut candidate = base.clone();
    let mut suffix = 2;
    loop {
        let taken = db::restaurants::slug_exists(&state.pool, &candidate)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Slug lookup failed");
                AppError::new(ErrorCode::InternalError)
            })?;
        if !taken {
            return Ok(candidate);
        }
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();
    let name = req.name.trim();
    let restaurant_name = req.restaurant_name.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email").into());
    }
    if req.password.len() < 8 {
        return Err(AppError::validation("Password must be at least 8 characters").into());
    }
    if name.len() < 2 || name.len() > 100 {
        return Err(AppError::validation("Name must be 2-100 characters").into());
    }
    if restaurant_name.len() < 2 || restaurant_name.len() > 100 {
        return Err(AppError::validation("Restaurant name must be 2-100 characters").into());
    }

    if db::users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::already_exists("Account").into());
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::new(ErrorCode::InternalError)
    })?;

    let now = now_millis();
    let user = db::users::create(
        &state.pool,
        &email,
        &hashed,
        name,
        UserRole::Restaurant.as_db(),
        now,
    )
    .await?;

    let slug = unique_slug(&state, restaurant_name).await?;
    let restaurant = db::restaurants::create(&state.pool, user.id, restaurant_name, &slug, now)
        .await?;

    let token = create_token(user.id, &user.email, &user.role, &state.jwt_secret).map_err(|e| {
        tracing::error!(error = %e, "JWT creation failed");
        AppError::new(ErrorCode::InternalError)
    })?;

    tracing::info!(user_id = user.id, restaurant_id = restaurant.id, slug = %restaurant.slug, "Restaurant registered");

    let summary = restaurant_summary(&restaurant, &state.public_base_url);
    Ok(Json(AuthResponse {
        token,
        user,
        restaurant: Some(summary),
    }))
}

// ── POST /api/auth/login ──

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = req.email.trim().to_lowercase();

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::new(ErrorCode::InvalidCredentials).into());
    }

    let token = create_token(user.id, &user.email, &user.role, &state.jwt_secret).map_err(|e| {
        tracing::error!(error = %e, "JWT creation failed");
        AppError::new(ErrorCode::InternalError)
    })?;

    let restaurant = db::restaurants::find_by_user(&state.pool, user.id)
        .await?
        .map(|r| restaurant_summary(&r, &state.public_base_url));

    Ok(Json(AuthResponse {
        token,
        user,
        restaurant,
    }))
}

// ── GET /api/auth/profile ──

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub restaurant: Option<Restaurant>,
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<ProfileResponse> {
    let user = db::users::find_by_id(&state.pool, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NotFound))?;

    let restaurant = db::restaurants::find_by_user(&state.pool, user.id).await?;

    Ok(Json(ProfileResponse { user, restaurant }))
}
