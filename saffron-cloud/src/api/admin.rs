//! Admin console endpoints: platform stats, restaurant overview, manual
//! subscription management, plan catalog maintenance

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::plan::PlanUpdate;
use shared::status::UserRole;
use shared::util::{now_millis, remaining_days};

use crate::db;
use crate::db::plans::SubscriptionPlan;
use crate::db::restaurants::RestaurantWithOwner;
use crate::db::subscriptions::{LedgerEntry, NewPeriod, Subscription, is_usable};
use crate::state::AppState;
use crate::util::hash_password;

use super::ApiResult;

// ── POST /api/admin/create-admin ──
//
// Bootstrap path: guarded by a shared secret instead of a session, so the
// first admin can be created on a fresh deployment.

#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub admin_key: String,
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(req): Json<CreateAdminRequest>,
) -> ApiResult<serde_json::Value> {
    if req.admin_key != state.admin_creation_key {
        return Err(AppError::new(ErrorCode::InvalidAdminKey).into());
    }

    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email").into());
    }
    if req.password.len() < 8 {
        return Err(AppError::validation("Password must be at least 8 characters").into());
    }

    if db::users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::already_exists("Account").into());
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::new(ErrorCode::InternalError)
    })?;

    let now = now_millis();
    let admin = db::users::create(
        &state.pool,
        &email,
        &hashed,
        req.name.trim(),
        UserRole::Admin.as_db(),
        now,
    )
    .await?;

    tracing::info!(user_id = admin.id, "Admin account created");

    Ok(Json(serde_json::json!({
        "message": "Admin created",
        "admin": admin,
    })))
}

// ── GET /api/admin/restaurants ──

/// Derived subscription state shown per restaurant in the console
#[derive(Debug, Serialize)]
pub struct SubscriptionInfo {
    /// active | expired | pending | none
    pub status: String,
    pub expiry_date: Option<i64>,
    pub remaining_days: i64,
    pub plan_name: Option<String>,
}

/// Summarize a restaurant's newest ledger row against the clock.
///
/// A row whose status still reads `active` but whose end date has passed is
/// reported as expired, matching the access gate's view ahead of the sweep.
fn subscription_info(latest: Option<&Subscription>, now: i64) -> SubscriptionInfo {
    let Some(sub) = latest else {
        return SubscriptionInfo {
            status: "none".into(),
            expiry_date: None,
            remaining_days: 0,
            plan_name: None,
        };
    };

    let status = if is_usable(&sub.status, sub.end_date, now) {
        "active".into()
    } else if sub.end_date < now {
        "expired".into()
    } else {
        sub.status.clone()
    };

    SubscriptionInfo {
        status,
        expiry_date: Some(sub.end_date),
        remaining_days: if is_usable(&sub.status, sub.end_date, now) {
            remaining_days(now, sub.end_date)
        } else {
            0
        },
        plan_name: Some(sub.plan_name.clone()),
    }
}

#[derive(Serialize)]
pub struct RestaurantOverview {
    #[serde(flatten)]
    pub restaurant: RestaurantWithOwner,
    pub subscription_info: SubscriptionInfo,
}

pub async fn list_restaurants(
    State(state): State<AppState>,
) -> ApiResult<Vec<RestaurantOverview>> {
    let restaurants = db::restaurants::list_with_owners(&state.pool).await?;
    let latest = db::subscriptions::latest_per_restaurant(&state.pool).await?;

    let mut latest_by_restaurant: std::collections::HashMap<i64, Subscription> =
        latest.into_iter().map(|s| (s.restaurant_id, s)).collect();

    let now = now_millis();
    let overview = restaurants
        .into_iter()
        .map(|r| {
            let info = subscription_info(latest_by_restaurant.remove(&r.id).as_ref(), now);
            RestaurantOverview {
                restaurant: r,
                subscription_info: info,
            }
        })
        .collect();

    Ok(Json(overview))
}

// ── GET /api/admin/stats ──

#[derive(Serialize)]
pub struct PlatformStats {
    pub total_restaurants: i64,
    pub total_users: i64,
    pub active_subscriptions: i64,
}

pub async fn get_stats(State(state): State<AppState>) -> ApiResult<PlatformStats> {
    let now = now_millis();
    let total_restaurants = db::restaurants::count(&state.pool).await?;
    let total_users =
        db::users::count_by_role(&state.pool, UserRole::Restaurant.as_db()).await?;
    let active_subscriptions = db::subscriptions::count_active(&state.pool, now).await?;

    Ok(Json(PlatformStats {
        total_restaurants,
        total_users,
        active_subscriptions,
    }))
}

// ── GET /api/admin/subscriptions ──

pub async fn list_subscriptions(State(state): State<AppState>) -> ApiResult<Vec<LedgerEntry>> {
    let ledger = db::subscriptions::list_all(&state.pool).await?;
    Ok(Json(ledger))
}

// ── POST /api/admin/restaurants/{id}/extend-subscription ──

#[derive(Deserialize)]
pub struct ExtendRequest {
    pub days: i32,
}

pub async fn extend_subscription(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
    Json(req): Json<ExtendRequest>,
) -> ApiResult<serde_json::Value> {
    if !(1..=3650).contains(&req.days) {
        return Err(AppError::validation("Days must be between 1 and 3650").into());
    }

    db::restaurants::find_by_id(&state.pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let subscription = db::subscriptions::extend_latest(&state.pool, restaurant_id, req.days)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NoSubscriptionHistory))?;

    tracing::info!(
        restaurant_id,
        days = req.days,
        new_end = subscription.end_date,
        "Subscription extended by admin"
    );

    Ok(Json(serde_json::json!({
        "message": format!("Subscription extended by {} days", req.days),
        "subscription": subscription,
    })))
}

// ── POST /api/admin/restaurants/{id}/grant-free-month ──

pub async fn grant_free_month(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    db::restaurants::find_by_id(&state.pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let plan = db::plans::find_by_name(&state.pool, "Free")
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    let now = now_millis();
    let subscription = db::subscriptions::activate_period(
        &state.pool,
        &NewPeriod {
            restaurant_id,
            plan_name: &plan.name,
            price: plan.price,
            duration_days: plan.duration_days,
            payment_method: "admin_grant",
            transaction_id: None,
            now,
        },
    )
    .await?;

    tracing::info!(restaurant_id, "Free month granted by admin");

    Ok(Json(serde_json::json!({
        "message": "1 month free subscription granted",
        "subscription": subscription,
    })))
}

// ── GET /api/admin/subscription-plans ──

pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Vec<SubscriptionPlan>> {
    let plans = db::plans::list_all(&state.pool).await?;
    Ok(Json(plans))
}

// ── PUT /api/admin/subscription-plans/{id} ──

pub async fn update_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
    Json(data): Json<PlanUpdate>,
) -> ApiResult<SubscriptionPlan> {
    if let Some(price) = data.price {
        if price < rust_decimal::Decimal::ZERO {
            return Err(AppError::validation("Price must not be negative").into());
        }
    }
    if let Some(days) = data.duration_days {
        if days <= 0 {
            return Err(AppError::validation("Duration must be positive").into());
        }
    }

    let plan = db::plans::update(&state.pool, plan_id, &data)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    tracing::info!(plan_id, plan = %plan.name, "Subscription plan updated");

    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::util::DAY_MS;

    fn sub(status: &str, start: i64, end: i64) -> Subscription {
        Subscription {
            id: 1,
            restaurant_id: 1,
            plan_name: "monthly".into(),
            price: Decimal::new(49900, 2),
            start_date: start,
            end_date: end,
            status: status.into(),
            payment_method: None,
            transaction_id: None,
            created_at: start,
        }
    }

    #[test]
    fn test_info_without_history() {
        let info = subscription_info(None, 0);
        assert_eq!(info.status, "none");
        assert_eq!(info.remaining_days, 0);
        assert!(info.expiry_date.is_none());
        assert!(info.plan_name.is_none());
    }

    #[test]
    fn test_info_running_subscription() {
        let now = 10 * DAY_MS;
        // ends in 2.5 days -> reported as 3 remaining
        let s = sub("active", 0, now + 2 * DAY_MS + DAY_MS / 2);
        let info = subscription_info(Some(&s), now);
        assert_eq!(info.status, "active");
        assert_eq!(info.remaining_days, 3);
        assert_eq!(info.plan_name.as_deref(), Some("monthly"));
    }

    #[test]
    fn test_info_stale_active_row_reports_expired() {
        // The sweep has not run yet, but the console must not show this as live
        let now = 40 * DAY_MS;
        let s = sub("active", 0, 30 * DAY_MS);
        let info = subscription_info(Some(&s), now);
        assert_eq!(info.status, "expired");
        assert_eq!(info.remaining_days, 0);
    }

    #[test]
    fn test_info_pending_row_keeps_its_status() {
        let now = 10 * DAY_MS;
        let s = sub("pending", now, now + 30 * DAY_MS);
        let info = subscription_info(Some(&s), now);
        assert_eq!(info.status, "pending");
        assert_eq!(info.remaining_days, 0);
    }
}
