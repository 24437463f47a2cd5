//! Subscription plan catalog
//!
//! The catalog is the single source of truth for pricing and durations;
//! purchase and grant paths snapshot name/price into the ledger at creation
//! time, so later catalog edits never rewrite history.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::plan::PlanUpdate;
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub duration_days: i32,
    pub features: Vec<String>,
    pub is_active: bool,
    pub badge_text: Option<String>,
    pub badge_color: String,
    pub badge_enabled: bool,
    pub created_at: i64,
}

/// Purchasable plans for the public pricing page, cheapest first
pub async fn list_active(pool: &PgPool) -> Result<Vec<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM subscription_plans WHERE is_active ORDER BY price ASC, id ASC")
        .fetch_all(pool)
        .await
}

/// Full catalog for the admin console, including soft-disabled plans
pub async fn list_all(pool: &PgPool) -> Result<Vec<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM subscription_plans ORDER BY price ASC, id ASC")
        .fetch_all(pool)
        .await
}

pub async fn find_active_by_id(
    pool: &PgPool,
    id: i64,
) -> Result<Option<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM subscription_plans WHERE id = $1 AND is_active")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Name-based lookup, kept for the admin grant path (plan named "Free")
pub async fn find_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM subscription_plans WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// Partial update; returns `None` when the plan does not exist
pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &PlanUpdate,
) -> Result<Option<SubscriptionPlan>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE subscription_plans SET
            name = COALESCE($1, name),
            price = COALESCE($2, price),
            duration_days = COALESCE($3, duration_days),
            features = COALESCE($4, features),
            badge_text = COALESCE($5, badge_text),
            badge_color = COALESCE($6, badge_color),
            badge_enabled = COALESCE($7, badge_enabled)
         WHERE id = $8
         RETURNING *",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.duration_days)
    .bind(&data.features)
    .bind(&data.badge_text)
    .bind(&data.badge_color)
    .bind(data.badge_enabled)
    .bind(id)
    .fetch_optional(pool)
    .await
}
