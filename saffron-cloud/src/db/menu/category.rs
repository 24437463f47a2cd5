//! Category database operations
//!
//! Every query is scoped to the owning restaurant so a tenant can never see
//! or mutate another tenant's categories.

use serde::Serialize;
use shared::models::category::{CategoryCreate, CategoryUpdate};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub sort_order: i32,
    pub created_at: i64,
}

pub async fn list_for_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM categories
         WHERE restaurant_id = $1
         ORDER BY sort_order, id",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

pub async fn find_owned(
    pool: &PgPool,
    restaurant_id: i64,
    category_id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE id = $1 AND restaurant_id = $2")
        .bind(category_id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    restaurant_id: i64,
    data: &CategoryCreate,
    now: i64,
) -> Result<Category, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO categories (restaurant_id, name, sort_order, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(restaurant_id)
    .bind(&data.name)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Partial update; returns `None` when the category does not exist or
/// belongs to another restaurant
pub async fn update(
    pool: &PgPool,
    restaurant_id: i64,
    category_id: i64,
    data: &CategoryUpdate,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE categories SET
            name = COALESCE($1, name),
            sort_order = COALESCE($2, sort_order)
         WHERE id = $3 AND restaurant_id = $4
         RETURNING *",
    )
    .bind(&data.name)
    .bind(data.sort_order)
    .bind(category_id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await
}

/// Returns `false` when nothing was deleted (missing or not owned)
pub async fn delete(
    pool: &PgPool,
    restaurant_id: i64,
    category_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND restaurant_id = $2")
        .bind(category_id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
