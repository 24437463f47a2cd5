//! Menu item database operations
//!
//! Items hang off categories; ownership checks go through the category's
//! restaurant_id. `image_url` mirrors the first entry of `image_urls` for
//! older clients.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::item::{MenuItemCreate, MenuItemUpdate};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
    pub is_available: bool,
    pub sort_order: i32,
    pub is_veg: bool,
    pub created_at: i64,
}

/// All items across a restaurant's categories, in display order
pub async fn list_for_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(
        "SELECT m.* FROM menu_items m
         JOIN categories c ON c.id = m.category_id
         WHERE c.restaurant_id = $1
         ORDER BY m.category_id, m.sort_order, m.id",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

/// Available items only (public menu page)
pub async fn list_available_for_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(
        "SELECT m.* FROM menu_items m
         JOIN categories c ON c.id = m.category_id
         WHERE c.restaurant_id = $1 AND m.is_available
         ORDER BY m.category_id, m.sort_order, m.id",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

/// Insert a new item; the caller has already verified category ownership
pub async fn create(
    pool: &PgPool,
    data: &MenuItemCreate,
    now: i64,
) -> Result<MenuItem, sqlx::Error> {
    let image_url = data.image_urls.first().cloned();
    sqlx::query_as(
        "INSERT INTO menu_items
            (category_id, name, description, price, image_url, image_urls,
             is_available, sort_order, is_veg, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(image_url)
    .bind(&data.image_urls)
    .bind(data.is_available.unwrap_or(true))
    .bind(data.sort_order.unwrap_or(0))
    .bind(data.is_veg.unwrap_or(true))
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Partial update, scoped to the owning restaurant through the category join;
/// returns `None` when the item does not exist or is not owned
pub async fn update(
    pool: &PgPool,
    restaurant_id: i64,
    item_id: i64,
    data: &MenuItemUpdate,
) -> Result<Option<MenuItem>, sqlx::Error> {
    let image_url = data
        .image_urls
        .as_ref()
        .map(|urls| urls.first().cloned())
        .unwrap_or(None);
    sqlx::query_as(
        "UPDATE menu_items m SET
            name = COALESCE($1, m.name),
            description = COALESCE($2, m.description),
            price = COALESCE($3, m.price),
            image_url = COALESCE($4, m.image_url),
            image_urls = COALESCE($5, m.image_urls),
            is_available = COALESCE($6, m.is_available),
            sort_order = COALESCE($7, m.sort_order),
            is_veg = COALESCE($8, m.is_veg)
         FROM categories c
         WHERE m.id = $9 AND m.category_id = c.id AND c.restaurant_id = $10
         RETURNING m.*",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(image_url)
    .bind(&data.image_urls)
    .bind(data.is_available)
    .bind(data.sort_order)
    .bind(data.is_veg)
    .bind(item_id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await
}

/// Returns `false` when nothing was deleted (missing or not owned)
pub async fn delete(pool: &PgPool, restaurant_id: i64, item_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM menu_items m
         USING categories c
         WHERE m.id = $1 AND m.category_id = c.id AND c.restaurant_id = $2",
    )
    .bind(item_id)
    .bind(restaurant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
