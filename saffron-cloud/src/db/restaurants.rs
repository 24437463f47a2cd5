use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub theme_color: String,
    pub created_at: i64,
}

/// Restaurant joined with its owner account (admin console listing)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RestaurantWithOwner {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub theme_color: String,
    pub created_at: i64,
    pub owner_name: String,
    pub owner_email: String,
}

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    name: &str,
    slug: &str,
    now: i64,
) -> Result<Restaurant, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO restaurants (user_id, name, slug, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(user_id)
    .bind(name)
    .bind(slug)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM restaurants WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn list_with_owners(pool: &PgPool) -> Result<Vec<RestaurantWithOwner>, sqlx::Error> {
    sqlx::query_as(
        "SELECT r.id, r.name, r.slug, r.address, r.theme_color, r.created_at,
                u.name AS owner_name, u.email AS owner_email
         FROM restaurants r
         JOIN users u ON u.id = r.user_id
         ORDER BY r.created_at DESC, r.id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM restaurants")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
