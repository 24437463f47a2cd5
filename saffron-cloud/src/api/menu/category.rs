//! Category CRUD handlers (subscription-gated)

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::category::{CategoryCreate, CategoryUpdate};
use shared::util::now_millis;

use crate::api::ApiResult;
use crate::auth::subscription_gate::TenantContext;
use crate::db;
use crate::db::menu::category::Category;
use crate::state::AppState;

fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.trim().len();
    if !(2..=100).contains(&len) {
        return Err(AppError::validation("Category name must be 2-100 characters"));
    }
    Ok(())
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Json(data): Json<CategoryCreate>,
) -> ApiResult<Category> {
    validate_name(&data.name)?;

    let now = now_millis();
    let category =
        db::menu::category::create(&state.pool, ctx.restaurant.id, &data, now).await?;

    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(category_id): Path<i64>,
    Json(data): Json<CategoryUpdate>,
) -> ApiResult<Category> {
    if let Some(ref name) = data.name {
        validate_name(name)?;
    }

    let category = db::menu::category::update(&state.pool, ctx.restaurant.id, category_id, &data)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(category_id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::menu::category::delete(&state.pool, ctx.restaurant.id, category_id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::CategoryNotFound).into());
    }

    Ok(Json(serde_json::json!({ "message": "Category deleted" })))
}
