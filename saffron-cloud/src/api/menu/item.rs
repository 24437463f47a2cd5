//! Menu item CRUD handlers (subscription-gated)

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::item::{MenuItemCreate, MenuItemUpdate};
use shared::util::now_millis;

use crate::api::ApiResult;
use crate::auth::subscription_gate::TenantContext;
use crate::db;
use crate::db::menu::item::MenuItem;
use crate::state::AppState;

fn validate_item(name: &str, price: Decimal) -> Result<(), AppError> {
    let len = name.trim().len();
    if !(2..=100).contains(&len) {
        return Err(AppError::validation("Item name must be 2-100 characters"));
    }
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must be a positive number"));
    }
    Ok(())
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Json(data): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    validate_item(&data.name, data.price)?;

    // The target category must belong to the caller's restaurant
    db::menu::category::find_owned(&state.pool, ctx.restaurant.id, data.category_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let now = now_millis();
    let item = db::menu::item::create(&state.pool, &data, now).await?;

    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(item_id): Path<i64>,
    Json(data): Json<MenuItemUpdate>,
) -> ApiResult<MenuItem> {
    if let Some(ref name) = data.name {
        if !(2..=100).contains(&name.trim().len()) {
            return Err(AppError::validation("Item name must be 2-100 characters").into());
        }
    }
    if let Some(price) = data.price {
        if price < Decimal::ZERO {
            return Err(AppError::validation("Price must be a positive number").into());
        }
    }

    let item = db::menu::item::update(&state.pool, ctx.restaurant.id, item_id, &data)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<TenantContext>,
    Path(item_id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::menu::item::delete(&state.pool, ctx.restaurant.id, item_id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).into());
    }

    Ok(Json(serde_json::json!({ "message": "Menu item deleted" })))
}
