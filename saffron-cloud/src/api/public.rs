//! Public menu endpoint (no authentication)
//!
//! The public page is subscription-gated: a lapsed restaurant still resolves
//! (its data is intact) but only the header is returned, with a
//! machine-readable `subscription_expired` flag.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::db;
use crate::db::restaurants::Restaurant;
use crate::state::AppState;

use super::ApiResult;
use super::menu::{MenuCategory, assemble};

/// Restaurant header shown on the public page
#[derive(Serialize)]
pub struct PublicRestaurant {
    pub name: String,
    pub logo_url: Option<String>,
    pub address: Option<String>,
    pub theme_color: String,
}

#[derive(Serialize)]
pub struct PublicMenuResponse {
    pub restaurant: PublicRestaurant,
    pub subscription_expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<MenuCategory>>,
}

impl PublicRestaurant {
    fn from_row(r: &Restaurant) -> Self {
        Self {
            name: r.name.clone(),
            logo_url: r.logo_url.clone(),
            address: r.address.clone(),
            theme_color: r.theme_color.clone(),
        }
    }
}

// ── GET /api/public/menu/{slug} ──

pub async fn get_public_menu(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<PublicMenuResponse> {
    let restaurant = db::restaurants::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let now = now_millis();
    let usable = db::subscriptions::find_usable(&state.pool, restaurant.id, now).await?;

    if usable.is_none() {
        return Ok(Json(PublicMenuResponse {
            restaurant: PublicRestaurant::from_row(&restaurant),
            subscription_expired: true,
            message: Some("This restaurant's digital menu is currently inactive.".into()),
            categories: None,
        }));
    }

    let categories = db::menu::category::list_for_restaurant(&state.pool, restaurant.id).await?;
    let items = db::menu::item::list_available_for_restaurant(&state.pool, restaurant.id).await?;

    // Hide categories with nothing available in them
    let categories: Vec<MenuCategory> = assemble(categories, items)
        .into_iter()
        .filter(|c| !c.items.is_empty())
        .collect();

    Ok(Json(PublicMenuResponse {
        restaurant: PublicRestaurant::from_row(&restaurant),
        subscription_expired: false,
        message: None,
        categories: Some(categories),
    }))
}
