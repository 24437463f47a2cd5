//! Menu API handlers
//!
//! Reads are available to any authenticated tenant; every mutation sits
//! behind the subscription gate, so a lapsed tenant keeps their data and
//! loses only the write path.

mod category;
mod item;

pub use category::{create_category, delete_category, update_category};
pub use item::{create_item, delete_item, update_item};

use axum::{Extension, Json, extract::State};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};

use crate::auth::session::UserIdentity;
use crate::db;
use crate::db::menu::category::Category;
use crate::db::menu::item::MenuItem;
use crate::db::restaurants::Restaurant;
use crate::state::AppState;

use super::ApiResult;

/// Category with its items nested, in display order
#[derive(Debug, Serialize)]
pub struct MenuCategory {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
    pub items: Vec<MenuItem>,
}

/// Group flat item rows under their categories, preserving display order.
pub fn assemble(categories: Vec<Category>, items: Vec<MenuItem>) -> Vec<MenuCategory> {
    let mut by_category: std::collections::HashMap<i64, Vec<MenuItem>> =
        std::collections::HashMap::new();
    for item in items {
        by_category.entry(item.category_id).or_default().push(item);
    }

    categories
        .into_iter()
        .map(|c| MenuCategory {
            items: by_category.remove(&c.id).unwrap_or_default(),
            id: c.id,
            name: c.name,
            sort_order: c.sort_order,
        })
        .collect()
}

// ── GET /api/menu ──

#[derive(Serialize)]
pub struct MenuResponse {
    pub restaurant: Restaurant,
    pub categories: Vec<MenuCategory>,
}

pub async fn get_menu(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<MenuResponse> {
    let restaurant = db::restaurants::find_by_user(&state.pool, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let categories = db::menu::category::list_for_restaurant(&state.pool, restaurant.id).await?;
    let items = db::menu::item::list_for_restaurant(&state.pool, restaurant.id).await?;

    Ok(Json(MenuResponse {
        categories: assemble(categories, items),
        restaurant,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn category(id: i64, name: &str, sort_order: i32) -> Category {
        Category {
            id,
            restaurant_id: 1,
            name: name.into(),
            sort_order,
            created_at: 0,
        }
    }

    fn item(id: i64, category_id: i64, name: &str) -> MenuItem {
        MenuItem {
            id,
            category_id,
            name: name.into(),
            description: None,
            price: Decimal::new(19900, 2),
            image_url: None,
            image_urls: vec![],
            is_available: true,
            sort_order: 0,
            is_veg: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_assemble_groups_items_under_categories() {
        let categories = vec![category(1, "Starters", 0), category(2, "Mains", 1)];
        let items = vec![item(10, 1, "Samosa"), item(11, 2, "Biryani"), item(12, 1, "Pakora")];

        let menu = assemble(categories, items);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].name, "Starters");
        assert_eq!(menu[0].items.len(), 2);
        assert_eq!(menu[1].items.len(), 1);
        assert_eq!(menu[1].items[0].name, "Biryani");
    }

    #[test]
    fn test_assemble_keeps_empty_categories() {
        let categories = vec![category(1, "Starters", 0)];
        let menu = assemble(categories, vec![]);
        assert_eq!(menu.len(), 1);
        assert!(menu[0].items.is_empty());
    }
}
