//! Menu item payloads
//!
//! Images are stored as URL strings; the first entry of `image_urls` doubles
//! as the primary `image_url` for older clients.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub is_available: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_veg: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_urls: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub sort_order: Option<i32>,
    pub is_veg: Option<bool>,
}
