//! Subscription plan payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Admin plan-catalog update payload
///
/// All fields optional; absent fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub duration_days: Option<i32>,
    pub features: Option<Vec<String>>,
    pub badge_text: Option<String>,
    pub badge_color: Option<String>,
    pub badge_enabled: Option<bool>,
}
