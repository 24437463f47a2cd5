//! Database access layer

pub mod menu;
pub mod plans;
pub mod restaurants;
pub mod subscriptions;
pub mod users;
