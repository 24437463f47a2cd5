//! Shared types for the Saffron platform
//!
//! Common types used across crates: the unified error system, domain
//! status enums, request/response models, and small time utilities.

pub mod error;
pub mod models;
pub mod status;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
