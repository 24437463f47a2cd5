//! Unified error codes for the Saffron platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Restaurant/tenant errors
//! - 4xxx: Subscription errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Admin creation key is invalid
    InvalidAdminKey = 2003,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,

    // ==================== 4xxx: Subscription ====================
    /// No active subscription grants access to this operation
    SubscriptionRequired = 4001,
    /// Tenant has no subscription rows at all
    NoSubscriptionHistory = 4002,
    /// Subscription plan not found
    PlanNotFound = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment signature verification failed
    PaymentVerificationFailed = 5001,
    /// Payment provider is not configured
    PaymentUnavailable = 5002,
    /// Payment provider order creation failed
    PaymentOrderFailed = 5003,

    // ==================== 6xxx: Menu ====================
    /// Category not found
    CategoryNotFound = 6001,
    /// Menu item not found
    MenuItemNotFound = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::InvalidAdminKey => "Admin creation key is invalid",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",

            // Subscription
            ErrorCode::SubscriptionRequired => {
                "Active subscription required to access this feature"
            }
            ErrorCode::NoSubscriptionHistory => "Restaurant has no subscription history",
            ErrorCode::PlanNotFound => "Subscription plan not found",

            // Payment
            ErrorCode::PaymentVerificationFailed => "Payment verification failed",
            ErrorCode::PaymentUnavailable => "Payment provider is not configured",
            ErrorCode::PaymentOrderFailed => "Failed to create payment order",

            // Menu
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::MenuItemNotFound => "Menu item not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),
            2003 => Ok(ErrorCode::InvalidAdminKey),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),

            // Subscription
            4001 => Ok(ErrorCode::SubscriptionRequired),
            4002 => Ok(ErrorCode::NoSubscriptionHistory),
            4003 => Ok(ErrorCode::PlanNotFound),

            // Payment
            5001 => Ok(ErrorCode::PaymentVerificationFailed),
            5002 => Ok(ErrorCode::PaymentUnavailable),
            5003 => Ok(ErrorCode::PaymentOrderFailed),

            // Menu
            6001 => Ok(ErrorCode::CategoryNotFound),
            6002 => Ok(ErrorCode::MenuItemNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2002);
        assert_eq!(ErrorCode::RestaurantNotFound.code(), 3001);
        assert_eq!(ErrorCode::SubscriptionRequired.code(), 4001);
        assert_eq!(ErrorCode::PaymentVerificationFailed.code(), 5001);
        assert_eq!(ErrorCode::CategoryNotFound.code(), 6001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::NotAuthenticated,
            ErrorCode::TokenExpired,
            ErrorCode::AdminRequired,
            ErrorCode::RestaurantNotFound,
            ErrorCode::SubscriptionRequired,
            ErrorCode::NoSubscriptionHistory,
            ErrorCode::PlanNotFound,
            ErrorCode::PaymentVerificationFailed,
            ErrorCode::PaymentUnavailable,
            ErrorCode::CategoryNotFound,
            ErrorCode::MenuItemNotFound,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
        assert_eq!(ErrorCode::try_from(7001), Err(InvalidErrorCode(7001)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::SubscriptionRequired).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::SubscriptionRequired);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }
}
