//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest | Self::PaymentVerificationFailed => {
                StatusCode::BAD_REQUEST
            }

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::AdminRequired
            | Self::InvalidAdminKey
            | Self::SubscriptionRequired => StatusCode::FORBIDDEN,

            // 404 Not Found
            Self::NotFound
            | Self::RestaurantNotFound
            | Self::NoSubscriptionHistory
            | Self::PlanNotFound
            | Self::CategoryNotFound
            | Self::MenuItemNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists => StatusCode::CONFLICT,

            // 502 Bad Gateway (payment provider failure)
            Self::PaymentOrderFailed => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable
            Self::PaymentUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::SubscriptionRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::RestaurantNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::PaymentVerificationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::PaymentUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    /// A gate rejection must be a 403 that clients can tell apart from a
    /// generic permission denial by its code, not just its message.
    #[test]
    fn test_subscription_rejection_distinguishable() {
        assert_eq!(
            ErrorCode::SubscriptionRequired.http_status(),
            ErrorCode::PermissionDenied.http_status()
        );
        assert_ne!(
            ErrorCode::SubscriptionRequired.code(),
            ErrorCode::PermissionDenied.code()
        );
    }
}
