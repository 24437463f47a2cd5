//! Domain status enums stored as lowercase strings in the database

use serde::{Deserialize, Serialize};

/// Subscription row lifecycle status
///
/// State machine per row: `pending → active → expired`. `active` may also be
/// produced directly by purchase completion and by admin grant/extend.
/// `expired` is terminal; a new period is always a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Created but payment not yet confirmed
    Pending,
    /// Currently granting access (subject to the end-date check)
    Active,
    /// Terminal: period is over or superseded by a newer purchase
    Expired,
}

impl SubscriptionStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }

    /// Terminal states never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Platform user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform administrator
    Admin,
    /// Restaurant owner (tenant)
    Restaurant,
}

impl UserRole {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "restaurant" => Some(Self::Restaurant),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Restaurant => "restaurant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_status_roundtrip() {
        for status in [
            SubscriptionStatus::Pending,
            SubscriptionStatus::Active,
            SubscriptionStatus::Expired,
        ] {
            assert_eq!(SubscriptionStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(SubscriptionStatus::from_db("canceled"), None);
    }

    #[test]
    fn test_expired_is_terminal() {
        assert!(SubscriptionStatus::Expired.is_terminal());
        assert!(!SubscriptionStatus::Active.is_terminal());
        assert!(!SubscriptionStatus::Pending.is_terminal());
    }

    #[test]
    fn test_user_role_roundtrip() {
        assert_eq!(UserRole::from_db("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_db("restaurant"), Some(UserRole::Restaurant));
        assert_eq!(UserRole::from_db("owner"), None);
    }
}
