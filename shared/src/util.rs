//! Small time utilities shared across crates

/// One day in milliseconds
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Current wall-clock time as Unix epoch milliseconds.
///
/// Handlers and background jobs read the clock once per operation and thread
/// the value through; lifecycle functions never call this themselves, which
/// keeps expiry arithmetic deterministic under test.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole days (rounded up) between `from` and `to`; zero if already past.
pub fn remaining_days(from: i64, to: i64) -> i64 {
    if to <= from {
        return 0;
    }
    ((to - from) as u64).div_ceil(DAY_MS as u64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_days_rounds_up() {
        assert_eq!(remaining_days(0, DAY_MS), 1);
        assert_eq!(remaining_days(0, DAY_MS + 1), 2);
        assert_eq!(remaining_days(0, 3 * DAY_MS), 3);
    }

    #[test]
    fn test_remaining_days_past_is_zero() {
        assert_eq!(remaining_days(DAY_MS, 0), 0);
        assert_eq!(remaining_days(5, 5), 0);
    }
}
