//! Order-submission rate limiting.
//!
//! A query-based guard: count this phone's orders inside a trailing window
//! and refuse submission above a threshold. The count lives with the order
//! persistence collaborator; this module only interprets it.
//!
//! The check is advisory in mechanism but strict in failure handling: a
//! failed count query fails the whole submission rather than defaulting to
//! permissive, because this check is the only abuse protection the core has.

use crate::constants::{RATE_LIMIT_MAX_ORDERS, RATE_LIMIT_WINDOW_MINUTES};
use crate::error::OrderError;
use crate::providers::OrderStore;
use chrono::{DateTime, Duration, Utc};
use souq_core::environment::Clock;

/// Start of the rolling window, evaluated at check time relative to `now`.
#[must_use]
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::minutes(RATE_LIMIT_WINDOW_MINUTES)
}

/// Checks whether this phone may submit another order.
///
/// Returns `Ok(true)` when the phone's order count inside the trailing
/// 30-minute window is below the threshold, `Ok(false)` when it is at or
/// above it.
///
/// # Errors
///
/// Returns [`OrderError::RateLimitCheckFailed`] when the count query fails.
/// Callers must treat that as a hard failure of the submission.
pub async fn check_rate_limit<O, K>(
    orders: &O,
    clock: &K,
    phone: &str,
) -> Result<bool, OrderError>
where
    O: OrderStore,
    K: Clock,
{
    let since = window_start(clock.now());
    let count = orders
        .count_orders_since(phone, since)
        .await
        .map_err(|error| {
            tracing::error!(%phone, %error, "Rate limit count query failed");
            OrderError::RateLimitCheckFailed(error.to_string())
        })?;

    Ok(count < RATE_LIMIT_MAX_ORDERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_thirty_minutes() {
        let now = Utc::now();
        assert_eq!(now - window_start(now), Duration::minutes(30));
    }
}
