//! Storefront constants.
//!
//! Business rule values shared by validation, rate limiting, and checkout.

use crate::types::Money;

/// Flat shipping fee added on top of the item subtotal for display and
/// checkout-summary purposes only. The order-amount ceiling is checked
/// against the item subtotal WITHOUT this fee.
pub const SHIPPING_FEE: Money = Money::from_pounds(50);

/// Maximum order amount (item subtotal) accepted at validation time.
pub const MAX_ORDER_AMOUNT: Money = Money::from_pounds(10_000);

/// Minimum accepted customer name length, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum accepted customer address length, in characters.
pub const MIN_ADDRESS_LEN: usize = 10;

/// Rolling rate-limit window, in minutes, evaluated at check time.
pub const RATE_LIMIT_WINDOW_MINUTES: i64 = 30;

/// Maximum number of orders allowed per phone number inside the window.
pub const RATE_LIMIT_MAX_ORDERS: u64 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_excludes_shipping_fee() {
        // 10_000 EGP of items passes the ceiling; the displayed final total
        // with shipping is allowed to exceed it.
        assert!(MAX_ORDER_AMOUNT.piastres() < (MAX_ORDER_AMOUNT + SHIPPING_FEE).piastres());
    }

    #[test]
    fn window_and_threshold_match_business_rules() {
        assert_eq!(RATE_LIMIT_WINDOW_MINUTES, 30);
        assert_eq!(RATE_LIMIT_MAX_ORDERS, 3);
    }
}
