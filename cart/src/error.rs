//! Error types for cart and order submission operations.

use crate::types::{ProductId, Size};
use thiserror::Error;

/// Result type alias for storefront operations.
pub type Result<T> = std::result::Result<T, OrderError>;

/// Error taxonomy for the cart core.
///
/// Variants are organized by category: user-correctable input problems,
/// abuse prevention, stock conflicts, and system failures. Notification
/// failures have no variant on purpose - they are logged inside the
/// detached notification effect and never surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors (user-correctable, surfaced verbatim)
    // ═══════════════════════════════════════════════════════════

    /// Customer name is shorter than the accepted minimum.
    #[error("Please enter a valid name (at least 3 characters)")]
    NameTooShort,

    /// Customer phone does not match the Egyptian mobile pattern.
    #[error("Please enter a valid Egyptian phone number")]
    InvalidPhone,

    /// Customer address is shorter than the accepted minimum.
    #[error("Please enter a detailed address")]
    AddressTooShort,

    /// Submission attempted with no items in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Item subtotal exceeds the order-amount ceiling.
    #[error("Order amount exceeds maximum limit")]
    AmountExceedsMaximum,

    // ═══════════════════════════════════════════════════════════
    // Rate Limiting
    // ═══════════════════════════════════════════════════════════

    /// Too many recent orders for this phone number.
    #[error("Too many orders. Please try again later.")]
    TooManyOrders,

    /// The rate-limit count query itself failed.
    ///
    /// This is a hard failure: the check is the only protection against
    /// abuse, so a failed query never defaults to permissive.
    #[error("Rate limit check failed: {0}")]
    RateLimitCheckFailed(String),

    // ═══════════════════════════════════════════════════════════
    // Stock Errors (mutation refused, cart otherwise unaffected)
    // ═══════════════════════════════════════════════════════════

    /// The requested size has no stock at all.
    #[error("Size {size} is out of stock")]
    OutOfStock {
        /// Size that was requested
        size: Size,
    },

    /// The requested quantity exceeds the stock known at check time.
    #[error("Only {available} items available in size {size}")]
    InsufficientStock {
        /// Size that was requested
        size: Size,
        /// Quantity available at the time of the check
        available: u32,
    },

    /// The referenced product is not in the current catalog snapshot.
    #[error("Product {0} is not in the catalog")]
    ProductNotFound(ProductId),

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// The order could not be saved. The underlying cause is logged where
    /// it occurs; the user sees this generic message and may resubmit.
    #[error("Failed to place order. Please try again.")]
    OrderPersistenceFailed,

    /// Catalog or stock data could not be fetched.
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Runtime failure outside the domain (store shut down, timeout).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    /// Returns `true` if this error is due to invalid user input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use souq_cart::OrderError;
    /// assert!(OrderError::EmptyCart.is_user_error());
    /// assert!(!OrderError::OrderPersistenceFailed.is_user_error());
    /// ```
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NameTooShort
                | Self::InvalidPhone
                | Self::AddressTooShort
                | Self::EmptyCart
                | Self::AmountExceedsMaximum
                | Self::TooManyOrders
                | Self::OutOfStock { .. }
                | Self::InsufficientStock { .. }
        )
    }

    /// Returns `true` if this error was detected before any external
    /// mutation, meaning no compensation is ever required for it.
    #[must_use]
    pub const fn is_pre_mutation(&self) -> bool {
        !matches!(self, Self::OrderPersistenceFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_names_the_exact_count() {
        let err = OrderError::InsufficientStock {
            size: Size::L,
            available: 2,
        };
        assert_eq!(err.to_string(), "Only 2 items available in size L");
    }

    #[test]
    fn persistence_failure_is_generic() {
        assert_eq!(
            OrderError::OrderPersistenceFailed.to_string(),
            "Failed to place order. Please try again."
        );
    }

    #[test]
    fn user_error_classification() {
        assert!(OrderError::TooManyOrders.is_user_error());
        assert!(OrderError::OutOfStock { size: Size::M }.is_user_error());
        assert!(!OrderError::RateLimitCheckFailed("boom".into()).is_user_error());
        assert!(!OrderError::DataAccess("boom".into()).is_user_error());
    }
}
