//! Storefront actions.
//!
//! Actions unify commands (requests to change state) and events (facts
//! produced by effects). Cart actions are pure commands with no events:
//! the cart reducer performs no I/O. Checkout and catalog actions carry
//! the feedback events their effects produce.

use crate::error::OrderError;
use crate::types::{OrderDraft, PersistedOrder, Product, ProductId, ProductWithStock, Size};

/// Cart transitions. All pure; stock is validated by the caller before
/// dispatching (the store trusts its caller).
#[derive(Clone, Debug, PartialEq)]
pub enum CartAction {
    /// Add one unit of (product, size): merge into an existing line or
    /// append a new line with quantity 1
    AddItem {
        /// The product being added
        product: Product,
        /// Selected size
        size: Size,
    },

    /// Delete the matching line; no-op when absent
    RemoveItem {
        /// Product to remove
        product_id: ProductId,
        /// Size to remove
        size: Size,
    },

    /// Replace the matching line's quantity; `0` behaves as `RemoveItem`
    SetQuantity {
        /// Product to update
        product_id: ProductId,
        /// Size to update
        size: Size,
        /// New quantity (unchecked against stock here)
        quantity: u32,
    },

    /// Reset to the empty cart
    Clear,
}

/// Order submission pipeline actions.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckoutAction {
    /// Command: submit the drafted order
    SubmitOrder {
        /// Customer fields plus cart contents at submission time
        draft: OrderDraft,
    },

    /// Event: the rate-limit count query resolved
    RateLimitChecked {
        /// True when this phone is under the rolling-window threshold
        allowed: bool,
    },

    /// Event: the order row was durably recorded
    OrderPersisted {
        /// The persisted order as returned by the store
        order: PersistedOrder,
    },

    /// Event: the order row could not be written
    PersistFailed {
        /// Underlying cause, for the log only
        reason: String,
    },

    /// Terminal event: submission succeeded (broadcast to waiters)
    OrderPlaced {
        /// The persisted order
        order: PersistedOrder,
    },

    /// Terminal event: submission was rejected or failed (broadcast to waiters)
    SubmissionFailed {
        /// Why the submission did not complete
        error: OrderError,
    },
}

/// Catalog/stock snapshot actions.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogAction {
    /// Command: fetch a fresh product/stock snapshot
    Refresh,

    /// Event: a fresh snapshot arrived; replaces the previous one entirely
    CatalogLoaded {
        /// Products joined with live stock
        products: Vec<ProductWithStock>,
    },

    /// Event: the fetch failed; the previous snapshot stays in place
    CatalogFetchFailed {
        /// Underlying cause, for the log only
        reason: String,
    },
}

/// Unified storefront action routed by [`crate::reducers::StorefrontReducer`].
#[derive(Clone, Debug, PartialEq)]
pub enum StorefrontAction {
    /// Cart transitions
    Cart(CartAction),
    /// Submission pipeline
    Checkout(CheckoutAction),
    /// Catalog snapshot
    Catalog(CatalogAction),
}

impl From<CartAction> for StorefrontAction {
    fn from(action: CartAction) -> Self {
        Self::Cart(action)
    }
}

impl From<CheckoutAction> for StorefrontAction {
    fn from(action: CheckoutAction) -> Self {
        Self::Checkout(action)
    }
}

impl From<CatalogAction> for StorefrontAction {
    fn from(action: CatalogAction) -> Self {
        Self::Catalog(action)
    }
}

impl StorefrontAction {
    /// True for the terminal checkout events a submission waits on
    #[must_use]
    pub const fn is_submission_terminal(&self) -> bool {
        matches!(
            self,
            Self::Checkout(CheckoutAction::OrderPlaced { .. })
                | Self::Checkout(CheckoutAction::SubmissionFailed { .. })
        )
    }
}
