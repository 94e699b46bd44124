//! Storefront state types.
//!
//! The whole session state is one value: the catalog snapshot, the cart,
//! and the checkout pipeline phase. There are no hidden modes - reducers
//! transition these values and nothing else.

use crate::constants::SHIPPING_FEE;
use crate::error::OrderError;
use crate::types::{CartItem, Money, OrderDraft, PersistedOrder, ProductId, ProductWithStock, Size};
use serde::{Deserialize, Serialize};

/// The in-memory shopping cart.
///
/// `total` is maintained incrementally alongside `items` (it is part of the
/// serialized shape), but every transition recomputes it from the items, so
/// it can never drift from [`CartState::recomputed_total`]. Tests assert the
/// reconciliation after every transition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Ordered cart lines, at most one per (product, size) pair
    pub items: Vec<CartItem>,
    /// Running subtotal (shipping fee excluded)
    pub total: Money,
}

impl CartState {
    /// Creates a new empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            total: Money::ZERO,
        }
    }

    /// True when the cart holds no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the line for a (product, size) pair, if present
    #[must_use]
    pub fn find_item(&self, product_id: &ProductId, size: Size) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product.id == *product_id && item.size == size)
    }

    /// Quantity currently in the cart for a (product, size) pair
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId, size: Size) -> u32 {
        self.find_item(product_id, size)
            .map_or(0, |item| item.quantity)
    }

    /// Subtotal recomputed from the items' referenced products
    ///
    /// This is the ground truth `total` must always agree with.
    #[must_use]
    pub fn recomputed_total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Displayed final total: subtotal plus the flat shipping fee
    ///
    /// The order-amount ceiling does NOT use this value; validation checks
    /// the bare subtotal.
    #[must_use]
    pub fn final_total(&self) -> Money {
        self.total + SHIPPING_FEE
    }
}

/// Phase of the order submission pipeline.
///
/// Terminal phases (`Completed`, `Failed`) stay observable until the next
/// submission resets the machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CheckoutState {
    /// No submission in progress
    #[default]
    Idle,
    /// Counting this phone's recent orders
    CheckingRateLimit {
        /// The draft being submitted
        draft: OrderDraft,
    },
    /// Writing the order to the external store
    Persisting {
        /// The draft being submitted
        draft: OrderDraft,
    },
    /// The order was durably recorded and the cart cleared
    Completed {
        /// The persisted order
        order: PersistedOrder,
    },
    /// The submission was rejected or the write failed
    Failed {
        /// Why the submission did not complete
        error: OrderError,
    },
}

impl CheckoutState {
    /// True while a submission is between dispatch and its terminal event
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::CheckingRateLimit { .. } | Self::Persisting { .. }
        )
    }
}

/// The catalog/stock snapshot as last fetched from the external service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Products joined with live stock, replaced wholesale on refresh
    pub products: Vec<ProductWithStock>,
    /// False until the first successful fetch
    pub loaded: bool,
}

impl CatalogState {
    /// Finds a product (with stock) by id in the current snapshot
    #[must_use]
    pub fn find(&self, product_id: &ProductId) -> Option<&ProductWithStock> {
        self.products.iter().find(|p| p.product.id == *product_id)
    }
}

/// Root storefront state: one logical session/user, one exclusive owner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorefrontState {
    /// Catalog snapshot
    pub catalog: CatalogState,
    /// The shopping cart
    pub cart: CartState,
    /// Submission pipeline phase
    pub checkout: CheckoutState,
}
