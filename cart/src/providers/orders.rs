//! Order persistence trait.

use crate::error::Result;
use crate::types::{Money, OrderDraft, OrderItem, OrderStatus, PersistedOrder};
use chrono::{DateTime, Utc};

/// A fully prepared order row, ready for the external store.
///
/// Items are denormalized (product id, name, size, quantity, effective unit
/// price) so the persisted order stands on its own even if the catalog
/// changes later.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    /// Customer name
    pub customer_name: String,
    /// Customer phone
    pub customer_phone: String,
    /// Delivery address
    pub customer_address: String,
    /// Optional free-text notes
    pub additional_info: Option<String>,
    /// Denormalized item rows
    pub items: Vec<OrderItem>,
    /// Item subtotal at submission time (shipping fee excluded)
    pub total_amount: Money,
    /// Initial lifecycle status, always `Pending` from this core
    pub status: OrderStatus,
}

impl NewOrder {
    /// Builds the persistable row set from a validated draft.
    #[must_use]
    pub fn from_draft(draft: &OrderDraft) -> Self {
        Self {
            customer_name: draft.customer_name.clone(),
            customer_phone: draft.customer_phone.clone(),
            customer_address: draft.customer_address.clone(),
            additional_info: draft.additional_info.clone(),
            items: draft.items.iter().map(OrderItem::from_cart_item).collect(),
            total_amount: draft.total_amount,
            status: OrderStatus::Pending,
        }
    }
}

/// Order persistence.
///
/// This trait abstracts the hosted database's `orders` table: one insert
/// per successful checkout, plus the count query the rate limiter runs.
pub trait OrderStore: Send + Sync {
    /// Persist a new order and return it with its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails. The caller surfaces a generic
    /// failure message, logs the cause, and does NOT retry.
    fn insert_order(
        &self,
        order: NewOrder,
    ) -> impl std::future::Future<Output = Result<PersistedOrder>> + Send;

    /// Count this phone's orders created at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails. Rate limiting treats that as
    /// a hard failure, never as permission.
    fn count_orders_since(
        &self,
        customer_phone: &str,
        since: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64>> + Send;
}
