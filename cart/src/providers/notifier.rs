//! Order notification trait.

use crate::error::Result;
use crate::types::{Money, OrderId, OrderItem, PersistedOrder};
use std::fmt::Write as _;

/// Everything the confirmation email template needs.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderNotification {
    /// Server-assigned order id
    pub order_id: OrderId,
    /// Customer name
    pub customer_name: String,
    /// Customer phone
    pub customer_phone: String,
    /// Delivery address
    pub customer_address: String,
    /// Denormalized item rows
    pub items: Vec<OrderItem>,
    /// Total amount
    pub total_amount: Money,
}

impl OrderNotification {
    /// Builds the notification payload from a persisted order.
    #[must_use]
    pub fn from_order(order: &PersistedOrder) -> Self {
        Self {
            order_id: order.id.clone(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            customer_address: order.customer_address.clone(),
            items: order.items.clone(),
            total_amount: order.total_amount,
        }
    }

    /// Renders the per-line plain-text block used by the email template:
    /// product, size, quantity, unit price, and line subtotal.
    #[must_use]
    pub fn format_items(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            let _ = write!(
                out,
                "\nProduct: {}\nSize: {}\nQuantity: {}\nPrice per item: {}\nSubtotal: {}\n----------------------------------------",
                item.product_name,
                item.size,
                item.quantity,
                item.unit_price,
                item.subtotal(),
            );
        }
        out
    }
}

/// Order confirmation notifier.
///
/// This trait abstracts the third-party email service. Callers treat it as
/// best-effort: the pipeline invokes it from a detached effect, logs a
/// failure, and never lets it affect the order.
pub trait OrderNotifier: Send + Sync {
    /// Send the order confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error when delivery fails. The detached effect logs and
    /// swallows it; nothing propagates to the submission result.
    fn send_order_notification(
        &self,
        notification: &OrderNotification,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductId, Size};

    #[test]
    fn format_items_renders_one_block_per_line() {
        let notification = OrderNotification {
            order_id: OrderId::new("order-1".to_string()),
            customer_name: "Nour Hassan".to_string(),
            customer_phone: "01001234567".to_string(),
            customer_address: "12 Tahrir Square, Cairo".to_string(),
            items: vec![OrderItem {
                product_id: ProductId::from("prod-1"),
                product_name: "Black Hoodie".to_string(),
                size: Size::M,
                quantity: 3,
                unit_price: Money::from_pounds(499),
            }],
            total_amount: Money::from_pounds(1497),
        };

        let rendered = notification.format_items();
        assert!(rendered.contains("Product: Black Hoodie"));
        assert!(rendered.contains("Size: M"));
        assert!(rendered.contains("Quantity: 3"));
        assert!(rendered.contains("Subtotal: 1497.00 EGP"));
    }
}
