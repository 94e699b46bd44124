//! Tracing-backed notifier.
//!
//! Writes the order confirmation to the log instead of an email service.
//! Useful for development environments and as the safe default when no
//! email credentials are configured.

use super::notifier::{OrderNotification, OrderNotifier};
use crate::error::Result;

/// Notifier that logs the confirmation through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a new log notifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OrderNotifier for LogNotifier {
    fn send_order_notification(
        &self,
        notification: &OrderNotification,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        let order_id = notification.order_id.clone();
        let customer_name = notification.customer_name.clone();
        let total_amount = notification.total_amount;
        let items = notification.format_items();
        async move {
            tracing::info!(
                order_id = %order_id,
                customer_name = %customer_name,
                total_amount = %total_amount,
                items = %items,
                "Order confirmation"
            );
            Ok(())
        }
    }
}
