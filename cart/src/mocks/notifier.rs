//! Mock order notifier.

use crate::error::{OrderError, Result};
use crate::providers::{OrderNotification, OrderNotifier};
use std::sync::{Arc, Mutex};

struct Inner {
    sent: Vec<OrderNotification>,
    attempts: u32,
    should_succeed: bool,
}

/// Mock notifier.
///
/// Records every delivery attempt; successful ones keep the notification
/// payload for assertions.
#[derive(Clone)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingNotifier {
    /// Create a mock notifier that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                sent: Vec::new(),
                attempts: 0,
                should_succeed: true,
            })),
        }
    }

    /// Toggle delivery success.
    pub fn set_should_succeed(&self, succeed: bool) {
        self.lock().should_succeed = succeed;
    }

    /// Notifications delivered successfully.
    #[must_use]
    pub fn sent(&self) -> Vec<OrderNotification> {
        self.lock().sent.clone()
    }

    /// Delivery attempts, failed ones included.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.lock().attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderNotifier for RecordingNotifier {
    fn send_order_notification(
        &self,
        notification: &OrderNotification,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let notification = notification.clone();
        async move {
            let mut guard = inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            guard.attempts += 1;

            if !guard.should_succeed {
                return Err(OrderError::DataAccess(
                    "simulated email failure".to_string(),
                ));
            }

            guard.sent.push(notification);
            Ok(())
        }
    }
}
