//! Mock order persistence store.

use crate::error::{OrderError, Result};
use crate::providers::{NewOrder, OrderStore};
use crate::types::{OrderId, OrderStatus, PersistedOrder};
use chrono::{DateTime, Utc};
use souq_core::environment::{Clock, SystemClock};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    orders: Vec<PersistedOrder>,
    fail_inserts: bool,
    fail_counts: bool,
    insert_calls: u32,
}

/// Mock order store.
///
/// Appends orders with uuid ids and clock-stamped creation times, and
/// answers the rate limiter's count query from the same in-memory list.
/// Insert and count failures can be injected independently.
#[derive(Clone)]
pub struct InMemoryOrderStore {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOrderStore {
    /// Create a mock store stamping orders with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a mock store stamping orders with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            clock,
        }
    }

    /// Toggle insert failures.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.lock().fail_inserts = fail;
    }

    /// Toggle count-query failures.
    pub fn set_fail_counts(&self, fail: bool) {
        self.lock().fail_counts = fail;
    }

    /// All orders persisted so far.
    #[must_use]
    pub fn orders(&self) -> Vec<PersistedOrder> {
        self.lock().orders.clone()
    }

    /// Number of insert attempts, failed ones included.
    #[must_use]
    pub fn insert_calls(&self) -> u32 {
        self.lock().insert_calls
    }

    /// Seed a minimal order for a phone at a given creation time.
    ///
    /// Used by rate-limit tests to place orders inside or outside the
    /// rolling window without going through the pipeline.
    pub fn seed_order(&self, customer_phone: &str, created_at: DateTime<Utc>) {
        let order = PersistedOrder {
            id: OrderId::new(format!("order-{}", uuid::Uuid::new_v4())),
            customer_name: "Seed Customer".to_string(),
            customer_phone: customer_phone.to_string(),
            customer_address: "Seed address, long enough".to_string(),
            additional_info: None,
            items: vec![],
            total_amount: crate::types::Money::ZERO,
            status: OrderStatus::Pending,
            created_at,
        };
        self.lock().orders.push(order);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert_order(
        &self,
        order: NewOrder,
    ) -> impl std::future::Future<Output = Result<PersistedOrder>> + Send {
        let inner = Arc::clone(&self.inner);
        let clock = Arc::clone(&self.clock);
        async move {
            let mut guard = inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            guard.insert_calls += 1;

            if guard.fail_inserts {
                return Err(OrderError::DataAccess(
                    "simulated insert failure".to_string(),
                ));
            }

            let persisted = PersistedOrder {
                id: OrderId::new(format!("order-{}", uuid::Uuid::new_v4())),
                customer_name: order.customer_name,
                customer_phone: order.customer_phone,
                customer_address: order.customer_address,
                additional_info: order.additional_info,
                items: order.items,
                total_amount: order.total_amount,
                status: order.status,
                created_at: clock.now(),
            };
            guard.orders.push(persisted.clone());
            Ok(persisted)
        }
    }

    fn count_orders_since(
        &self,
        customer_phone: &str,
        since: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64>> + Send {
        let inner = Arc::clone(&self.inner);
        let phone = customer_phone.to_owned();
        async move {
            let guard = inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);

            if guard.fail_counts {
                return Err(OrderError::DataAccess(
                    "simulated count failure".to_string(),
                ));
            }

            Ok(guard
                .orders
                .iter()
                .filter(|o| o.customer_phone == phone && o.created_at >= since)
                .count() as u64)
        }
    }
}
