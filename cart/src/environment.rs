//! Storefront environment.
//!
//! This module defines the environment type for dependency injection in
//! the storefront reducers.

use crate::providers::{CatalogService, OrderNotifier, OrderStore};
use souq_core::environment::Clock;

/// Storefront environment.
///
/// Contains all external dependencies needed by the storefront reducers.
///
/// # Type Parameters
///
/// - `C`: Catalog service
/// - `O`: Order persistence store
/// - `N`: Order confirmation notifier
/// - `K`: Clock
#[derive(Clone)]
pub struct StorefrontEnvironment<C, O, N, K>
where
    C: CatalogService + Clone,
    O: OrderStore + Clone,
    N: OrderNotifier + Clone,
    K: Clock + Clone,
{
    /// Catalog service (product/stock snapshots).
    pub catalog: C,

    /// Order persistence (inserts and the rate-limit count query).
    pub orders: O,

    /// Confirmation notifier (best-effort, fire-and-forget).
    pub notifier: N,

    /// Clock (rolling rate-limit window evaluation).
    pub clock: K,
}

impl<C, O, N, K> StorefrontEnvironment<C, O, N, K>
where
    C: CatalogService + Clone,
    O: OrderStore + Clone,
    N: OrderNotifier + Clone,
    K: Clock + Clone,
{
    /// Create a new storefront environment.
    #[must_use]
    pub const fn new(catalog: C, orders: O, notifier: N, clock: K) -> Self {
        Self {
            catalog,
            orders,
            notifier,
            clock,
        }
    }
}
