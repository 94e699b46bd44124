//! Mock catalog service with a built-in stock change feed.

use crate::error::{OrderError, Result};
use crate::providers::{CatalogService, StockFeed};
use crate::types::{ProductId, ProductWithStock, Size};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

#[derive(Debug)]
struct Inner {
    products: Vec<ProductWithStock>,
    fail_fetch: bool,
}

/// Mock catalog.
///
/// Holds a mutable product/stock snapshot and signals its embedded change
/// feed whenever stock is updated, exactly like the hosted service's
/// change subscription.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    inner: Arc<Mutex<Inner>>,
    changes: broadcast::Sender<()>,
}

impl InMemoryCatalog {
    /// Create a mock catalog preloaded with the given products.
    #[must_use]
    pub fn new(products: Vec<ProductWithStock>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                products,
                fail_fetch: false,
            })),
            changes,
        }
    }

    /// Replace the stock count for one (product, size) and signal the feed.
    pub fn set_stock(&self, product_id: &ProductId, size: Size, quantity: u32) {
        {
            let mut inner = self
                .inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(entry) = inner
                .products
                .iter_mut()
                .find(|p| p.product.id == *product_id)
            {
                entry.stock = entry.stock.with(size, quantity);
            }
        }
        let _ = self.changes.send(());
    }

    /// Toggle fetch failures.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .fail_fetch = fail;
    }

    /// Emit a change signal without touching stock.
    pub fn signal_change(&self) {
        let _ = self.changes.send(());
    }
}

impl CatalogService for InMemoryCatalog {
    fn fetch_products(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ProductWithStock>>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            let guard = inner
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if guard.fail_fetch {
                return Err(OrderError::DataAccess(
                    "simulated catalog failure".to_string(),
                ));
            }
            Ok(guard.products.clone())
        }
    }
}

impl StockFeed for InMemoryCatalog {
    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }
}
