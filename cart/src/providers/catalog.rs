//! Catalog service and stock change feed traits.

use crate::error::Result;
use crate::types::ProductWithStock;
use tokio::sync::broadcast;

/// Catalog retrieval.
///
/// Supplies the product list merged with live per-size stock counts. The
/// returned snapshot is treated as ground truth until the next fetch and is
/// always replaced wholesale, never patched.
pub trait CatalogService: Send + Sync {
    /// Fetch the full product/stock snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OrderError::DataAccess`] when the external service
    /// cannot be reached or rejects the query.
    fn fetch_products(&self)
    -> impl std::future::Future<Output = Result<Vec<ProductWithStock>>> + Send;
}

/// Stock change feed.
///
/// A subscription yielding a payloadless signal whenever stock rows change.
/// Receivers react by fetching a fresh snapshot; a lagged receiver loses
/// nothing because the next fetch returns the complete current state.
pub trait StockFeed: Send + Sync {
    /// Subscribe to stock change signals.
    fn subscribe(&self) -> broadcast::Receiver<()>;
}
