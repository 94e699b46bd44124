//! Stock reconciliation.
//!
//! Bridges the external change feed to the catalog reducer: every signal
//! triggers a full snapshot refresh. The feed carries no payload - the
//! refresh always replaces the entire stock view, so a lagged subscriber
//! loses nothing.

use crate::actions::{CatalogAction, StorefrontAction};
use crate::environment::StorefrontEnvironment;
use crate::providers::{CatalogService, OrderNotifier, OrderStore, StockFeed};
use crate::reducers::StorefrontReducer;
use crate::state::StorefrontState;
use souq_core::environment::Clock;
use souq_runtime::Store;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Spawns the task that refreshes the catalog on every stock change signal.
///
/// The task ends when the feed closes or the store shuts down. Callers keep
/// the handle to abort it early.
pub fn spawn_stock_sync<C, O, N, K, F>(
    store: Arc<
        Store<
            StorefrontState,
            StorefrontAction,
            StorefrontEnvironment<C, O, N, K>,
            StorefrontReducer<C, O, N, K>,
        >,
    >,
    feed: &F,
) -> JoinHandle<()>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
    F: StockFeed,
{
    let mut rx = feed.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(()) => {
                    tracing::debug!("Stock change signalled, refreshing catalog");
                    if store
                        .send(StorefrontAction::Catalog(CatalogAction::Refresh))
                        .await
                        .is_err()
                    {
                        // Store is shutting down.
                        break;
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Coalesced signals are harmless: the next refresh
                    // fetches the complete current snapshot.
                    tracing::debug!(skipped, "Stock feed lagged");
                },
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("Stock sync task stopped");
    })
}
