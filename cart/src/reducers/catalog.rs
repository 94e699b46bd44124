//! Catalog reducer: product/stock snapshot refresh.
//!
//! Every refresh replaces the ENTIRE snapshot - deltas are never patched
//! in - so the next add-to-cart or quantity check always reads one coherent
//! stock view.

use crate::actions::{CatalogAction, StorefrontAction};
use crate::environment::StorefrontEnvironment;
use crate::providers::{CatalogService, OrderNotifier, OrderStore};
use crate::state::CatalogState;
use souq_core::environment::Clock;
use souq_core::{SmallVec, effect::Effect, smallvec};

/// Applies one catalog transition and returns its effects.
pub(crate) fn reduce<C, O, N, K>(
    state: &mut CatalogState,
    action: CatalogAction,
    env: &StorefrontEnvironment<C, O, N, K>,
) -> SmallVec<[Effect<StorefrontAction>; 4]>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    match action {
        CatalogAction::Refresh => {
            let catalog = env.catalog.clone();
            smallvec![Effect::Future(Box::pin(async move {
                let action = match catalog.fetch_products().await {
                    Ok(products) => CatalogAction::CatalogLoaded { products },
                    Err(error) => CatalogAction::CatalogFetchFailed {
                        reason: error.to_string(),
                    },
                };
                Some(StorefrontAction::Catalog(action))
            }))]
        },

        CatalogAction::CatalogLoaded { products } => {
            tracing::debug!(count = products.len(), "Catalog snapshot replaced");
            state.products = products;
            state.loaded = true;
            smallvec![Effect::None]
        },

        CatalogAction::CatalogFetchFailed { reason } => {
            // Keep the previous snapshot; stock checks stay on known data.
            tracing::warn!(%reason, "Catalog fetch failed, keeping previous snapshot");
            smallvec![Effect::None]
        },
    }
}
