//! Storefront reducers.
//!
//! Pure reducer functions: `(State, Action, Environment) → (State, Effects)`.
//! The unified [`StorefrontReducer`] routes actions to the cart, checkout,
//! or catalog slice.

pub mod cart;
pub mod catalog;
pub mod checkout;

use crate::actions::StorefrontAction;
use crate::environment::StorefrontEnvironment;
use crate::providers::{CatalogService, OrderNotifier, OrderStore};
use crate::state::StorefrontState;
use souq_core::environment::Clock;
use souq_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Unified storefront reducer.
///
/// Routes cart, checkout, and catalog actions to their reducer functions.
/// Cart transitions are pure and produce no effects; checkout and catalog
/// transitions may produce effects against the injected collaborators.
#[derive(Clone, Debug)]
pub struct StorefrontReducer<C, O, N, K>
where
    C: CatalogService + Clone,
    O: OrderStore + Clone,
    N: OrderNotifier + Clone,
    K: Clock + Clone,
{
    _phantom: std::marker::PhantomData<(C, O, N, K)>,
}

impl<C, O, N, K> StorefrontReducer<C, O, N, K>
where
    C: CatalogService + Clone,
    O: OrderStore + Clone,
    N: OrderNotifier + Clone,
    K: Clock + Clone,
{
    /// Create a new storefront reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C, O, N, K> Default for StorefrontReducer<C, O, N, K>
where
    C: CatalogService + Clone,
    O: OrderStore + Clone,
    N: OrderNotifier + Clone,
    K: Clock + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, O, N, K> Reducer for StorefrontReducer<C, O, N, K>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment<C, O, N, K>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::Cart(action) => {
                cart::reduce(&mut state.cart, action);
                smallvec![Effect::None]
            },
            StorefrontAction::Checkout(action) => checkout::reduce(state, action, env),
            StorefrontAction::Catalog(action) => catalog::reduce(&mut state.catalog, action, env),
        }
    }
}
