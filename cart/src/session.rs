//! Storefront session: the explicit handle the UI layer drives.
//!
//! The session owns a [`Store`] and exposes the cart actions, catalog
//! reads, and order submission. It is also where the stock policy lives:
//! adding to the cart or raising a quantity is checked against the live
//! stock snapshot HERE, before dispatch, so the cart reducer itself stays
//! pure. Stock truth is always re-read from the latest catalog snapshot at
//! decision time, never from the cart line's own product copy.
//!
//! Multiple independent sessions can coexist; each owns its own store and
//! state.

use crate::actions::{CartAction, CatalogAction, CheckoutAction, StorefrontAction};
use crate::constants::SHIPPING_FEE;
use crate::environment::StorefrontEnvironment;
use crate::error::{OrderError, Result};
use crate::providers::{CatalogService, OrderNotifier, OrderStore};
use crate::reducers::StorefrontReducer;
use crate::state::StorefrontState;
use crate::types::{CartItem, Money, OrderDraft, PersistedOrder, ProductId, ProductWithStock, Size};
use souq_core::environment::Clock;
use souq_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

/// How long a submission waits for its terminal event by default.
const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Customer-supplied checkout form fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Customer name
    pub name: String,
    /// Customer phone (Egyptian mobile format)
    pub phone: String,
    /// Delivery address
    pub address: String,
    /// Optional free-text notes
    pub additional_info: Option<String>,
}

/// Read-only view of the cart for display.
#[derive(Clone, Debug, PartialEq)]
pub struct CartSnapshot {
    /// Cart lines
    pub items: Vec<CartItem>,
    /// Item subtotal (what validation checks against the ceiling)
    pub subtotal: Money,
    /// Flat shipping fee
    pub shipping_fee: Money,
    /// Displayed final total: subtotal plus shipping fee
    pub final_total: Money,
}

/// The session handle owning one user's storefront state.
pub struct StorefrontSession<C, O, N, K>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    store: Arc<
        Store<
            StorefrontState,
            StorefrontAction,
            StorefrontEnvironment<C, O, N, K>,
            StorefrontReducer<C, O, N, K>,
        >,
    >,
    submit_timeout: Duration,
}

impl<C, O, N, K> Clone for StorefrontSession<C, O, N, K>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            submit_timeout: self.submit_timeout,
        }
    }
}

impl<C, O, N, K> StorefrontSession<C, O, N, K>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    /// Create a session with an empty cart over the given environment.
    #[must_use]
    pub fn new(environment: StorefrontEnvironment<C, O, N, K>) -> Self {
        Self {
            store: Arc::new(Store::new(
                StorefrontState::default(),
                StorefrontReducer::new(),
                environment,
            )),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Override how long `submit_order` waits for its terminal event.
    #[must_use]
    pub const fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// The underlying store, for stock sync and advanced observation.
    #[must_use]
    pub fn store(
        &self,
    ) -> Arc<
        Store<
            StorefrontState,
            StorefrontAction,
            StorefrontEnvironment<C, O, N, K>,
            StorefrontReducer<C, O, N, K>,
        >,
    > {
        Arc::clone(&self.store)
    }

    /// Fetch a fresh catalog/stock snapshot and wait for it to land.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::DataAccess`] when the catalog service fails;
    /// the previous snapshot stays in place.
    pub async fn refresh_catalog(&self) -> Result<()> {
        let terminal = self
            .store
            .send_and_wait_for(
                StorefrontAction::Catalog(CatalogAction::Refresh),
                |action| {
                    matches!(
                        action,
                        StorefrontAction::Catalog(
                            CatalogAction::CatalogLoaded { .. }
                                | CatalogAction::CatalogFetchFailed { .. }
                        )
                    )
                },
                self.submit_timeout,
            )
            .await
            .map_err(|error| OrderError::Internal(error.to_string()))?;

        match terminal {
            StorefrontAction::Catalog(CatalogAction::CatalogFetchFailed { reason }) => {
                Err(OrderError::DataAccess(reason))
            },
            _ => Ok(()),
        }
    }

    /// The current catalog snapshot.
    pub async fn products(&self) -> Vec<ProductWithStock> {
        self.store.state(|s| s.catalog.products.clone()).await
    }

    /// False until the first successful catalog fetch.
    pub async fn catalog_loaded(&self) -> bool {
        self.store.state(|s| s.catalog.loaded).await
    }

    /// The current cart contents and totals.
    pub async fn cart(&self) -> CartSnapshot {
        self.store
            .state(|s| CartSnapshot {
                items: s.cart.items.clone(),
                subtotal: s.cart.total,
                shipping_fee: SHIPPING_FEE,
                final_total: s.cart.final_total(),
            })
            .await
    }

    /// Add one unit of (product, size) to the cart.
    ///
    /// Refused, without touching the cart, when the size is out of stock or
    /// one more unit would exceed the stock known at this moment.
    ///
    /// # Errors
    ///
    /// - [`OrderError::ProductNotFound`] - the id is not in the snapshot
    /// - [`OrderError::OutOfStock`] - zero units available in this size
    /// - [`OrderError::InsufficientStock`] - the cart already holds all
    ///   available units
    pub async fn add_to_cart(&self, product_id: &ProductId, size: Size) -> Result<()> {
        let lookup = self
            .store
            .state(|s| {
                s.catalog.find(product_id).map(|entry| {
                    (
                        entry.product.clone(),
                        entry.stock.available(size),
                        s.cart.quantity_of(product_id, size),
                    )
                })
            })
            .await;

        let Some((product, available, in_cart)) = lookup else {
            return Err(OrderError::ProductNotFound(product_id.clone()));
        };

        if available == 0 {
            return Err(OrderError::OutOfStock { size });
        }

        if in_cart + 1 > available {
            return Err(OrderError::InsufficientStock { size, available });
        }

        self.dispatch(StorefrontAction::Cart(CartAction::AddItem { product, size }))
            .await
    }

    /// Set the quantity for a cart line.
    ///
    /// A non-positive quantity removes the line, exactly like
    /// `remove_from_cart`. A positive quantity above the live stock is
    /// refused with the exact available count; the cart is otherwise
    /// unaffected. Setting a quantity for a line that is not in the cart is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InsufficientStock`] - requested more than available
    /// - [`OrderError::ProductNotFound`] - the line's product vanished from
    ///   the snapshot
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        size: Size,
        quantity: i64,
    ) -> Result<()> {
        if quantity <= 0 {
            return self
                .dispatch(StorefrontAction::Cart(CartAction::RemoveItem {
                    product_id: product_id.clone(),
                    size,
                }))
                .await;
        }
        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);

        let lookup = self
            .store
            .state(|s| {
                s.cart.find_item(product_id, size).map(|_| {
                    s.catalog
                        .find(product_id)
                        .map(|entry| entry.stock.available(size))
                })
            })
            .await;

        let Some(available) = lookup else {
            // No such line; mirror the reducer's no-op.
            return Ok(());
        };
        let Some(available) = available else {
            return Err(OrderError::ProductNotFound(product_id.clone()));
        };

        if requested > available {
            return Err(OrderError::InsufficientStock { size, available });
        }

        self.dispatch(StorefrontAction::Cart(CartAction::SetQuantity {
            product_id: product_id.clone(),
            size,
            quantity: requested,
        }))
        .await
    }

    /// Remove a cart line. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Internal`] only when the store is shutting down.
    pub async fn remove_from_cart(&self, product_id: &ProductId, size: Size) -> Result<()> {
        self.dispatch(StorefrontAction::Cart(CartAction::RemoveItem {
            product_id: product_id.clone(),
            size,
        }))
        .await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Internal`] only when the store is shutting down.
    pub async fn clear_cart(&self) -> Result<()> {
        self.dispatch(StorefrontAction::Cart(CartAction::Clear)).await
    }

    /// Submit the current cart as an order.
    ///
    /// Drafts the order from the live cart, re-checks every line against
    /// the latest stock snapshot, then drives the pipeline: rate limit →
    /// validation → persistence → detached notification → cart clear.
    /// Returns once the order is durably recorded; the notification is
    /// never awaited.
    ///
    /// # Errors
    ///
    /// Any [`OrderError`] the pipeline rejects the submission with: stock
    /// conflicts detected here, validation errors, `TooManyOrders`,
    /// `RateLimitCheckFailed`, or `OrderPersistenceFailed` (cart left
    /// intact for a resubmit).
    pub async fn submit_order(&self, details: CustomerDetails) -> Result<PersistedOrder> {
        let (items, total_amount, stock_violation) = self
            .store
            .state(|s| {
                let violation = s.cart.items.iter().find_map(|item| {
                    let available = s
                        .catalog
                        .find(&item.product.id)
                        .map_or(0, |entry| entry.stock.available(item.size));
                    (item.quantity > available).then_some(OrderError::InsufficientStock {
                        size: item.size,
                        available,
                    })
                });
                (s.cart.items.clone(), s.cart.total, violation)
            })
            .await;

        if let Some(error) = stock_violation {
            return Err(error);
        }

        let draft = OrderDraft {
            customer_name: details.name,
            customer_phone: details.phone,
            customer_address: details.address,
            additional_info: details.additional_info,
            items,
            total_amount,
        };

        let terminal = self
            .store
            .send_and_wait_for(
                StorefrontAction::Checkout(CheckoutAction::SubmitOrder { draft }),
                StorefrontAction::is_submission_terminal,
                self.submit_timeout,
            )
            .await
            .map_err(|error| OrderError::Internal(error.to_string()))?;

        match terminal {
            StorefrontAction::Checkout(CheckoutAction::OrderPlaced { order }) => Ok(order),
            StorefrontAction::Checkout(CheckoutAction::SubmissionFailed { error }) => Err(error),
            other => Err(OrderError::Internal(format!(
                "unexpected terminal action: {other:?}"
            ))),
        }
    }

    /// Gracefully shut the session's store down.
    ///
    /// Waits for in-flight effects - the detached notification included -
    /// up to the timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Internal`] when effects are still running at
    /// the deadline.
    pub async fn shutdown(&self, timeout: Duration) -> Result<()> {
        self.store
            .shutdown(timeout)
            .await
            .map_err(|error| OrderError::Internal(error.to_string()))
    }

    async fn dispatch(&self, action: StorefrontAction) -> Result<()> {
        self.store
            .send(action)
            .await
            .map(|_| ())
            .map_err(|error| OrderError::Internal(error.to_string()))
    }
}
