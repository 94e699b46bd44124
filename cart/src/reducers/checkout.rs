//! Checkout reducer: the order submission pipeline.
//!
//! Sequential steps, each a potential abort point:
//!
//! 1. rate-limit check (count query against the order store)
//! 2. validation of the draft's fields and items
//! 3. persistence of the denormalized order rows
//! 4. detached confirmation notification (never awaited, never fails the order)
//! 5. cart clear and the terminal `OrderPlaced` event
//!
//! Steps 1-3 run strictly in sequence through the effect feedback loop;
//! step 4 runs concurrently with step 5 and its outcome is invisible to the
//! caller. Terminal events are produced by effects so broadcast observers
//! (see `Store::send_and_wait_for`) can await them.

use crate::actions::{CartAction, CheckoutAction, StorefrontAction};
use crate::environment::StorefrontEnvironment;
use crate::error::OrderError;
use crate::providers::{CatalogService, NewOrder, OrderNotification, OrderNotifier, OrderStore};
use crate::state::{CheckoutState, StorefrontState};
use crate::{rate_limit, validation};
use souq_core::environment::Clock;
use souq_core::{SmallVec, effect::Effect, smallvec};

use super::cart;

/// Terminal failure event, emitted through an effect so waiters observe it.
fn terminal_failure(error: OrderError) -> Effect<StorefrontAction> {
    Effect::Future(Box::pin(async move {
        Some(StorefrontAction::Checkout(CheckoutAction::SubmissionFailed {
            error,
        }))
    }))
}

/// Applies one checkout transition and returns its effects.
#[allow(clippy::too_many_lines)] // The pipeline's transitions read best in one match
pub(crate) fn reduce<C, O, N, K>(
    state: &mut StorefrontState,
    action: CheckoutAction,
    env: &StorefrontEnvironment<C, O, N, K>,
) -> SmallVec<[Effect<StorefrontAction>; 4]>
where
    C: CatalogService + Clone + Send + Sync + 'static,
    O: OrderStore + Clone + Send + Sync + 'static,
    N: OrderNotifier + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    match action {
        // ========== Step 1: rate limit ==========
        CheckoutAction::SubmitOrder { draft } => {
            if state.checkout.is_in_flight() {
                tracing::warn!("Submission already in flight, ignoring SubmitOrder");
                return smallvec![Effect::None];
            }

            let phone = draft.customer_phone.clone();
            state.checkout = CheckoutState::CheckingRateLimit { draft };

            let orders = env.orders.clone();
            let clock = env.clock.clone();
            smallvec![Effect::Future(Box::pin(async move {
                let action = match rate_limit::check_rate_limit(&orders, &clock, &phone).await {
                    Ok(allowed) => CheckoutAction::RateLimitChecked { allowed },
                    // A failed count query is a hard failure: never fail open.
                    Err(error) => CheckoutAction::SubmissionFailed { error },
                };
                Some(StorefrontAction::Checkout(action))
            }))]
        },

        // ========== Steps 2-3: validation, then persistence ==========
        CheckoutAction::RateLimitChecked { allowed } => {
            let CheckoutState::CheckingRateLimit { draft } = state.checkout.clone() else {
                tracing::warn!("RateLimitChecked outside of rate-limit phase, ignoring");
                return smallvec![Effect::None];
            };

            if !allowed {
                tracing::warn!(
                    phone = %draft.customer_phone,
                    "Submission rejected: too many recent orders"
                );
                state.checkout = CheckoutState::Failed {
                    error: OrderError::TooManyOrders,
                };
                return smallvec![terminal_failure(OrderError::TooManyOrders)];
            }

            if let Err(error) = validation::validate_order(
                &draft.customer_name,
                &draft.customer_phone,
                &draft.customer_address,
                &draft.items,
            ) {
                tracing::warn!(%error, "Submission rejected by validation");
                state.checkout = CheckoutState::Failed {
                    error: error.clone(),
                };
                return smallvec![terminal_failure(error)];
            }

            let new_order = NewOrder::from_draft(&draft);
            state.checkout = CheckoutState::Persisting { draft };

            let orders = env.orders.clone();
            smallvec![Effect::Future(Box::pin(async move {
                let action = match orders.insert_order(new_order).await {
                    Ok(order) => CheckoutAction::OrderPersisted { order },
                    Err(error) => CheckoutAction::PersistFailed {
                        reason: error.to_string(),
                    },
                };
                Some(StorefrontAction::Checkout(action))
            }))]
        },

        // ========== Steps 4-5: detached notify, clear, report ==========
        CheckoutAction::OrderPersisted { order } => {
            if !matches!(state.checkout, CheckoutState::Persisting { .. }) {
                tracing::warn!("OrderPersisted outside of persisting phase, ignoring");
                return smallvec![Effect::None];
            }

            // The order is durable: clear the cart exactly once, here.
            cart::reduce(&mut state.cart, CartAction::Clear);
            state.checkout = CheckoutState::Completed {
                order: order.clone(),
            };
            tracing::info!(order_id = %order.id, "Order placed");

            let notifier = env.notifier.clone();
            let notification = OrderNotification::from_order(&order);
            smallvec![
                // Step 4: fire-and-forget. Failure is logged here and
                // swallowed; it can neither delay nor undo the order.
                Effect::Detached(Box::pin(async move {
                    if let Err(error) = notifier.send_order_notification(&notification).await {
                        tracing::error!(
                            order_id = %notification.order_id,
                            %error,
                            "Failed to send order notification"
                        );
                    }
                })),
                // Step 5: terminal success event for waiters.
                Effect::Future(Box::pin(async move {
                    Some(StorefrontAction::Checkout(CheckoutAction::OrderPlaced {
                        order,
                    }))
                })),
            ]
        },

        CheckoutAction::PersistFailed { reason } => {
            if !matches!(state.checkout, CheckoutState::Persisting { .. }) {
                tracing::warn!("PersistFailed outside of persisting phase, ignoring");
                return smallvec![Effect::None];
            }

            // The cause goes to the log; the user sees the generic message
            // and may resubmit. The cart is left intact. No retry.
            tracing::error!(%reason, "Order persistence failed");
            state.checkout = CheckoutState::Failed {
                error: OrderError::OrderPersistenceFailed,
            };
            smallvec![terminal_failure(OrderError::OrderPersistenceFailed)]
        },

        // ========== Terminal events ==========
        CheckoutAction::OrderPlaced { .. } => {
            // State was set when persistence succeeded; this event exists
            // for broadcast observers.
            smallvec![Effect::None]
        },

        CheckoutAction::SubmissionFailed { error } => {
            // Normally state is already Failed. The rate-limit query error
            // path produces this event directly, so record it here too.
            if state.checkout.is_in_flight() {
                state.checkout = CheckoutState::Failed { error };
            }
            smallvec![Effect::None]
        },
    }
}
