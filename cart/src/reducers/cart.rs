//! Cart reducer.
//!
//! Pure transitions over [`CartState`]: no side effects, no I/O, no stock
//! checks. Stock must be validated by the caller before dispatching - the
//! store trusts its caller (see [`crate::session`]).
//!
//! Every transition recomputes the running total from the items' referenced
//! products, so the stored `total` can never drift from
//! [`CartState::recomputed_total`].

use crate::actions::CartAction;
use crate::state::CartState;
use crate::types::CartItem;

/// Applies one cart transition in place.
pub fn reduce(state: &mut CartState, action: CartAction) {
    match action {
        CartAction::AddItem { product, size } => {
            let existing = state
                .items
                .iter_mut()
                .find(|item| item.product.id == product.id && item.size == size);

            if let Some(item) = existing {
                // The line already exists: exactly +1, never a duplicate line.
                item.quantity += 1;
            } else {
                state.items.push(CartItem::new(product, size));
            }
        },

        CartAction::RemoveItem { product_id, size } => {
            state
                .items
                .retain(|item| !(item.product.id == product_id && item.size == size));
        },

        CartAction::SetQuantity {
            product_id,
            size,
            quantity,
        } => {
            if quantity == 0 {
                // Zero collapses to absence, exactly as RemoveItem.
                state
                    .items
                    .retain(|item| !(item.product.id == product_id && item.size == size));
            } else if let Some(item) = state
                .items
                .iter_mut()
                .find(|item| item.product.id == product_id && item.size == size)
            {
                item.quantity = quantity;
            }
            // Absent key with a positive quantity: no-op, like the removal case.
        },

        CartAction::Clear => {
            state.items.clear();
        },
    }

    state.total = state.recomputed_total();
    debug_assert_eq!(state.total, state.recomputed_total());
}
