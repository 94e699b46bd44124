//! Property tests for the cart reducer.
//!
//! For all sequences of cart actions, the resulting state never holds two
//! lines for the same (product, size), every quantity is positive, and the
//! stored total always reconciles with the recomputed sum.

use proptest::prelude::*;
use souq_cart::reducers::cart;
use souq_cart::state::CartState;
use souq_cart::types::{Gender, Money, Product, ProductId, Size};
use souq_cart::CartAction;
use std::collections::HashSet;

fn product(index: usize) -> Product {
    // A small pool of products, one of them discounted.
    let prices = [(599, Some(499)), (250, None), (1200, Some(999))];
    let (pounds, discount) = prices[index % prices.len()];
    Product {
        id: ProductId::from(format!("p{index}").as_str()),
        name: format!("Product {index}"),
        description: String::new(),
        price: Money::from_pounds(pounds),
        discount_price: discount.map(Money::from_pounds),
        images: vec![],
        sizes: vec![Size::M, Size::L, Size::XL],
        gender: Gender::Unisex,
        color: "black".to_string(),
    }
}

const SIZES: [Size; 3] = [Size::M, Size::L, Size::XL];

#[derive(Debug, Clone)]
enum Op {
    Add(usize, usize),
    Remove(usize, usize),
    Set(usize, usize, u32),
    Clear,
}

impl Op {
    fn into_action(self) -> CartAction {
        match self {
            Op::Add(p, s) => CartAction::AddItem {
                product: product(p),
                size: SIZES[s],
            },
            Op::Remove(p, s) => CartAction::RemoveItem {
                product_id: product(p).id,
                size: SIZES[s],
            },
            Op::Set(p, s, quantity) => CartAction::SetQuantity {
                product_id: product(p).id,
                size: SIZES[s],
                quantity,
            },
            Op::Clear => CartAction::Clear,
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..3usize).prop_map(|(p, s)| Op::Add(p, s)),
        (0..3usize, 0..3usize).prop_map(|(p, s)| Op::Remove(p, s)),
        (0..3usize, 0..3usize, 0..5u32).prop_map(|(p, s, q)| Op::Set(p, s, q)),
        Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_after_every_transition(
        ops in proptest::collection::vec(op_strategy(), 0..40)
    ) {
        let mut state = CartState::new();

        for op in ops {
            cart::reduce(&mut state, op.into_action());

            // (a) at most one line per (product, size)
            let mut seen = HashSet::new();
            for item in &state.items {
                prop_assert!(
                    seen.insert((item.product.id.clone(), item.size)),
                    "duplicate line for {:?} {:?}", item.product.id, item.size
                );
                // (b) quantities are strictly positive
                prop_assert!(item.quantity > 0);
            }

            // (c) stored total always reconciles with the recomputed sum
            prop_assert_eq!(state.total, state.recomputed_total());
        }
    }

    #[test]
    fn add_item_increases_the_line_by_exactly_one(
        ops in proptest::collection::vec(op_strategy(), 0..20),
        p in 0..3usize,
        s in 0..3usize,
    ) {
        let mut state = CartState::new();
        for op in ops {
            cart::reduce(&mut state, op.into_action());
        }

        let before = state.quantity_of(&product(p).id, SIZES[s]);
        cart::reduce(&mut state, Op::Add(p, s).into_action());

        prop_assert_eq!(state.quantity_of(&product(p).id, SIZES[s]), before + 1);
    }

    #[test]
    fn set_quantity_zero_equals_remove(
        ops in proptest::collection::vec(op_strategy(), 0..20),
        p in 0..3usize,
        s in 0..3usize,
    ) {
        let mut removed = CartState::new();
        let mut zeroed = CartState::new();
        for op in ops {
            cart::reduce(&mut removed, op.clone().into_action());
            cart::reduce(&mut zeroed, op.into_action());
        }

        cart::reduce(&mut removed, Op::Remove(p, s).into_action());
        cart::reduce(&mut zeroed, Op::Set(p, s, 0).into_action());

        prop_assert_eq!(removed, zeroed);
    }

    #[test]
    fn remove_of_absent_key_is_identity(
        ops in proptest::collection::vec(op_strategy(), 0..20),
        s in 0..3usize,
    ) {
        let mut state = CartState::new();
        for op in ops {
            cart::reduce(&mut state, op.into_action());
        }
        let before = state.clone();

        // Product index 9 is never generated by the strategy.
        cart::reduce(
            &mut state,
            CartAction::RemoveItem {
                product_id: product(9).id,
                size: SIZES[s],
            },
        );

        prop_assert_eq!(state, before);
    }
}
