//! Integration tests for the order submission pipeline.
//!
//! Drives the session end to end against in-memory collaborators: rate
//! limiting, validation, persistence, the detached notification, and the
//! cart clear that follows a durable order.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use chrono::Duration as TimeDelta;
use souq_cart::mocks::{InMemoryCatalog, InMemoryOrderStore, RecordingNotifier};
use souq_cart::types::{Gender, Money, OrderStatus, Product, ProductId, ProductWithStock, Size, StockLevel};
use souq_cart::{CustomerDetails, OrderError, StorefrontEnvironment, StorefrontSession};
use souq_core::environment::Clock;
use souq_testing::{FixedClock, test_clock};
use std::sync::Arc;
use std::time::Duration;

type TestSession =
    StorefrontSession<InMemoryCatalog, InMemoryOrderStore, RecordingNotifier, FixedClock>;

struct Harness {
    session: TestSession,
    catalog: InMemoryCatalog,
    orders: InMemoryOrderStore,
    notifier: RecordingNotifier,
    clock: FixedClock,
}

fn hoodie() -> ProductWithStock {
    ProductWithStock {
        product: Product {
            id: ProductId::from("prod-1"),
            name: "Black Hoodie".to_string(),
            description: "Cotton blend hoodie".to_string(),
            price: Money::from_pounds(599),
            discount_price: Some(Money::from_pounds(499)),
            images: vec!["hoodie-front.jpg".to_string()],
            sizes: vec![Size::M, Size::L, Size::XL],
            gender: Gender::Unisex,
            color: "black".to_string(),
        },
        stock: StockLevel::empty()
            .with(Size::M, 5)
            .with(Size::L, 3)
            .with(Size::XL, 1),
    }
}

fn luxury() -> ProductWithStock {
    ProductWithStock {
        product: Product {
            id: ProductId::from("prod-lux"),
            name: "Leather Jacket".to_string(),
            description: "Hand-stitched leather".to_string(),
            price: Money::from_pounds(10_001),
            discount_price: None,
            images: vec![],
            sizes: vec![Size::M],
            gender: Gender::Unisex,
            color: "brown".to_string(),
        },
        stock: StockLevel::empty().with(Size::M, 1),
    }
}

async fn harness_with(products: Vec<ProductWithStock>) -> Harness {
    let clock = test_clock();
    let catalog = InMemoryCatalog::new(products);
    let orders = InMemoryOrderStore::with_clock(Arc::new(clock.clone()));
    let notifier = RecordingNotifier::new();

    let env = StorefrontEnvironment::new(
        catalog.clone(),
        orders.clone(),
        notifier.clone(),
        clock.clone(),
    );
    let session = StorefrontSession::new(env).with_submit_timeout(Duration::from_secs(5));
    session.refresh_catalog().await.expect("catalog loads");

    Harness {
        session,
        catalog,
        orders,
        notifier,
        clock,
    }
}

async fn harness() -> Harness {
    harness_with(vec![hoodie()]).await
}

fn details() -> CustomerDetails {
    CustomerDetails {
        name: "Nour Hassan".to_string(),
        phone: "01001234567".to_string(),
        address: "12 Tahrir Square, Cairo".to_string(),
        additional_info: Some("Ring twice".to_string()),
    }
}

const PRODUCT: &str = "prod-1";

#[tokio::test]
async fn successful_submission_persists_clears_and_notifies() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);

    for _ in 0..3 {
        h.session.add_to_cart(&id, Size::M).await.expect("in stock");
    }

    let cart = h.session.cart().await;
    assert_eq!(cart.subtotal, Money::from_pounds(1497));
    assert_eq!(cart.final_total, Money::from_pounds(1547));

    let order = h.session.submit_order(details()).await.expect("order placed");

    // Persisted with denormalized rows, the subtotal, and status pending.
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Money::from_pounds(1497));
    assert_eq!(order.customer_phone, "01001234567");
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_name, "Black Hoodie");
    assert_eq!(order.items[0].size, Size::M);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.items[0].unit_price, Money::from_pounds(499));

    // One insert, and the cart was cleared after it.
    assert_eq!(h.orders.insert_calls(), 1);
    assert!(h.session.cart().await.items.is_empty());

    // The detached notification lands by shutdown time.
    h.session.shutdown(Duration::from_secs(2)).await.expect("drained");
    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].order_id, order.id);
    assert_eq!(sent[0].total_amount, Money::from_pounds(1497));
}

#[tokio::test]
async fn fourth_order_in_window_is_rate_limited() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    let recent = h.clock.now() - TimeDelta::minutes(10);
    for _ in 0..3 {
        h.orders.seed_order("01001234567", recent);
    }

    let result = h.session.submit_order(details()).await;

    assert_eq!(result, Err(OrderError::TooManyOrders));
    // Never reached the insert.
    assert_eq!(h.orders.insert_calls(), 0);
    // Cart untouched so the user can wait and retry.
    assert_eq!(h.session.cart().await.items.len(), 1);
}

#[tokio::test]
async fn orders_outside_the_window_do_not_count() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    let stale = h.clock.now() - TimeDelta::minutes(31);
    for _ in 0..3 {
        h.orders.seed_order("01001234567", stale);
    }
    // Two recent ones stay under the threshold of three.
    let recent = h.clock.now() - TimeDelta::minutes(5);
    for _ in 0..2 {
        h.orders.seed_order("01001234567", recent);
    }

    assert!(h.session.submit_order(details()).await.is_ok());
}

#[tokio::test]
async fn other_phones_do_not_consume_the_budget() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    let recent = h.clock.now() - TimeDelta::minutes(1);
    for _ in 0..3 {
        h.orders.seed_order("01117654321", recent);
    }

    assert!(h.session.submit_order(details()).await.is_ok());
}

#[tokio::test]
async fn rate_limit_query_failure_fails_the_submission() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    h.orders.set_fail_counts(true);

    let result = h.session.submit_order(details()).await;

    // Never fail open: the submission aborts before any mutation.
    assert!(matches!(result, Err(OrderError::RateLimitCheckFailed(_))));
    assert_eq!(h.orders.insert_calls(), 0);
    assert_eq!(h.session.cart().await.items.len(), 1);
}

#[tokio::test]
async fn validation_failure_prevents_the_insert() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    let mut bad_phone = details();
    bad_phone.phone = "0109999999".to_string(); // 10 digits
    assert_eq!(
        h.session.submit_order(bad_phone).await,
        Err(OrderError::InvalidPhone)
    );

    let mut short_name = details();
    short_name.name = "Jo".to_string();
    assert_eq!(
        h.session.submit_order(short_name).await,
        Err(OrderError::NameTooShort)
    );

    assert_eq!(h.orders.insert_calls(), 0);
    assert_eq!(h.session.cart().await.items.len(), 1);
}

#[tokio::test]
async fn empty_cart_submission_is_rejected() {
    let h = harness().await;

    assert_eq!(
        h.session.submit_order(details()).await,
        Err(OrderError::EmptyCart)
    );
    assert_eq!(h.orders.insert_calls(), 0);
}

#[tokio::test]
async fn subtotal_above_the_ceiling_is_rejected() {
    let h = harness_with(vec![luxury()]).await;
    let id = ProductId::from("prod-lux");
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    assert_eq!(
        h.session.submit_order(details()).await,
        Err(OrderError::AmountExceedsMaximum)
    );
    assert_eq!(h.orders.insert_calls(), 0);
}

#[tokio::test]
async fn persistence_failure_surfaces_generic_error_and_keeps_cart() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    h.orders.set_fail_inserts(true);
    let result = h.session.submit_order(details()).await;

    assert_eq!(result, Err(OrderError::OrderPersistenceFailed));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Failed to place order. Please try again."
    );
    // Insert was attempted once; no retry.
    assert_eq!(h.orders.insert_calls(), 1);
    // Cart intact so the user can resubmit, and no notification went out.
    assert_eq!(h.session.cart().await.items.len(), 1);
    h.session.shutdown(Duration::from_secs(2)).await.expect("drained");
    assert_eq!(h.notifier.attempts(), 0);
}

#[tokio::test]
async fn user_can_resubmit_after_persistence_failure() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    h.orders.set_fail_inserts(true);
    assert!(h.session.submit_order(details()).await.is_err());

    h.orders.set_fail_inserts(false);
    let order = h.session.submit_order(details()).await.expect("second try");

    assert_eq!(order.total_amount, Money::from_pounds(499));
    assert!(h.session.cart().await.items.is_empty());
}

#[tokio::test]
async fn notification_failure_never_fails_the_order() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::M).await.expect("in stock");

    h.notifier.set_should_succeed(false);
    let order = h.session.submit_order(details()).await.expect("order placed");

    // Success reported, cart cleared, order persisted.
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(h.session.cart().await.items.is_empty());
    assert_eq!(h.orders.orders().len(), 1);

    // The delivery was attempted and its failure swallowed.
    h.session.shutdown(Duration::from_secs(2)).await.expect("drained");
    assert_eq!(h.notifier.attempts(), 1);
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn submission_rechecks_stock_against_the_latest_snapshot() {
    let h = harness().await;
    let id = ProductId::from(PRODUCT);
    h.session.add_to_cart(&id, Size::XL).await.expect("one in stock");

    // Stock vanishes between add and submit; the refresh replaces the
    // whole snapshot.
    h.catalog.set_stock(&id, Size::XL, 0);
    h.session.refresh_catalog().await.expect("catalog reloads");

    let result = h.session.submit_order(details()).await;

    assert_eq!(
        result,
        Err(OrderError::InsufficientStock {
            size: Size::XL,
            available: 0,
        })
    );
    assert_eq!(h.orders.insert_calls(), 0);
}

#[tokio::test]
async fn rate_limit_threshold_is_exactly_three() {
    let clock = test_clock();
    let orders = InMemoryOrderStore::with_clock(Arc::new(clock.clone()));
    let phone = "01001234567";

    let recent = clock.now() - TimeDelta::minutes(5);
    orders.seed_order(phone, recent);
    orders.seed_order(phone, recent);
    assert_eq!(
        souq_cart::rate_limit::check_rate_limit(&orders, &clock, phone).await,
        Ok(true)
    );

    orders.seed_order(phone, recent);
    assert_eq!(
        souq_cart::rate_limit::check_rate_limit(&orders, &clock, phone).await,
        Ok(false)
    );

    orders.seed_order(phone, recent);
    assert_eq!(
        souq_cart::rate_limit::check_rate_limit(&orders, &clock, phone).await,
        Ok(false)
    );
}
