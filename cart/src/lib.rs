//! # Souq Cart
//!
//! The storefront cart core: an in-memory cart reducer, order validation,
//! a query-based rate limiter, and the order submission pipeline.
//!
//! ## Architecture
//!
//! The cart core is implemented as reducers and effects:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! - The **cart reducer** is pure: every transition recomputes the running
//!   total from the referenced products and never performs I/O.
//! - The **checkout reducer** drives the submission pipeline: rate-limit
//!   check → validation → persistence → detached notification → cart clear.
//! - The **catalog reducer** replaces the whole product/stock snapshot on
//!   every refresh signalled by the external change feed.
//!
//! External collaborators (catalog service, order persistence, email
//! notifier, stock change feed) are injected through the
//! [`environment::StorefrontEnvironment`] as provider traits; mocks live in
//! [`mocks`] behind the default `test-utils` feature.
//!
//! ## Example: placing an order
//!
//! ```rust,ignore
//! use souq_cart::*;
//!
//! let session = StorefrontSession::new(environment);
//! session.refresh_catalog().await?;
//!
//! session.add_to_cart(&product_id, Size::M).await?;
//!
//! let order = session
//!     .submit_order(CustomerDetails {
//!         name: "Nour Hassan".into(),
//!         phone: "01001234567".into(),
//!         address: "12 Tahrir Square, Cairo".into(),
//!         additional_info: None,
//!     })
//!     .await?;
//!
//! assert_eq!(order.status, OrderStatus::Pending);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod constants;
pub mod environment;
pub mod error;
pub mod providers;
pub mod rate_limit;
pub mod reducers;
pub mod session;
pub mod state;
pub mod sync;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::{CartAction, CatalogAction, CheckoutAction, StorefrontAction};
pub use environment::StorefrontEnvironment;
pub use error::{OrderError, Result};
pub use reducers::StorefrontReducer;
pub use session::{CartSnapshot, CustomerDetails, StorefrontSession};
pub use state::{CartState, CatalogState, CheckoutState, StorefrontState};
pub use types::{
    CartItem, Money, OrderDraft, OrderId, OrderItem, OrderStatus, PersistedOrder, Product,
    ProductId, ProductWithStock, Size, StockLevel,
};
