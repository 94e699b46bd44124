//! Core domain types for the storefront cart.
//!
//! All types are `Clone` to support the functional architecture pattern.
//! Catalog data (products, stock) is read-only to this core: it is loaded
//! from the external catalog service and replaced wholesale on refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a product.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new `ProductId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Unique identifier for a persisted order (server-assigned).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new `OrderId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Garment size offered by the storefront.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    /// Medium
    M,
    /// Large
    L,
    /// Extra large
    XL,
}

impl Size {
    /// All sizes the storefront offers, in display order.
    pub const ALL: [Size; 3] = [Size::M, Size::L, Size::XL];
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::M => write!(f, "M"),
            Self::L => write!(f, "L"),
            Self::XL => write!(f, "XL"),
        }
    }
}

impl FromStr for Size {
    type Err = String;

    /// Parses a size case-insensitively (`"m"`, `"XL"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::XL),
            other => Err(format!("unknown size: {other}")),
        }
    }
}

/// Money amount in piastres (to avoid floating point issues).
///
/// Catalog prices are whole Egyptian pounds; totals are integer arithmetic
/// throughout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Money = Money(0);

    /// Creates a new money amount from piastres
    #[must_use]
    pub const fn from_piastres(piastres: i64) -> Self {
        Self(piastres)
    }

    /// Creates a new money amount from whole pounds (converted to piastres)
    #[must_use]
    pub const fn from_pounds(pounds: i64) -> Self {
        Self(pounds * 100)
    }

    /// Returns the value in piastres
    #[must_use]
    pub const fn piastres(&self) -> i64 {
        self.0
    }

    /// Returns the value in pounds (as floating point)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // i64 to f64 precision loss is acceptable for display
    pub fn pounds(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies the amount by a quantity
    #[must_use]
    pub const fn times(&self, quantity: u32) -> Money {
        Money(self.0 * quantity as i64)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, std::ops::Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} EGP", self.pounds())
    }
}

/// Catalog gender category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Menswear
    Male,
    /// Womenswear
    Female,
    /// Either
    Unisex,
}

/// A catalog product. Immutable once loaded for the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Base price
    pub price: Money,
    /// Discounted price, if the product is on sale
    pub discount_price: Option<Money>,
    /// Ordered image references
    pub images: Vec<String>,
    /// Sizes this product is offered in
    pub sizes: Vec<Size>,
    /// Gender category
    pub gender: Gender,
    /// Color
    pub color: String,
}

impl Product {
    /// The price a buyer actually pays: the discount price when present,
    /// the base price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> Money {
        self.discount_price.unwrap_or(self.price)
    }
}

/// Live available quantity per size for one product.
///
/// Sourced from the external service. Each refresh REPLACES the whole value;
/// deltas are never patched in, so stock decisions always see one coherent
/// snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Units available in size M
    pub m: u32,
    /// Units available in size L
    pub l: u32,
    /// Units available in size XL
    pub xl: u32,
}

impl StockLevel {
    /// A stock level with zero units in every size
    #[must_use]
    pub const fn empty() -> Self {
        Self { m: 0, l: 0, xl: 0 }
    }

    /// Units available for the given size
    #[must_use]
    pub const fn available(&self, size: Size) -> u32 {
        match size {
            Size::M => self.m,
            Size::L => self.l,
            Size::XL => self.xl,
        }
    }

    /// Builder-style setter for one size's quantity
    #[must_use]
    pub const fn with(mut self, size: Size, quantity: u32) -> Self {
        match size {
            Size::M => self.m = quantity,
            Size::L => self.l = quantity,
            Size::XL => self.xl = quantity,
        }
        self
    }
}

/// A product joined with its live stock counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductWithStock {
    /// The catalog product
    pub product: Product,
    /// Live per-size stock
    pub stock: StockLevel,
}

/// One (product, size) entry in the cart with a quantity.
///
/// `unit_price` is snapshotted at add time as the then-current effective
/// price. Totals are NOT derived from it: they are always recomputed from
/// the referenced product's price fields at calculation time, so a price
/// change on the product is reflected in the next total read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line refers to
    pub product: Product,
    /// Selected size
    pub size: Size,
    /// Quantity, always a positive integer while the line exists
    pub quantity: u32,
    /// Effective price captured when the line was created
    pub unit_price: Money,
}

impl CartItem {
    /// Creates a new cart line with quantity 1, snapshotting the price
    #[must_use]
    pub fn new(product: Product, size: Size) -> Self {
        let unit_price = product.effective_price();
        Self {
            product,
            size,
            quantity: 1,
            unit_price,
        }
    }

    /// Line subtotal, recomputed from the product's current price fields
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.effective_price().times(self.quantity)
    }
}

/// Customer-supplied order fields plus the drafted cart contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Customer name
    pub customer_name: String,
    /// Customer phone (Egyptian mobile format)
    pub customer_phone: String,
    /// Delivery address
    pub customer_address: String,
    /// Optional free-text notes
    pub additional_info: Option<String>,
    /// Cart lines at submission time
    pub items: Vec<CartItem>,
    /// Cart subtotal at submission time (shipping fee excluded)
    pub total_amount: Money,
}

/// Denormalized order row as persisted by the external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier
    pub product_id: ProductId,
    /// Product name at order time
    pub product_name: String,
    /// Selected size
    pub size: Size,
    /// Quantity ordered
    pub quantity: u32,
    /// Effective unit price at order time
    pub unit_price: Money,
}

impl OrderItem {
    /// Builds the persisted row from a cart line, denormalizing the product
    /// fields and capturing the effective price at this moment.
    #[must_use]
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            product_name: item.product.name.clone(),
            size: item.size,
            quantity: item.quantity,
            unit_price: item.product.effective_price(),
        }
    }

    /// Row subtotal
    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Status of a persisted order.
///
/// This core only ever creates orders in `Pending`; later transitions are
/// managed outside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, awaiting confirmation
    Pending,
    /// Confirmed by the store
    Confirmed,
    /// Delivered to the customer
    Delivered,
    /// Cancelled
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// An order as recorded by the external persistence collaborator.
///
/// Created once per successful checkout; never mutated by this core
/// afterward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedOrder {
    /// Server-assigned identifier
    pub id: OrderId,
    /// Customer name
    pub customer_name: String,
    /// Customer phone
    pub customer_phone: String,
    /// Delivery address
    pub customer_address: String,
    /// Optional free-text notes
    pub additional_info: Option<String>,
    /// Denormalized item rows
    pub items: Vec<OrderItem>,
    /// Total amount (item subtotal at submission time)
    pub total_amount: Money,
    /// Lifecycle status, `Pending` at creation
    pub status: OrderStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    fn hoodie() -> Product {
        Product {
            id: ProductId::from("prod-1"),
            name: "Black Hoodie".to_string(),
            description: "Cotton blend hoodie".to_string(),
            price: Money::from_pounds(599),
            discount_price: Some(Money::from_pounds(499)),
            images: vec!["hoodie-front.jpg".to_string()],
            sizes: vec![Size::M, Size::L, Size::XL],
            gender: Gender::Unisex,
            color: "black".to_string(),
        }
    }

    #[test]
    fn money_from_pounds() {
        let m = Money::from_pounds(499);
        assert_eq!(m.piastres(), 49_900);
        assert!((m.pounds() - 499.0).abs() < 0.01);
    }

    #[test]
    fn money_times_and_sum() {
        let prices = [Money::from_pounds(499).times(3), Money::from_pounds(50)];
        let total: Money = prices.into_iter().sum();
        assert_eq!(total, Money::from_pounds(1547));
    }

    #[test]
    fn effective_price_prefers_discount() {
        assert_eq!(hoodie().effective_price(), Money::from_pounds(499));

        let mut full_price = hoodie();
        full_price.discount_price = None;
        assert_eq!(full_price.effective_price(), Money::from_pounds(599));
    }

    #[test]
    fn size_parses_case_insensitively() {
        assert_eq!("m".parse::<Size>().unwrap(), Size::M);
        assert_eq!("xl".parse::<Size>().unwrap(), Size::XL);
        assert!("XXL".parse::<Size>().is_err());
    }

    #[test]
    fn stock_level_replaces_per_size() {
        let stock = StockLevel::empty().with(Size::M, 5).with(Size::XL, 1);
        assert_eq!(stock.available(Size::M), 5);
        assert_eq!(stock.available(Size::L), 0);
        assert_eq!(stock.available(Size::XL), 1);
    }

    #[test]
    fn line_total_ignores_stale_snapshot() {
        let mut item = CartItem::new(hoodie(), Size::M);
        item.quantity = 3;
        // Simulate a price change after the line was created: the snapshot
        // stays stale, the total follows the product.
        item.product.discount_price = Some(Money::from_pounds(450));
        assert_eq!(item.unit_price, Money::from_pounds(499));
        assert_eq!(item.line_total(), Money::from_pounds(1350));
    }

    #[test]
    fn order_item_denormalizes_product_fields() {
        let mut item = CartItem::new(hoodie(), Size::L);
        item.quantity = 2;
        let row = OrderItem::from_cart_item(&item);
        assert_eq!(row.product_id, ProductId::from("prod-1"));
        assert_eq!(row.product_name, "Black Hoodie");
        assert_eq!(row.unit_price, Money::from_pounds(499));
        assert_eq!(row.subtotal(), Money::from_pounds(998));
    }

    #[test]
    fn order_status_renders_like_the_database_strings() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
    }
}
