//! Order validation.
//!
//! Pure functions checking customer-supplied order fields and cart
//! non-emptiness/ceiling. Checks run in a fixed order and the first
//! failure wins.

use crate::constants::{MAX_ORDER_AMOUNT, MIN_ADDRESS_LEN, MIN_NAME_LEN};
use crate::error::OrderError;
use crate::types::{CartItem, Money};
use regex::Regex;
use std::sync::LazyLock;

/// Egyptian mobile format: leading "01", a second digit in {0,1,2,5},
/// then 8 more digits - 11 digits total.
#[allow(clippy::expect_used)] // hardcoded pattern always compiles
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^01[0125][0-9]{8}$").expect("hardcoded phone pattern should always compile")
});

/// True when `phone` matches the Egyptian mobile format.
#[must_use]
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Item subtotal: `Σ effective_price × quantity` over the given lines.
///
/// The shipping fee is NOT part of this value.
#[must_use]
pub fn item_subtotal(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// Validates an order draft's customer fields and items.
///
/// Checks run in this fixed order, short-circuiting on the first failure:
///
/// 1. name length (≥ 3 characters)
/// 2. phone format (`01[0125]` + 8 digits)
/// 3. address length (≥ 10 characters)
/// 4. cart non-emptiness
/// 5. item subtotal ceiling (≤ 10 000 EGP, shipping fee excluded)
///
/// # Errors
///
/// Returns the first failing check's [`OrderError`]; `Ok(())` only when all
/// five pass.
pub fn validate_order(
    name: &str,
    phone: &str,
    address: &str,
    items: &[CartItem],
) -> Result<(), OrderError> {
    if name.chars().count() < MIN_NAME_LEN {
        return Err(OrderError::NameTooShort);
    }

    if !is_valid_phone_number(phone) {
        return Err(OrderError::InvalidPhone);
    }

    if address.chars().count() < MIN_ADDRESS_LEN {
        return Err(OrderError::AddressTooShort);
    }

    if items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    if item_subtotal(items) > MAX_ORDER_AMOUNT {
        return Err(OrderError::AmountExceedsMaximum);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::types::{Gender, Product, ProductId, Size};

    fn item(pounds: i64, discount: Option<i64>, quantity: u32) -> CartItem {
        let product = Product {
            id: ProductId::from("prod-1"),
            name: "Hoodie".to_string(),
            description: String::new(),
            price: Money::from_pounds(pounds),
            discount_price: discount.map(Money::from_pounds),
            images: vec![],
            sizes: vec![Size::M],
            gender: Gender::Unisex,
            color: "black".to_string(),
        };
        let mut item = CartItem::new(product, Size::M);
        item.quantity = quantity;
        item
    }

    const NAME: &str = "Nour Hassan";
    const PHONE: &str = "01001234567";
    const ADDRESS: &str = "12 Tahrir Square, Cairo";

    #[test]
    fn accepts_a_complete_valid_draft() {
        let items = vec![item(599, Some(499), 3)];
        assert_eq!(validate_order(NAME, PHONE, ADDRESS, &items), Ok(()));
    }

    #[test]
    fn two_character_name_fails_regardless_of_other_fields() {
        let items = vec![item(599, None, 1)];
        assert_eq!(
            validate_order("Jo", PHONE, ADDRESS, &items),
            Err(OrderError::NameTooShort)
        );
        // Name is checked first even when later fields are also bad.
        assert_eq!(
            validate_order("Jo", "bad", "short", &[]),
            Err(OrderError::NameTooShort)
        );
    }

    #[test]
    fn phone_validation_boundaries() {
        // 10 digits: too short
        assert!(!is_valid_phone_number("0109999999"));
        // 11 digits with a valid prefix digit (01 + 0)
        assert!(is_valid_phone_number("01091234567"));
        // 12 digits: too long
        assert!(!is_valid_phone_number("010912345678"));
        // Second prefix digit outside {0,1,2,5}
        assert!(!is_valid_phone_number("01391234567"));
        // All valid second digits
        for d in ["0", "1", "2", "5"] {
            assert!(is_valid_phone_number(&format!("01{d}12345678")), "{d}");
        }
        // Non-digits rejected
        assert!(!is_valid_phone_number("01o91234567"));
    }

    #[test]
    fn short_address_fails_after_phone() {
        let items = vec![item(599, None, 1)];
        assert_eq!(
            validate_order(NAME, PHONE, "Cairo", &items),
            Err(OrderError::AddressTooShort)
        );
    }

    #[test]
    fn empty_cart_fails() {
        assert_eq!(
            validate_order(NAME, PHONE, ADDRESS, &[]),
            Err(OrderError::EmptyCart)
        );
    }

    #[test]
    fn ceiling_uses_item_subtotal_not_final_total() {
        // 499 × 3 = 1497: fine. The displayed final total (1547 with the
        // flat fee) plays no part here.
        let items = vec![item(599, Some(499), 3)];
        assert_eq!(item_subtotal(&items), Money::from_pounds(1497));
        assert_eq!(validate_order(NAME, PHONE, ADDRESS, &items), Ok(()));

        // Exactly at the ceiling: accepted.
        let at_ceiling = vec![item(10_000, None, 1)];
        assert_eq!(validate_order(NAME, PHONE, ADDRESS, &at_ceiling), Ok(()));

        // One pound above: rejected.
        let above = vec![item(10_001, None, 1)];
        assert_eq!(
            validate_order(NAME, PHONE, ADDRESS, &above),
            Err(OrderError::AmountExceedsMaximum)
        );
    }

    #[test]
    fn subtotal_recomputes_from_discounted_prices() {
        let items = vec![item(599, Some(499), 2), item(100, None, 1)];
        assert_eq!(item_subtotal(&items), Money::from_pounds(1098));
    }
}
