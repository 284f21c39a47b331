//! Integration test for the full shop flow over the demo catalog.
//!
//! Walks a store through the loyalty milestone cycle:
//!
//! 1. Cart arithmetic: adding Wireless Headphones (99.99) twice yields one
//!    line with quantity 2 and a total of 199.98.
//! 2. Orders are sequenced `ORD-0001`, `ORD-0002`, ... and the first two
//!    checkouts issue no discount code.
//! 3. The third checkout lands on the milestone (order count becomes 3) and
//!    issues exactly one `SAVE`-prefixed code.
//! 4. The fourth checkout is past the milestone and issues nothing.
//! 5. Checkout on an empty cart is rejected with "Cart is empty" and creates
//!    no order.

use testresult::TestResult;

use tally::prelude::{CheckoutError, Store, demo_catalog};

use rust_decimal::Decimal;

#[test]
fn milestone_cycle_over_the_demo_catalog() -> TestResult {
    let mut store = Store::new(demo_catalog());

    // Step 1: cart arithmetic.
    let cart = store.add_item("1", 1)?;

    assert_eq!(cart.total, Decimal::new(9999, 2));

    let cart = store.add_item("1", 1)?;

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items.first().map(|item| item.quantity), Some(2));
    assert_eq!(cart.total, Decimal::new(19998, 2));

    // Step 2: first two checkouts, no milestone.
    let first = store.checkout(None)?;

    assert_eq!(first.order_id, "ORD-0001");
    assert_eq!(first.final_amount, Decimal::new(19998, 2));
    assert!(!first.discount_applied);
    assert_eq!(first.new_discount_code, None);
    assert!(store.cart().is_empty(), "checkout must clear the cart");

    store.add_item("2", 1)?;
    let second = store.checkout(None)?;

    assert_eq!(second.order_id, "ORD-0002");
    assert_eq!(second.new_discount_code, None);

    // Step 3: the third checkout lands on the milestone.
    store.add_item("3", 2)?;
    let third = store.checkout(None)?;

    assert_eq!(third.order_id, "ORD-0003");

    let issued = third.new_discount_code.as_deref();

    assert!(
        issued.is_some_and(|code| code.starts_with("SAVE")),
        "third order must issue a SAVE code, got {issued:?}"
    );
    assert_eq!(store.discount_codes().len(), 1);
    assert_eq!(store.available_discount_codes().len(), 1);
    assert_eq!(store.next_discount_order_number(), 6);

    // Step 4: the fourth checkout is past the milestone.
    store.add_item("4", 1)?;
    let fourth = store.checkout(None)?;

    assert_eq!(fourth.order_id, "ORD-0004");
    assert_eq!(fourth.new_discount_code, None);
    assert_eq!(store.discount_codes().len(), 1);

    // Step 5: empty cart is rejected without creating an order.
    let result = store.checkout(None);

    assert!(
        matches!(result, Err(CheckoutError::EmptyCart)),
        "expected EmptyCart, got {result:?}"
    );
    assert_eq!(
        result.err().map(|e| e.to_string()),
        Some("Cart is empty".to_owned())
    );
    assert_eq!(store.total_order_count(), 4);

    Ok(())
}

#[test]
fn order_ledger_is_append_only_and_queryable() -> TestResult {
    let mut store = Store::new(demo_catalog());

    store.add_item("5", 1)?;
    store.checkout(None)?;
    store.add_item("6", 3)?;
    store.checkout(None)?;

    let ids: Vec<&str> = store.orders().iter().map(|o| o.id.as_str()).collect();

    assert_eq!(ids, ["ORD-0001", "ORD-0002"]);
    assert_eq!(
        store.order("ORD-0002").map(|o| o.subtotal),
        Some(Decimal::new(8997, 2))
    );
    assert_eq!(store.order("ORD-9999"), None);

    let stats = store.stats();

    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_items_purchased, 4);
    assert_eq!(stats.total_purchase_amount, Decimal::new(16996, 2));
    assert_eq!(stats.total_discount_amount, Decimal::ZERO);
    assert_eq!(stats.next_discount_order_number, 3);

    Ok(())
}
