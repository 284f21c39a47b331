//! Orders

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::cart::CartItem;

/// An immutable, completed order.
///
/// Orders are created only by checkout and never mutated or deleted
/// afterwards. `final_amount == subtotal - discount_amount` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id of the form `ORD-0001`
    pub id: String,

    /// Snapshot of the cart lines at checkout time
    pub items: Vec<CartItem>,

    /// Cart total before any discount
    pub subtotal: Decimal,

    /// Discount code applied at checkout, if any
    pub discount_code: Option<String>,

    /// Amount taken off the subtotal
    pub discount_amount: Decimal,

    /// Amount actually charged
    pub final_amount: Decimal,

    /// When the order was created
    pub created_at: Timestamp,
}

/// Inputs for creating an order: checkout's snapshot of the cart plus the
/// discount fields it resolved.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Snapshot of the cart lines
    pub items: Vec<CartItem>,

    /// Cart total before any discount
    pub subtotal: Decimal,

    /// Discount code applied, if any
    pub discount_code: Option<String>,

    /// Amount taken off the subtotal
    pub discount_amount: Decimal,

    /// Amount actually charged
    pub final_amount: Decimal,
}

/// Append-only order ledger with a monotonic id counter.
#[derive(Debug)]
pub struct OrderLedger {
    orders: Vec<Order>,
    index: FxHashMap<String, usize>,
    counter: u32,
}

impl Default for OrderLedger {
    fn default() -> Self {
        OrderLedger {
            orders: Vec::new(),
            index: FxHashMap::default(),
            counter: 1,
        }
    }
}

impl OrderLedger {
    /// Create an empty ledger; the first order gets id `ORD-0001`.
    pub fn new() -> Self {
        OrderLedger::default()
    }

    /// Create an order from a draft and append it to the ledger.
    ///
    /// Assigns the next id, stamps `created_at` with the current time and
    /// takes ownership of the draft's item snapshot, so later cart mutation
    /// cannot retroactively alter a placed order.
    pub fn create_order(&mut self, draft: OrderDraft) -> Order {
        let id = format!("ORD-{:04}", self.counter);
        self.counter = self.counter.saturating_add(1);

        let order = Order {
            id: id.clone(),
            items: draft.items,
            subtotal: draft.subtotal,
            discount_code: draft.discount_code,
            discount_amount: draft.discount_amount,
            final_amount: draft.final_amount,
            created_at: Timestamp::now(),
        };

        self.index.insert(id, self.orders.len());
        self.orders.push(order.clone());

        order
    }

    /// All orders, in creation order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order by id.
    pub fn get(&self, id: &str) -> Option<&Order> {
        self.index.get(id).and_then(|&slot| self.orders.get(slot))
    }

    /// Number of completed orders.
    pub fn total_order_count(&self) -> u64 {
        u64::try_from(self.orders.len()).unwrap_or(u64::MAX)
    }

    /// Orders that had a discount code applied.
    pub fn orders_with_discounts(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.discount_code.is_some())
            .collect()
    }

    /// Sum of `final_amount` over all orders.
    pub fn total_revenue(&self) -> Decimal {
        self.orders.iter().map(|order| order.final_amount).sum()
    }

    /// Sum of `discount_amount` over all orders.
    pub fn total_discount_amount(&self) -> Decimal {
        self.orders.iter().map(|order| order.discount_amount).sum()
    }

    /// Sum of item quantities over all orders.
    pub fn total_items_purchased(&self) -> u64 {
        self.orders
            .iter()
            .flat_map(|order| &order.items)
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Test-harness reset: drops all orders and restarts the counter at 1.
    pub fn reset(&mut self) {
        self.orders.clear();
        self.index.clear();
        self.counter = 1;
    }
}
