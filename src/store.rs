//! Store

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::Span;

use crate::{
    cart::{Cart, CartError, CartLedger},
    catalog::Catalog,
    checkout::{self, CheckoutError, CheckoutSummary},
    discounts::{DiscountCode, DiscountError, DiscountLedger, DiscountPolicy, DiscountQuote, DiscountRejection},
    orders::{Order, OrderLedger},
};

/// Aggregate reporting snapshot across the order and discount ledgers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Sum of item quantities over all orders
    pub total_items_purchased: u64,

    /// Sum of `final_amount` over all orders
    pub total_purchase_amount: Decimal,

    /// Sum of `discount_amount` over all orders
    pub total_discount_amount: Decimal,

    /// Number of completed orders
    pub total_orders: u64,

    /// Every issued code with its usage status
    pub discount_codes: Vec<DiscountCode>,

    /// The next order number that will trigger code issuance
    pub next_discount_order_number: u64,
}

/// The transaction core: one catalog plus the three owned ledgers.
///
/// A `Store` is an explicitly constructed instance, not a module global;
/// callers keep one per process and pass it by reference. Every mutation
/// takes `&mut self`, so in-process checkouts are serialised by the borrow
/// rules.
#[derive(Debug)]
pub struct Store {
    catalog: Catalog,
    cart: CartLedger,
    orders: OrderLedger,
    discounts: DiscountLedger,
}

impl Store {
    /// Create a store over a catalog with the default discount policy.
    pub fn new(catalog: Catalog) -> Self {
        Store::with_policy(catalog, DiscountPolicy::default())
    }

    /// Create a store over a catalog with a custom discount policy.
    pub fn with_policy(catalog: Catalog, policy: DiscountPolicy) -> Self {
        Store {
            catalog,
            cart: CartLedger::new(),
            orders: OrderLedger::new(),
            discounts: DiscountLedger::with_policy(policy),
        }
    }

    /// The store's product catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current cart, as a defensive copy.
    pub fn cart(&self) -> Cart {
        self.cart.cart()
    }

    /// Sum of quantities across cart lines.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::ProductNotFound`]: the product id is not in the catalog.
    pub fn add_item(&mut self, product_id: &str, quantity: u32) -> Result<Cart, CartError> {
        self.cart.add_item(&self.catalog, product_id, quantity)
    }

    /// Overwrite a cart line's quantity; zero removes the line.
    pub fn update_item(&mut self, product_id: &str, quantity: u32) -> Cart {
        self.cart.update_item(product_id, quantity)
    }

    /// Remove a cart line if present.
    pub fn remove_item(&mut self, product_id: &str) -> Cart {
        self.cart.remove_item(product_id)
    }

    /// Reset the cart to empty.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// All orders, in creation order.
    pub fn orders(&self) -> &[Order] {
        self.orders.orders()
    }

    /// Look up an order by id.
    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Number of completed orders.
    pub fn total_order_count(&self) -> u64 {
        self.orders.total_order_count()
    }

    /// All issued discount codes, in issuance order.
    pub fn discount_codes(&self) -> &[DiscountCode] {
        self.discounts.codes()
    }

    /// Issued codes that have not been consumed yet.
    pub fn available_discount_codes(&self) -> Vec<&DiscountCode> {
        self.discounts.available()
    }

    /// Issued codes that have been consumed.
    pub fn used_discount_codes(&self) -> Vec<&DiscountCode> {
        self.discounts.used()
    }

    /// Manually issue a new discount code (the admin trigger).
    ///
    /// # Errors
    ///
    /// - [`DiscountError::CodeSpaceExhausted`]: every generation attempt
    ///   collided with an already-issued code.
    pub fn generate_discount(&mut self) -> Result<String, DiscountError> {
        let code = self.discounts.generate()?;

        tracing::info!(%code, "generated discount code on demand");

        Ok(code)
    }

    /// Validate a code against a cart total and quote the discount.
    ///
    /// # Errors
    ///
    /// - [`DiscountRejection::UnknownCode`]: the code was never issued.
    /// - [`DiscountRejection::AlreadyUsed`]: the code has been consumed.
    pub fn validate_discount(
        &self,
        code: &str,
        cart_total: Decimal,
    ) -> Result<DiscountQuote, DiscountRejection> {
        let amount = self.discounts.validate(code, cart_total)?;

        Ok(DiscountQuote {
            code: code.to_owned(),
            amount,
            percentage: self.discounts.policy().percent_points(),
        })
    }

    /// The next order number that will trigger code issuance.
    pub fn next_discount_order_number(&self) -> u64 {
        self.discounts
            .next_discount_order_number(self.orders.total_order_count())
    }

    /// Convert the cart into an order, applying an optional discount code.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Discount`]: the supplied code was rejected.
    /// - [`CheckoutError::Generation`]: milestone code issuance failed.
    #[tracing::instrument(
        name = "store.checkout",
        skip(self),
        fields(
            order_id = tracing::field::Empty,
            has_discount_code = discount_code.is_some(),
        ),
        err
    )]
    pub fn checkout(
        &mut self,
        discount_code: Option<&str>,
    ) -> Result<CheckoutSummary, CheckoutError> {
        let summary = checkout::process(
            &mut self.cart,
            &mut self.orders,
            &mut self.discounts,
            discount_code,
        )?;

        Span::current().record("order_id", tracing::field::display(&summary.order_id));

        Ok(summary)
    }

    /// Aggregate reporting snapshot (the admin stats view).
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_items_purchased: self.orders.total_items_purchased(),
            total_purchase_amount: self.orders.total_revenue(),
            total_discount_amount: self.orders.total_discount_amount(),
            total_orders: self.orders.total_order_count(),
            discount_codes: self.discounts.codes().to_vec(),
            next_discount_order_number: self.next_discount_order_number(),
        }
    }

    /// Test-harness reset: clears the cart, the orders (and their counter)
    /// and all issued codes.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.orders.reset();
        self.discounts.reset();
    }
}
