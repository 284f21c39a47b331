//! Checkout

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::CartLedger,
    discounts::{DiscountError, DiscountLedger, DiscountRejection},
    errors::ErrorClass,
    orders::{OrderDraft, OrderLedger},
};

/// Summary returned to the caller after a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// Id of the order that was created
    pub order_id: String,

    /// Amount actually charged
    pub final_amount: Decimal,

    /// Whether a discount code was applied
    pub discount_applied: bool,

    /// Amount taken off the subtotal
    pub discount_amount: Decimal,

    /// Milestone code issued by this checkout, if any
    pub new_discount_code: Option<String>,
}

/// Errors that abort a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// The supplied discount code was rejected.
    #[error(transparent)]
    Discount(#[from] DiscountRejection),

    /// Milestone code issuance failed.
    #[error(transparent)]
    Generation(#[from] DiscountError),
}

impl CheckoutError {
    /// Caller-visible classification for this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            CheckoutError::EmptyCart => ErrorClass::BusinessRule,
            CheckoutError::Discount(rejection) => rejection.class(),
            CheckoutError::Generation(error) => error.class(),
        }
    }
}

/// Run the checkout transaction across the three ledgers.
///
/// Validates the cart and any discount code, decides milestone issuance on
/// the order count that will result once this order lands, consumes the
/// applied code, creates the order from a cart snapshot and finally clears
/// the cart. Any failure before order creation leaves every ledger untouched.
pub(crate) fn process(
    cart: &mut CartLedger,
    orders: &mut OrderLedger,
    discounts: &mut DiscountLedger,
    discount_code: Option<&str>,
) -> Result<CheckoutSummary, CheckoutError> {
    let snapshot = cart.cart();

    if snapshot.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal = snapshot.total;

    let (applied_code, discount_amount) = match discount_code {
        Some(code) => (Some(code.to_owned()), discounts.validate(code, subtotal)?),
        None => (None, Decimal::ZERO),
    };

    let final_amount = subtotal - discount_amount;

    // Milestone check runs against the post-increment order count.
    let new_discount_code = if discounts.should_generate(orders.total_order_count() + 1) {
        Some(discounts.generate()?)
    } else {
        None
    };

    if let Some(code) = &applied_code {
        discounts.use_code(code);
    }

    let order = orders.create_order(OrderDraft {
        items: snapshot.items,
        subtotal,
        discount_code: applied_code,
        discount_amount,
        final_amount,
    });

    cart.clear();

    if let Some(code) = &new_discount_code {
        info!(order_id = %order.id, %code, "issued milestone discount code");
    }

    info!(order_id = %order.id, %final_amount, "created order");

    Ok(CheckoutSummary {
        order_id: order.id,
        final_amount: order.final_amount,
        discount_applied: order.discount_amount > Decimal::ZERO,
        discount_amount: order.discount_amount,
        new_discount_code,
    })
}
