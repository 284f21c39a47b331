//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{Catalog, Product},
    errors::ErrorClass,
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be a positive integer.
    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    /// The product id is not in the catalog.
    #[error("Product not found")]
    ProductNotFound,
}

impl CartError {
    /// Caller-visible classification for this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            CartError::InvalidQuantity => ErrorClass::InvalidArgument,
            CartError::ProductNotFound => ErrorClass::NotFound,
        }
    }
}

/// One cart line: a product snapshot and its quantity.
///
/// The cart holds at most one entry per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Id of the product this line refers to
    pub product_id: String,

    /// Number of units; always positive
    pub quantity: u32,

    /// Snapshot of the product at the time it was added
    pub product: Product,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The cart: lines in insertion order plus their running total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines, in insertion order
    pub items: Vec<CartItem>,

    /// Sum of `price * quantity` over all lines
    pub total: Decimal,
}

impl Cart {
    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Owns the single mutable cart and its total recalculation.
///
/// Every mutation recomputes `total` from the lines, so the invariant
/// `total == Σ(price * quantity)` holds after every call.
#[derive(Debug, Default)]
pub struct CartLedger {
    cart: Cart,
}

impl CartLedger {
    /// Create an empty cart ledger.
    pub fn new() -> Self {
        CartLedger::default()
    }

    /// Current cart, as a defensive copy.
    ///
    /// Mutating the returned value does not affect the ledger.
    pub fn cart(&self) -> Cart {
        self.cart.clone()
    }

    /// Current cart total.
    pub fn total(&self) -> Decimal {
        self.cart.total
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.cart
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// If the product is already in the cart its quantity is increased;
    /// otherwise a new line is appended, preserving insertion order.
    /// Returns the updated cart.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::ProductNotFound`]: the product id is not in the catalog.
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let product = catalog.get(product_id).ok_or(CartError::ProductNotFound)?;

        if let Some(item) = self
            .cart
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.cart.items.push(CartItem {
                product_id: product_id.to_owned(),
                quantity,
                product: product.clone(),
            });
        }

        self.recalculate();

        Ok(self.cart())
    }

    /// Overwrite the quantity of an existing line.
    ///
    /// A missing line is a no-op, not an error. Quantity zero removes the
    /// line entirely. Returns the updated cart.
    pub fn update_item(&mut self, product_id: &str, quantity: u32) -> Cart {
        if let Some(pos) = self
            .cart
            .items
            .iter()
            .position(|item| item.product_id == product_id)
        {
            if quantity == 0 {
                self.cart.items.remove(pos);
            } else if let Some(item) = self.cart.items.get_mut(pos) {
                item.quantity = quantity;
            }

            self.recalculate();
        }

        self.cart()
    }

    /// Remove a line if present; no-op otherwise. Returns the updated cart.
    pub fn remove_item(&mut self, product_id: &str) -> Cart {
        self.cart.items.retain(|item| item.product_id != product_id);
        self.recalculate();

        self.cart()
    }

    /// Reset the cart to empty.
    pub fn clear(&mut self) {
        self.cart = Cart::default();
    }

    fn recalculate(&mut self) {
        self.cart.total = self.cart.items.iter().map(CartItem::line_total).sum();
    }
}
