//! Request schemas
//!
//! Validated request bodies for the store's external collaborators. The wire
//! format is `camelCase` JSON; every schema checks field presence and ranges
//! before the core is invoked.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::errors::ErrorClass;

/// Rejections raised by request validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The product id is missing or the quantity is out of range.
    #[error("Invalid productId or quantity")]
    InvalidItem,

    /// The product id is missing.
    #[error("Product ID is required")]
    MissingProductId,

    /// The code is missing or the cart total is negative.
    #[error("Invalid discount code or cart total")]
    InvalidDiscountQuery,
}

impl RequestError {
    /// Caller-visible classification for this rejection.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::InvalidArgument
    }
}

/// Body of an add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    /// Id of the product to add
    pub product_id: String,

    /// Number of units to add; must be positive
    pub quantity: u32,
}

impl AddItemRequest {
    /// Check field presence and ranges.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidItem`]: empty product id or zero quantity.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.product_id.is_empty() || self.quantity == 0 {
            return Err(RequestError::InvalidItem);
        }

        Ok(())
    }
}

/// Body of an update-cart-item request. Quantity zero means removal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    /// Id of the product to update
    pub product_id: String,

    /// New quantity; zero removes the line
    pub quantity: u32,
}

impl UpdateItemRequest {
    /// Check field presence.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidItem`]: empty product id.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.product_id.is_empty() {
            return Err(RequestError::InvalidItem);
        }

        Ok(())
    }
}

/// Parameters of a remove-from-cart request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    /// Id of the product to remove
    pub product_id: String,
}

impl RemoveItemRequest {
    /// Check field presence.
    ///
    /// # Errors
    ///
    /// - [`RequestError::MissingProductId`]: empty product id.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.product_id.is_empty() {
            return Err(RequestError::MissingProductId);
        }

        Ok(())
    }
}

/// Body of a discount validation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDiscountRequest {
    /// Code to validate
    pub code: String,

    /// Current cart total; must be non-negative
    pub cart_total: Decimal,
}

impl ValidateDiscountRequest {
    /// Check field presence and ranges.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidDiscountQuery`]: empty code or negative total.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.code.is_empty() || self.cart_total < Decimal::ZERO {
            return Err(RequestError::InvalidDiscountQuery);
        }

        Ok(())
    }
}

/// Body of a checkout request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Discount code to apply, if any
    #[serde(default)]
    pub discount_code: Option<String>,
}

impl CheckoutRequest {
    /// The code to apply, treating an empty string as absent.
    pub fn discount_code(&self) -> Option<&str> {
        self.discount_code
            .as_deref()
            .filter(|code| !code.is_empty())
    }
}
