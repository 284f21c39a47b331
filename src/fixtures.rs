//! Fixtures

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, Product},
    errors::ErrorClass,
};

/// Catalog fixture parsing errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the fixture file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product carried a negative price
    #[error("Invalid price for product {0}: {1}")]
    InvalidPrice(String, Decimal),
}

impl CatalogError {
    /// Caller-visible classification for this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            CatalogError::Io(_) | CatalogError::Yaml(_) => ErrorClass::Unexpected,
            CatalogError::InvalidPrice(..) => ErrorClass::InvalidArgument,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<Product>,
}

/// Load a catalog from a YAML fixture file.
///
/// # Errors
///
/// - [`CatalogError::Io`]: the file could not be read.
/// - [`CatalogError::Yaml`]: the file is not a valid products fixture.
/// - [`CatalogError::InvalidPrice`]: a product carried a negative price.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path)?;
    let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

    for product in &fixture.products {
        if product.price < Decimal::ZERO {
            return Err(CatalogError::InvalidPrice(
                product.id.clone(),
                product.price,
            ));
        }
    }

    Ok(Catalog::new(fixture.products))
}

/// The demo catalog used by the examples and integration tests.
pub fn demo_catalog() -> Catalog {
    Catalog::new([
        product(
            "1",
            "Wireless Headphones",
            Decimal::new(9999, 2),
            "High-quality wireless headphones",
        ),
        product(
            "2",
            "Smart Watch",
            Decimal::new(19999, 2),
            "Feature-rich smartwatch",
        ),
        product(
            "3",
            "Laptop Stand",
            Decimal::new(4999, 2),
            "Ergonomic laptop stand",
        ),
        product(
            "4",
            "USB-C Cable",
            Decimal::new(1999, 2),
            "Fast charging USB-C cable",
        ),
        product(
            "5",
            "Bluetooth Speaker",
            Decimal::new(7999, 2),
            "Portable bluetooth speaker",
        ),
        product(
            "6",
            "Phone Case",
            Decimal::new(2999, 2),
            "Protective phone case",
        ),
    ])
}

fn product(id: &str, name: &str, price: Decimal, description: &str) -> Product {
    Product {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
        description: description.to_owned(),
    }
}
