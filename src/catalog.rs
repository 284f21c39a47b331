//! Catalog

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Unit price; never negative
    pub price: Decimal,

    /// Product description
    pub description: String,
}

/// Read-only product lookup.
///
/// The product list is fixed at construction; absence is represented as
/// `None`, never an error.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Create a catalog from a fixed product list, preserving order.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        let products = products.into();

        let index = products
            .iter()
            .enumerate()
            .map(|(slot, product)| (product.id.clone(), slot))
            .collect();

        Catalog { products, index }
    }

    /// All products, in their original order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&slot| self.products.get(slot))
    }

    /// Check whether a product id is in the catalog.
    pub fn exists(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
