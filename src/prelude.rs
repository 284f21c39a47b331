//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem, CartLedger},
    catalog::{Catalog, Product},
    checkout::{CheckoutError, CheckoutSummary},
    discounts::{
        DiscountCode, DiscountError, DiscountLedger, DiscountPolicy, DiscountQuote,
        DiscountRejection,
    },
    errors::ErrorClass,
    fixtures::{CatalogError, demo_catalog, load_catalog},
    orders::{Order, OrderDraft, OrderLedger},
    report::{ReportError, StatsReport},
    requests::{
        AddItemRequest, CheckoutRequest, RemoveItemRequest, RequestError, UpdateItemRequest,
        ValidateDiscountRequest,
    },
    store::{Store, StoreStats},
};
