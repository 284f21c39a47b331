//! Tally
//!
//! Tally is an in-memory e-commerce transaction core: a single shared shopping
//! cart, an append-only order ledger with monotonic ids, and a milestone-driven
//! single-use discount-code programme.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod errors;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod report;
pub mod requests;
pub mod store;
