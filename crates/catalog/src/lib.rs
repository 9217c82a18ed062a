//! Product catalog with per-product price computation.
//!
//! This crate contains the catalog rules, implemented purely as deterministic
//! domain logic (no IO, no logging, no storage). Adding a product notifies the
//! catalog's subscribers synchronously.

pub mod catalog;
pub mod customer;
pub mod event;
pub mod pricing;
pub mod product;

pub use catalog::Catalog;
pub use customer::Customer;
pub use event::{CatalogEvent, ProductAdded};
pub use pricing::{DISCOUNT_FACTOR, PriceStrategy};
pub use product::Product;
