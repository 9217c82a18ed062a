//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and the
//! cart (no IO, no logging, no global state).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::{CartId, OrderId};
pub use quantity::Quantity;
