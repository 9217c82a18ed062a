//! Shopping cart domain module.
//!
//! The cart is an aggregate: commands are decided by `handle` into events and
//! applied by `apply`. All logic is deterministic and in-memory; finalizing
//! produces an [`OrderSummary`] and empties the cart in one step.

pub mod cart;
pub mod line;
pub mod order;

pub use cart::{
    AddLine, Cart, CartCleared, CartCommand, CartEvent, CartView, ClearCart, FinalizeOrder,
    LineAdded, LineQuantityChanged, LineRemoved, OrderFinalized, RemoveLine,
};
pub use line::{CartLine, LineSnapshot};
pub use order::{Checkout, NoopOrderSink, OrderSink, OrderSummary};
