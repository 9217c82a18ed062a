//! Storefront session: wiring of catalog, cart and order hand-off.
//!
//! A driver (menu loop, HTTP handler, test) parses user input into a
//! [`StorefrontCommand`] and calls [`Storefront::execute`]; results come back
//! as structured [`Outcome`] values or a `StoreError`. Nothing here reads
//! input or renders output.

pub mod command;
pub mod config;
pub mod session;
pub mod subscriber;

pub use command::{Outcome, ProductListing, StorefrontCommand};
pub use config::{ProductSeed, StorefrontConfig};
pub use session::Storefront;
pub use subscriber::TracingSubscriber;

pub use storefront_core::{StoreError, StoreResult};

/// Initialize logging and build a session from the environment's catalog config.
pub fn bootstrap() -> StoreResult<Storefront> {
    storefront_observability::init();
    let config = StorefrontConfig::from_env();
    let mut storefront = Storefront::from_config(&config)?;
    storefront.subscribe(Box::new(TracingSubscriber::new()));
    Ok(storefront)
}
