use std::sync::Arc;

use chrono::Utc;

use storefront_core::{StoreError, StoreResult};
use storefront_events::{NotificationChannel, Subscriber, SubscriptionId};

use crate::event::{CatalogEvent, ProductAdded};
use crate::pricing::PriceStrategy;
use crate::product::Product;

/// Append-only, name-unique, insertion-ordered set of products.
///
/// Products are handed out as `Arc<Product>` so cart lines can reference them
/// without copying. Every successful `add_product` broadcasts one
/// [`CatalogEvent::ProductAdded`] to the catalog's subscribers.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    channel: NotificationChannel<CatalogEvent>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product and notify subscribers.
    ///
    /// Fails with `DuplicateProduct` (catalog unchanged, nobody notified) if the
    /// name is taken. If a subscriber fails, the product has already been added
    /// and the delivery error is returned.
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        base_price: f64,
        strategy: PriceStrategy,
    ) -> StoreResult<Arc<Product>> {
        let product = Product::new(name, description, base_price, strategy)?;
        if self.contains(product.name()) {
            return Err(StoreError::duplicate_product(product.name()));
        }

        let product = Arc::new(product);
        self.products.push(Arc::clone(&product));

        let event = CatalogEvent::ProductAdded(ProductAdded {
            name: product.name().to_string(),
            occurred_at: Utc::now(),
        });
        self.channel.broadcast(&event)?;

        Ok(product)
    }

    /// Case-sensitive exact lookup.
    pub fn find_by_name(&self, name: &str) -> StoreResult<Arc<Product>> {
        self.products
            .iter()
            .find(|p| p.name() == name)
            .cloned()
            .ok_or_else(|| StoreError::product_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name() == name)
    }

    /// Snapshot of every product, in insertion order.
    pub fn list_all(&self) -> Vec<Arc<Product>> {
        self.products.clone()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber<CatalogEvent>>) -> SubscriptionId {
        self.channel.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.channel.len()
    }
}
