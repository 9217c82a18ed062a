use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_events::Event;

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Catalog changes broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductAdded(ProductAdded),
}

impl CatalogEvent {
    /// Name of the product the event is about.
    pub fn product_name(&self) -> &str {
        match self {
            CatalogEvent::ProductAdded(e) => &e.name,
        }
    }
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductAdded(_) => "catalog.product.added",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductAdded(e) => e.occurred_at,
        }
    }
}
