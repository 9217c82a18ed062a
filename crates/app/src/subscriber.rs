use storefront_catalog::CatalogEvent;
use storefront_events::{DeliveryError, Event, Subscriber};

/// Logs every catalog broadcast as a structured `tracing` event.
#[derive(Debug, Default, Clone)]
pub struct TracingSubscriber {
    received: u64,
}

impl TracingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> u64 {
        self.received
    }
}

impl Subscriber<CatalogEvent> for TracingSubscriber {
    fn name(&self) -> &str {
        "tracing"
    }

    fn receive(&mut self, message: &CatalogEvent) -> Result<(), DeliveryError> {
        self.received += 1;
        tracing::info!(
            event_type = message.event_type(),
            product = message.product_name(),
            occurred_at = %message.occurred_at(),
            "catalog changed"
        );
        Ok(())
    }
}
