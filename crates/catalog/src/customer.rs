//! A customer interested in new products.

use std::sync::{Arc, Mutex};

use storefront_events::{DeliveryError, Subscriber};

use crate::event::CatalogEvent;

/// Subscriber that collects the names of newly added products.
///
/// Clones share one inbox, so a clone can be handed to the catalog while the
/// original is kept to read notifications back.
#[derive(Debug, Clone)]
pub struct Customer {
    name: String,
    inbox: Arc<Mutex<Vec<String>>>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product names received so far, oldest first.
    pub fn notifications(&self) -> Vec<String> {
        match self.inbox.lock() {
            Ok(inbox) => inbox.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Subscriber<CatalogEvent> for Customer {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&mut self, message: &CatalogEvent) -> Result<(), DeliveryError> {
        let mut inbox = self
            .inbox
            .lock()
            .map_err(|_| DeliveryError::new("inbox lock poisoned"))?;
        inbox.push(message.product_name().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ProductAdded;
    use chrono::Utc;

    #[test]
    fn clones_share_the_inbox() {
        let alice = Customer::new("alice");
        let mut handle = alice.clone();

        handle
            .receive(&CatalogEvent::ProductAdded(ProductAdded {
                name: "Widget".to_string(),
                occurred_at: Utc::now(),
            }))
            .unwrap();

        assert_eq!(alice.notifications(), vec!["Widget".to_string()]);
        assert_eq!(Subscriber::<CatalogEvent>::name(&alice), "alice");
    }
}
