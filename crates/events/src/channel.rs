//! Synchronous subscribe/notify channel.
//!
//! The channel fans a message out to every current subscriber, in the order they
//! subscribed, before `broadcast` returns:
//!
//! - **Synchronous**: no queues, no threads; delivery happens inside `broadcast`
//! - **Ordered**: subscribers are called in subscription order
//! - **Unisolated**: the first failing subscriber stops the broadcast and its error
//!   is returned; subscribers after it do not see the message
//! - **No persistence**: late subscribers never see earlier broadcasts
//!
//! ```ignore
//! let mut channel = NotificationChannel::new();
//! let id = channel.subscribe(Box::new(inbox));
//! channel.broadcast(&event)?;
//! channel.unsubscribe(id);
//! ```

use thiserror::Error;

use storefront_core::{StoreError, StoreResult};

/// Failure reported by a subscriber while handling a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DeliveryError(String);

impl DeliveryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Something interested in messages of type `M`.
pub trait Subscriber<M>: Send {
    /// Label used in diagnostics and delivery errors.
    fn name(&self) -> &str;

    /// Handle one message.
    fn receive(&mut self, message: &M) -> Result<(), DeliveryError>;
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Insertion-ordered set of subscribers.
pub struct NotificationChannel<M> {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber<M>>)>,
    next_id: u64,
}

impl<M> NotificationChannel<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; it receives every later broadcast.
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber<M>>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns `false` if the handle was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver `message` to every subscriber in subscription order.
    ///
    /// Returns the number of deliveries. Stops at the first failure.
    pub fn broadcast(&mut self, message: &M) -> StoreResult<usize> {
        let mut delivered = 0;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber
                .receive(message)
                .map_err(|e| StoreError::delivery(subscriber.name(), e.reason()))?;
            delivered += 1;
        }
        Ok(delivered)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Subscriber names in delivery order.
    pub fn subscriber_names(&self) -> Vec<&str> {
        self.subscribers.iter().map(|(_, s)| s.name()).collect()
    }
}

impl<M> Default for NotificationChannel<M> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<M> core::fmt::Debug for NotificationChannel<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("subscribers", &self.subscriber_names())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<(String, u32)>>>;

    struct Recorder {
        name: String,
        log: Log,
        fail_on: Option<u32>,
    }

    impl Recorder {
        fn boxed(name: &str, log: &Log) -> Box<dyn Subscriber<u32>> {
            Box::new(Self {
                name: name.to_string(),
                log: Arc::clone(log),
                fail_on: None,
            })
        }

        fn failing(name: &str, log: &Log, fail_on: u32) -> Box<dyn Subscriber<u32>> {
            Box::new(Self {
                name: name.to_string(),
                log: Arc::clone(log),
                fail_on: Some(fail_on),
            })
        }
    }

    impl Subscriber<u32> for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn receive(&mut self, message: &u32) -> Result<(), DeliveryError> {
            if self.fail_on == Some(*message) {
                return Err(DeliveryError::new("rejected"));
            }
            self.log.lock().unwrap().push((self.name.clone(), *message));
            Ok(())
        }
    }

    fn entries(log: &Log) -> Vec<(String, u32)> {
        log.lock().unwrap().clone()
    }

    fn entry(name: &str, message: u32) -> (String, u32) {
        (name.to_string(), message)
    }

    #[test]
    fn broadcast_reaches_subscribers_in_subscription_order() {
        let log = Log::default();
        let mut channel = NotificationChannel::new();
        channel.subscribe(Recorder::boxed("a", &log));
        channel.subscribe(Recorder::boxed("b", &log));
        channel.subscribe(Recorder::boxed("c", &log));

        assert_eq!(channel.broadcast(&7).unwrap(), 3);
        assert_eq!(
            entries(&log),
            vec![entry("a", 7), entry("b", 7), entry("c", 7)]
        );
    }

    #[test]
    fn broadcast_without_subscribers_delivers_nothing() {
        let mut channel: NotificationChannel<u32> = NotificationChannel::new();
        assert!(channel.is_empty());
        assert_eq!(channel.broadcast(&1).unwrap(), 0);
    }

    #[test]
    fn unsubscribed_handle_stops_receiving() {
        let log = Log::default();
        let mut channel = NotificationChannel::new();
        let a = channel.subscribe(Recorder::boxed("a", &log));
        channel.subscribe(Recorder::boxed("b", &log));

        assert!(channel.unsubscribe(a));
        assert!(!channel.unsubscribe(a));
        channel.broadcast(&1).unwrap();

        assert_eq!(entries(&log), vec![entry("b", 1)]);
        assert_eq!(channel.subscriber_names(), vec!["b"]);
    }

    #[test]
    fn failing_subscriber_aborts_remaining_deliveries() {
        let log = Log::default();
        let mut channel = NotificationChannel::new();
        channel.subscribe(Recorder::boxed("first", &log));
        channel.subscribe(Recorder::failing("broken", &log, 5));
        channel.subscribe(Recorder::boxed("last", &log));

        let err = channel.broadcast(&5).unwrap_err();
        assert_eq!(err, StoreError::delivery("broken", "rejected"));
        assert_eq!(entries(&log), vec![entry("first", 5)]);

        // Other messages still flow to everyone.
        assert_eq!(channel.broadcast(&6).unwrap(), 3);
    }

    #[test]
    fn late_subscribers_do_not_see_earlier_broadcasts() {
        let log = Log::default();
        let mut channel = NotificationChannel::new();
        channel.broadcast(&1).unwrap();
        channel.subscribe(Recorder::boxed("late", &log));
        channel.broadcast(&2).unwrap();

        assert_eq!(entries(&log), vec![entry("late", 2)]);
    }

    #[test]
    fn subscription_ids_are_unique_and_increasing() {
        let log = Log::default();
        let mut channel = NotificationChannel::new();
        let a = channel.subscribe(Recorder::boxed("a", &log));
        channel.unsubscribe(a);
        let b = channel.subscribe(Recorder::boxed("b", &log));
        assert!(b > a);
        assert_eq!(b.to_string(), format!("sub-{}", b.get()));
    }
}
