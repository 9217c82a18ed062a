//! Domain events and the synchronous notification channel.

pub mod channel;
pub mod event;
pub mod handler;

pub use channel::{DeliveryError, NotificationChannel, Subscriber, SubscriptionId};
pub use event::Event;
pub use handler::execute;
