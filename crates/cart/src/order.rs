use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{OrderId, StoreError, StoreResult};

use crate::line::LineSnapshot;

/// Where and how a finalized order is shipped and paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    shipping_address: String,
    phone: String,
    payment_method: String,
}

impl Checkout {
    /// All three fields are required (non-blank).
    pub fn new(
        shipping_address: impl Into<String>,
        phone: impl Into<String>,
        payment_method: impl Into<String>,
    ) -> StoreResult<Self> {
        let checkout = Self {
            shipping_address: shipping_address.into(),
            phone: phone.into(),
            payment_method: payment_method.into(),
        };

        for (field, value) in [
            ("shipping address", &checkout.shipping_address),
            ("phone", &checkout.phone),
            ("payment method", &checkout.payment_method),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::validation(format!("{field} cannot be empty")));
            }
        }

        Ok(checkout)
    }

    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }
}

/// Immutable record of a finalized cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub checkout: Checkout,
    pub lines: Vec<LineSnapshot>,
    pub total: f64,
    pub placed_at: DateTime<Utc>,
}

/// Hand-off point for finalized orders (payment, shipping, ...).
pub trait OrderSink: Send {
    fn submit(&mut self, order: &OrderSummary) -> StoreResult<()>;
}

/// Accepts every order and does nothing with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOrderSink;

impl OrderSink for NoopOrderSink {
    fn submit(&mut self, _order: &OrderSummary) -> StoreResult<()> {
        Ok(())
    }
}
