use std::sync::Arc;

use serde::{Deserialize, Serialize};

use storefront_catalog::{PriceStrategy, Product};
use storefront_core::Quantity;

/// One product-with-quantity entry inside a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Arc<Product>,
    quantity: Quantity,
}

impl CartLine {
    pub fn new(product: Arc<Product>, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn product_name(&self) -> &str {
        self.product.name()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Charged price for this line under the product's strategy.
    pub fn charged_price(&self) -> f64 {
        self.product.charged_price(self.quantity)
    }

    /// Frozen copy of the line, detached from the product reference.
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            product_name: self.product.name().to_string(),
            unit_price: self.product.base_price(),
            strategy: self.product.strategy(),
            quantity: self.quantity,
            charged: self.charged_price(),
        }
    }
}

/// Immutable view of a cart line at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub product_name: String,
    pub unit_price: f64,
    pub strategy: PriceStrategy,
    pub quantity: Quantity,
    pub charged: f64,
}
