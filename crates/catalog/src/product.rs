use serde::{Deserialize, Serialize};

use storefront_core::{Entity, Quantity, StoreError, StoreResult};

use crate::pricing::PriceStrategy;

/// A purchasable product.
///
/// Identity is the name (unique within a catalog). The product carries no
/// quantity: how many units are being bought is per-cart-line state, so the
/// charged price is always derived on demand from a caller-supplied quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    description: String,
    base_price: f64,
    strategy: PriceStrategy,
}

impl Product {
    /// Build a validated product.
    ///
    /// The name must not be blank and the base price must be a finite,
    /// non-negative number.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_price: f64,
        strategy: PriceStrategy,
    ) -> StoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::validation("product name cannot be empty"));
        }
        if !base_price.is_finite() || base_price < 0.0 {
            return Err(StoreError::invalid_price(format!(
                "{name}: base price must be a non-negative number, got {base_price}"
            )));
        }

        Ok(Self {
            name,
            description: description.into(),
            base_price,
            strategy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn strategy(&self) -> PriceStrategy {
        self.strategy
    }

    /// Charged total for `quantity` units under this product's strategy.
    pub fn charged_price(&self, quantity: Quantity) -> f64 {
        self.strategy.compute(self.base_price, quantity)
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charged_price_uses_bound_strategy() {
        let widget = Product::new("Widget", "A widget", 10.0, PriceStrategy::Simple).unwrap();
        let gadget = Product::new("Gadget", "A gadget", 20.0, PriceStrategy::Discounted).unwrap();

        assert_eq!(widget.charged_price(Quantity::new(3).unwrap()), 30.0);
        assert!((gadget.charged_price(Quantity::new(2).unwrap()) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn identity_is_the_name() {
        let widget = Product::new("Widget", "", 1.0, PriceStrategy::Simple).unwrap();
        assert_eq!(widget.id(), "Widget");
    }

    #[test]
    fn rejects_blank_name() {
        let err = Product::new("   ", "x", 1.0, PriceStrategy::Simple).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn rejects_negative_or_non_finite_price() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let err = Product::new("Widget", "x", price, PriceStrategy::Simple).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPrice(_)), "price {price}");
        }
    }

    #[test]
    fn zero_price_is_allowed() {
        let freebie = Product::new("Sticker", "free", 0.0, PriceStrategy::Discounted).unwrap();
        assert_eq!(freebie.charged_price(Quantity::new(10).unwrap()), 0.0);
    }
}
