use serde::{Deserialize, Serialize};

use storefront_core::{Quantity, StoreResult};

/// Multiplier applied by [`PriceStrategy::Discounted`] (a fixed 10% reduction).
pub const DISCOUNT_FACTOR: f64 = 0.9;

/// How a product's charged total is derived from its base price.
///
/// Bound to a product when it is created and never changed afterwards.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceStrategy {
    /// `base_price * quantity`
    #[default]
    Simple,
    /// `base_price * quantity * DISCOUNT_FACTOR`
    Discounted,
}

impl PriceStrategy {
    /// Charged total for `quantity` units at `base_price` each.
    pub fn compute(self, base_price: f64, quantity: Quantity) -> f64 {
        let gross = base_price * f64::from(quantity.get());
        match self {
            PriceStrategy::Simple => gross,
            PriceStrategy::Discounted => gross * DISCOUNT_FACTOR,
        }
    }

    /// Like [`compute`](Self::compute), for a quantity that has not been validated yet.
    pub fn compute_checked(self, base_price: f64, quantity: i64) -> StoreResult<f64> {
        Ok(self.compute(base_price, Quantity::new(quantity)?))
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceStrategy::Simple => "simple",
            PriceStrategy::Discounted => "discounted",
        }
    }
}

impl core::fmt::Display for PriceStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
