//! Positive item quantity.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A quantity of at least one unit.
///
/// Construction is the only validation point: once a `Quantity` exists it is
/// known to be positive, so pricing and cart code never re-check it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Validate a caller-supplied quantity.
    pub fn new(value: i64) -> StoreResult<Self> {
        if value < 1 {
            return Err(StoreError::InvalidQuantity(value));
        }
        let value = u32::try_from(value).map_err(|_| StoreError::InvalidQuantity(value))?;
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = StoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
