//! Storefront error model.

use thiserror::Error;

/// Result type used across the storefront domain.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storefront domain error.
///
/// Every variant is an expected, recoverable business state. The domain never
/// logs or prints these; callers decide how to present them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// A product with this name is already in the catalog.
    #[error("product already exists: {0}")]
    DuplicateProduct(String),

    /// No product with this name is in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Quantities must be at least 1.
    #[error("invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(i64),

    /// Finalize was attempted on a cart without lines.
    #[error("cart is empty")]
    EmptyCart,

    /// A base price was negative or not a finite number.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// A value failed validation (e.g. a blank name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A subscriber failed while receiving a broadcast; later subscribers were skipped.
    #[error("delivery to subscriber `{subscriber}` failed: {reason}")]
    Delivery { subscriber: String, reason: String },
}

impl StoreError {
    pub fn duplicate_product(name: impl Into<String>) -> Self {
        Self::DuplicateProduct(name.into())
    }

    pub fn product_not_found(name: impl Into<String>) -> Self {
        Self::ProductNotFound(name.into())
    }

    pub fn invalid_price(msg: impl Into<String>) -> Self {
        Self::InvalidPrice(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn delivery(subscriber: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delivery {
            subscriber: subscriber.into(),
            reason: reason.into(),
        }
    }

    /// Short, stable discriminant for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::DuplicateProduct(_) => "duplicate_product",
            StoreError::ProductNotFound(_) => "product_not_found",
            StoreError::InvalidQuantity(_) => "invalid_quantity",
            StoreError::EmptyCart => "empty_cart",
            StoreError::InvalidPrice(_) => "invalid_price",
            StoreError::Validation(_) => "validation",
            StoreError::Delivery { .. } => "delivery",
        }
    }
}
