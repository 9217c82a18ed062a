use serde::{Deserialize, Serialize};

use storefront_cart::{CartView, OrderSummary};
use storefront_catalog::{PriceStrategy, Product};

/// Already-parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum StorefrontCommand {
    AddToCart {
        name: String,
        quantity: i64,
    },
    ViewCart,
    RemoveFromCart {
        name: String,
    },
    ClearCart,
    ListProducts,
    FinalizeOrder {
        shipping_address: String,
        phone: String,
        payment_method: String,
    },
    Exit,
}

impl StorefrontCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StorefrontCommand::AddToCart { .. } => "add-to-cart",
            StorefrontCommand::ViewCart => "view-cart",
            StorefrontCommand::RemoveFromCart { .. } => "remove-from-cart",
            StorefrontCommand::ClearCart => "clear-cart",
            StorefrontCommand::ListProducts => "list-products",
            StorefrontCommand::FinalizeOrder { .. } => "finalize-order",
            StorefrontCommand::Exit => "exit",
        }
    }
}

/// Catalog entry as shown to a shopper: base price only, never a charged total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub strategy: PriceStrategy,
}

impl From<&Product> for ProductListing {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name().to_string(),
            description: product.description().to_string(),
            base_price: product.base_price(),
            strategy: product.strategy(),
        }
    }
}

/// Structured result of a successful command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "kebab-case")]
pub enum Outcome {
    /// Cart after an add/remove/clear.
    CartUpdated(CartView),
    /// Cart as requested by view-cart.
    Cart(CartView),
    Products(Vec<ProductListing>),
    OrderPlaced(OrderSummary),
    Exit,
}
