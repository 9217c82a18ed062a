//! Catalog seeding configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use storefront_catalog::PriceStrategy;

/// Environment variable naming a JSON catalog seed file.
pub const CATALOG_ENV: &str = "STOREFRONT_CATALOG";

/// One product to add to the catalog at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: f64,
    #[serde(default)]
    pub strategy: PriceStrategy,
}

impl ProductSeed {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_price: f64,
        strategy: PriceStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base_price,
            strategy,
        }
    }
}

/// Session configuration.
///
/// JSON shape:
///
/// ```json
/// { "products": [ { "name": "Widget", "description": "...", "base_price": 10.0, "strategy": "simple" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

impl StorefrontConfig {
    /// Built-in catalog used when nothing else is configured.
    pub fn sample() -> Self {
        Self {
            products: vec![
                ProductSeed::new("Laptop", "14-inch ultrabook", 999.99, PriceStrategy::Simple),
                ProductSeed::new(
                    "Headphones",
                    "Noise-cancelling over-ear headphones",
                    149.50,
                    PriceStrategy::Discounted,
                ),
                ProductSeed::new("Coffee Mug", "Ceramic, 350 ml", 12.00, PriceStrategy::Simple),
                ProductSeed::new(
                    "Backpack",
                    "Water-resistant daypack",
                    59.90,
                    PriceStrategy::Discounted,
                ),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid storefront config JSON")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read storefront config {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse storefront config {}", path.display()))
    }

    /// Load from the file named by `STOREFRONT_CATALOG`, or fall back to [`sample`](Self::sample).
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(CATALOG_ENV).ok().map(PathBuf::from))
    }

    pub(crate) fn resolve(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            tracing::debug!("{CATALOG_ENV} not set; using sample catalog");
            return Self::sample();
        };

        Self::from_path(&path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %format!("{e:#}"),
                "could not load catalog config; using sample catalog"
            );
            Self::sample()
        })
    }
}
