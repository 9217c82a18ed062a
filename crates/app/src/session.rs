use std::sync::Arc;

use storefront_cart::{Cart, Checkout, NoopOrderSink, OrderSink, OrderSummary};
use storefront_catalog::{Catalog, CatalogEvent, PriceStrategy, Product};
use storefront_core::{CartId, StoreError, StoreResult};
use storefront_events::{Subscriber, SubscriptionId};

use crate::command::{Outcome, ProductListing, StorefrontCommand};
use crate::config::StorefrontConfig;

/// One shopping session: exactly one catalog, one cart and one order sink.
///
/// The session is passed around explicitly by its driver; there is no global
/// cart.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    sink: Box<dyn OrderSink>,
}

impl Storefront {
    /// Empty catalog, empty cart, orders go nowhere.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            cart: Cart::new(CartId::new()),
            sink: Box::new(NoopOrderSink),
        }
    }

    /// Seed the catalog from `config`, in order.
    pub fn from_config(config: &StorefrontConfig) -> StoreResult<Self> {
        let mut storefront = Self::new();
        for seed in &config.products {
            storefront.add_product(
                seed.name.clone(),
                seed.description.clone(),
                seed.base_price,
                seed.strategy,
            )?;
        }
        tracing::info!(products = storefront.catalog.len(), "catalog seeded");
        Ok(storefront)
    }

    pub fn with_order_sink(mut self, sink: Box<dyn OrderSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber<CatalogEvent>>) -> SubscriptionId {
        let id = self.catalog.subscribe(subscriber);
        tracing::debug!(subscription = %id, "catalog subscriber added");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.catalog.unsubscribe(id)
    }

    /// Add a product to the catalog (subscribers are notified).
    ///
    /// A failing subscriber yields `Delivery`, but the product is already in
    /// the catalog at that point; adding it again reports `DuplicateProduct`.
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        base_price: f64,
        strategy: PriceStrategy,
    ) -> StoreResult<Arc<Product>> {
        let product = self
            .catalog
            .add_product(name, description, base_price, strategy)
            .inspect_err(|e| tracing::warn!(error = %e, kind = e.kind(), "add product failed"))?;
        tracing::debug!(
            product = product.name(),
            base_price = product.base_price(),
            strategy = %product.strategy(),
            "product added"
        );
        Ok(product)
    }

    /// Run one driver command against the session.
    pub fn execute(&mut self, command: StorefrontCommand) -> StoreResult<Outcome> {
        let name = command.name();
        tracing::debug!(command = name, "executing command");

        let result = self.dispatch(command);
        match &result {
            Ok(_) => tracing::debug!(
                command = name,
                lines = self.cart.len(),
                total = self.cart.total(),
                "command completed"
            ),
            Err(e) => tracing::warn!(command = name, error = %e, kind = e.kind(), "command rejected"),
        }
        result
    }

    fn dispatch(&mut self, command: StorefrontCommand) -> StoreResult<Outcome> {
        match command {
            StorefrontCommand::AddToCart { name, quantity } => {
                let product = self.catalog.find_by_name(&name)?;
                self.cart.add_line(product, quantity)?;
                Ok(Outcome::CartUpdated(self.cart.view_total()))
            }
            StorefrontCommand::ViewCart => Ok(Outcome::Cart(self.cart.view_total())),
            StorefrontCommand::RemoveFromCart { name } => {
                let product = self.catalog.find_by_name(&name)?;
                self.cart.remove_line(product.name())?;
                Ok(Outcome::CartUpdated(self.cart.view_total()))
            }
            StorefrontCommand::ClearCart => {
                self.cart.clear()?;
                Ok(Outcome::CartUpdated(self.cart.view_total()))
            }
            StorefrontCommand::ListProducts => Ok(Outcome::Products(self.list_products())),
            StorefrontCommand::FinalizeOrder {
                shipping_address,
                phone,
                payment_method,
            } => {
                // An empty cart is reported before the checkout details are looked at.
                if self.cart.is_empty() {
                    return Err(StoreError::EmptyCart);
                }
                let checkout = Checkout::new(shipping_address, phone, payment_method)?;
                Ok(Outcome::OrderPlaced(self.finalize(checkout)?))
            }
            StorefrontCommand::Exit => Ok(Outcome::Exit),
        }
    }

    pub fn list_products(&self) -> Vec<ProductListing> {
        self.catalog
            .list_all()
            .iter()
            .map(|p| ProductListing::from(p.as_ref()))
            .collect()
    }

    /// The cart is only reset once the sink has taken the order.
    fn finalize(&mut self, checkout: Checkout) -> StoreResult<OrderSummary> {
        let sink = &mut self.sink;
        let summary = self.cart.finalize_with(checkout, |order| {
            sink.submit(order).inspect_err(|e| {
                tracing::error!(order_id = %order.order_id, error = %e, "order sink rejected order")
            })
        })?;
        tracing::info!(
            order_id = %summary.order_id,
            lines = summary.lines.len(),
            total = summary.total,
            "order finalized"
        );
        Ok(summary)
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use storefront_events::DeliveryError;

    fn add(name: &str, quantity: i64) -> StorefrontCommand {
        StorefrontCommand::AddToCart {
            name: name.to_string(),
            quantity,
        }
    }

    fn storefront() -> Storefront {
        let mut storefront = Storefront::new();
        storefront
            .add_product("Widget", "A widget", 10.0, PriceStrategy::Simple)
            .unwrap();
        storefront
            .add_product("Gadget", "A gadget", 20.0, PriceStrategy::Discounted)
            .unwrap();
        storefront
    }

    #[derive(Clone, Default)]
    struct CapturingSink {
        orders: Arc<Mutex<Vec<OrderSummary>>>,
    }

    impl OrderSink for CapturingSink {
        fn submit(&mut self, order: &OrderSummary) -> StoreResult<()> {
            self.orders.lock().unwrap().push(order.clone());
            Ok(())
        }
    }

    #[test]
    fn unknown_product_is_not_found() {
        let mut storefront = storefront();
        assert_eq!(
            storefront.execute(add("Gizmo", 1)).unwrap_err(),
            StoreError::product_not_found("Gizmo")
        );
        assert_eq!(
            storefront
                .execute(StorefrontCommand::RemoveFromCart { name: "Gizmo".into() })
                .unwrap_err(),
            StoreError::product_not_found("Gizmo")
        );
    }

    #[test]
    fn removing_known_product_not_in_cart_is_a_no_op() {
        let mut storefront = storefront();
        storefront.execute(add("Widget", 2)).unwrap();

        let outcome = storefront
            .execute(StorefrontCommand::RemoveFromCart { name: "Gadget".into() })
            .unwrap();

        match outcome {
            Outcome::CartUpdated(view) => {
                assert_eq!(view.lines.len(), 1);
                assert_eq!(view.total, 20.0);
            }
            other => panic!("Expected CartUpdated, got {other:?}"),
        }
    }

    #[test]
    fn list_products_exposes_base_prices_only() {
        let mut storefront = storefront();
        storefront.execute(add("Gadget", 5)).unwrap();

        match storefront.execute(StorefrontCommand::ListProducts).unwrap() {
            Outcome::Products(listing) => {
                assert_eq!(listing.len(), 2);
                assert_eq!(listing[1].name, "Gadget");
                assert_eq!(listing[1].base_price, 20.0);
                assert_eq!(listing[1].strategy, PriceStrategy::Discounted);
            }
            other => panic!("Expected Products, got {other:?}"),
        }
    }

    #[test]
    fn finalize_hands_order_to_sink() {
        let sink = CapturingSink::default();
        let mut storefront = storefront().with_order_sink(Box::new(sink.clone()));
        storefront.execute(add("Widget", 1)).unwrap();

        let outcome = storefront
            .execute(StorefrontCommand::FinalizeOrder {
                shipping_address: "1 Main St".into(),
                phone: "555-0100".into(),
                payment_method: "cash".into(),
            })
            .unwrap();

        let Outcome::OrderPlaced(summary) = outcome else {
            panic!("Expected OrderPlaced");
        };
        assert_eq!(sink.orders.lock().unwrap().as_slice(), &[summary]);
        assert!(storefront.cart().is_empty());
    }

    struct FailingSink;

    impl OrderSink for FailingSink {
        fn submit(&mut self, _order: &OrderSummary) -> StoreResult<()> {
            Err(StoreError::validation("backend down"))
        }
    }

    struct Grumpy;

    impl Subscriber<CatalogEvent> for Grumpy {
        fn name(&self) -> &str {
            "grumpy"
        }

        fn receive(&mut self, _message: &CatalogEvent) -> Result<(), DeliveryError> {
            Err(DeliveryError::new("not interested"))
        }
    }

    fn checkout_command() -> StorefrontCommand {
        StorefrontCommand::FinalizeOrder {
            shipping_address: "1 Main St".into(),
            phone: "555-0100".into(),
            payment_method: "card".into(),
        }
    }

    #[test]
    fn rejected_order_keeps_the_cart_for_a_retry() {
        let mut storefront = storefront().with_order_sink(Box::new(FailingSink));
        storefront.execute(add("Widget", 3)).unwrap();

        let err = storefront.execute(checkout_command()).unwrap_err();
        assert_eq!(err, StoreError::validation("backend down"));
        assert_eq!(storefront.cart().len(), 1);
        assert_eq!(storefront.cart().total(), 30.0);

        let sink = CapturingSink::default();
        let mut storefront = storefront.with_order_sink(Box::new(sink.clone()));
        let Outcome::OrderPlaced(summary) = storefront.execute(checkout_command()).unwrap() else {
            panic!("Expected OrderPlaced");
        };
        assert_eq!(summary.total, 30.0);
        assert_eq!(sink.orders.lock().unwrap().len(), 1);
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn empty_cart_is_reported_before_checkout_details() {
        let mut storefront = storefront();
        let err = storefront
            .execute(StorefrontCommand::FinalizeOrder {
                shipping_address: "".into(),
                phone: " ".into(),
                payment_method: "".into(),
            })
            .unwrap_err();
        assert_eq!(err, StoreError::EmptyCart);
    }

    #[test]
    fn product_survives_a_failing_subscriber() {
        let mut storefront = Storefront::new();
        storefront.subscribe(Box::new(Grumpy));

        let err = storefront
            .add_product("Widget", "A widget", 10.0, PriceStrategy::Simple)
            .unwrap_err();
        assert_eq!(err, StoreError::delivery("grumpy", "not interested"));
        assert!(storefront.catalog().contains("Widget"));

        let err = storefront
            .add_product("Widget", "A widget", 10.0, PriceStrategy::Simple)
            .unwrap_err();
        assert_eq!(err, StoreError::duplicate_product("Widget"));
    }

    #[test]
    fn blank_checkout_field_keeps_the_cart() {
        let mut storefront = storefront();
        storefront.execute(add("Widget", 1)).unwrap();

        let err = storefront
            .execute(StorefrontCommand::FinalizeOrder {
                shipping_address: "1 Main St".into(),
                phone: " ".into(),
                payment_method: "card".into(),
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(storefront.cart().len(), 1);
    }

    #[test]
    fn empty_cart_cannot_be_finalized() {
        let mut storefront = storefront();
        let err = storefront
            .execute(StorefrontCommand::FinalizeOrder {
                shipping_address: "1 Main St".into(),
                phone: "555-0100".into(),
                payment_method: "card".into(),
            })
            .unwrap_err();
        assert_eq!(err, StoreError::EmptyCart);
    }

    #[test]
    fn exit_changes_nothing() {
        let mut storefront = storefront();
        storefront.execute(add("Widget", 1)).unwrap();
        assert_eq!(storefront.execute(StorefrontCommand::Exit).unwrap(), Outcome::Exit);
        assert_eq!(storefront.cart().len(), 1);
    }

    #[test]
    fn from_config_rejects_duplicate_seed_names() {
        let mut config = StorefrontConfig::sample();
        config.products.push(config.products[0].clone());
        let err = Storefront::from_config(&config).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateProduct(_)));
    }
}
