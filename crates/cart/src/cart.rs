use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Aggregate, AggregateRoot, CartId, OrderId, Quantity, StoreError, StoreResult};
use storefront_events::{Event, execute};

use crate::line::{CartLine, LineSnapshot};
use crate::order::{Checkout, OrderSummary};

/// Lines plus grand total, as returned by [`Cart::view_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<LineSnapshot>,
    pub total: f64,
}

/// Aggregate root: Cart.
///
/// Holds at most one line per product name, in insertion order. The cart is
/// always open for changes: finalizing snapshots the lines into an
/// [`OrderSummary`] and leaves an empty cart behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    id: CartId,
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line_for(&self, product_name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_name() == product_name)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line's charged price (zero for an empty cart).
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::charged_price).sum()
    }

    /// Snapshot of the lines and the grand total.
    pub fn view_total(&self) -> CartView {
        CartView {
            lines: self.lines.iter().map(CartLine::snapshot).collect(),
            total: self.total(),
        }
    }

    /// Put `quantity` units of `product` in the cart.
    ///
    /// If the product already has a line, its quantity is replaced (not added to).
    pub fn add_line(&mut self, product: Arc<Product>, quantity: i64) -> StoreResult<()> {
        let cmd = CartCommand::AddLine(AddLine {
            cart_id: self.id,
            product,
            quantity,
            occurred_at: Utc::now(),
        });
        execute(self, &cmd)?;
        Ok(())
    }

    /// Drop the line for `product_name`. Returns `false` if there was none.
    pub fn remove_line(&mut self, product_name: &str) -> StoreResult<bool> {
        let cmd = CartCommand::RemoveLine(RemoveLine {
            cart_id: self.id,
            product_name: product_name.to_string(),
            occurred_at: Utc::now(),
        });
        Ok(!execute(self, &cmd)?.is_empty())
    }

    /// Empty the cart. Returns how many lines were removed.
    pub fn clear(&mut self) -> StoreResult<usize> {
        let removed = self.lines.len();
        let cmd = CartCommand::ClearCart(ClearCart {
            cart_id: self.id,
            occurred_at: Utc::now(),
        });
        execute(self, &cmd)?;
        Ok(removed)
    }

    /// Turn the current lines into an order and reset the cart.
    ///
    /// Fails with `EmptyCart` (and changes nothing) when there are no lines.
    pub fn finalize(&mut self, checkout: Checkout) -> StoreResult<OrderSummary> {
        self.finalize_with(checkout, |_| Ok(()))
    }

    /// Like [`Cart::finalize`], but `accept` sees the order before the cart is
    /// reset. If `accept` fails its error is returned and the cart keeps its lines.
    pub fn finalize_with<F>(&mut self, checkout: Checkout, accept: F) -> StoreResult<OrderSummary>
    where
        F: FnOnce(&OrderSummary) -> StoreResult<()>,
    {
        let cmd = CartCommand::FinalizeOrder(FinalizeOrder {
            cart_id: self.id,
            order_id: OrderId::new(),
            checkout,
            occurred_at: Utc::now(),
        });

        let events = self.handle(&cmd)?;
        let summary = events
            .iter()
            .find_map(|event| match event {
                CartEvent::OrderFinalized(e) => Some(e.summary.clone()),
                _ => None,
            })
            .ok_or(StoreError::EmptyCart)?;

        accept(&summary)?;
        for event in &events {
            self.apply(event);
        }
        Ok(summary)
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddLine.
#[derive(Debug, Clone, PartialEq)]
pub struct AddLine {
    pub cart_id: CartId,
    pub product: Arc<Product>,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveLine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLine {
    pub cart_id: CartId,
    pub product_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearCart {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: FinalizeOrder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOrder {
    pub cart_id: CartId,
    pub order_id: OrderId,
    pub checkout: Checkout,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    AddLine(AddLine),
    RemoveLine(RemoveLine),
    ClearCart(ClearCart),
    FinalizeOrder(FinalizeOrder),
}

/// Event: LineAdded (product was not in the cart yet).
#[derive(Debug, Clone, PartialEq)]
pub struct LineAdded {
    pub cart_id: CartId,
    pub product: Arc<Product>,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineQuantityChanged (existing line overwritten).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineQuantityChanged {
    pub cart_id: CartId,
    pub product_name: String,
    pub previous: Quantity,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRemoved {
    pub cart_id: CartId,
    pub product_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCleared {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderFinalized (cart emptied into `summary`).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFinalized {
    pub cart_id: CartId,
    pub summary: OrderSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    LineAdded(LineAdded),
    LineQuantityChanged(LineQuantityChanged),
    LineRemoved(LineRemoved),
    CartCleared(CartCleared),
    OrderFinalized(OrderFinalized),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "cart.line.added",
            CartEvent::LineQuantityChanged(_) => "cart.line.quantity_changed",
            CartEvent::LineRemoved(_) => "cart.line.removed",
            CartEvent::CartCleared(_) => "cart.cleared",
            CartEvent::OrderFinalized(_) => "cart.order.finalized",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::LineAdded(e) => e.occurred_at,
            CartEvent::LineQuantityChanged(e) => e.occurred_at,
            CartEvent::LineRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
            CartEvent::OrderFinalized(e) => e.summary.placed_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = StoreError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded(e) => {
                self.lines
                    .push(CartLine::new(Arc::clone(&e.product), e.quantity));
            }
            CartEvent::LineQuantityChanged(e) => {
                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|l| l.product_name() == e.product_name)
                {
                    line.set_quantity(e.quantity);
                }
            }
            CartEvent::LineRemoved(e) => {
                self.lines.retain(|l| l.product_name() != e.product_name);
            }
            CartEvent::CartCleared(_) | CartEvent::OrderFinalized(_) => {
                self.lines.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddLine(cmd) => self.handle_add_line(cmd),
            CartCommand::RemoveLine(cmd) => self.handle_remove_line(cmd),
            CartCommand::ClearCart(cmd) => self.handle_clear(cmd),
            CartCommand::FinalizeOrder(cmd) => self.handle_finalize(cmd),
        }
    }
}

impl Cart {
    fn ensure_cart_id(&self, cart_id: CartId) -> Result<(), StoreError> {
        if self.id != cart_id {
            return Err(StoreError::validation("cart_id mismatch"));
        }
        Ok(())
    }

    fn handle_add_line(&self, cmd: &AddLine) -> Result<Vec<CartEvent>, StoreError> {
        self.ensure_cart_id(cmd.cart_id)?;
        let quantity = Quantity::new(cmd.quantity)?;

        let event = match self.line_for(cmd.product.name()) {
            Some(line) => CartEvent::LineQuantityChanged(LineQuantityChanged {
                cart_id: cmd.cart_id,
                product_name: cmd.product.name().to_string(),
                previous: line.quantity(),
                quantity,
                occurred_at: cmd.occurred_at,
            }),
            None => CartEvent::LineAdded(LineAdded {
                cart_id: cmd.cart_id,
                product: Arc::clone(&cmd.product),
                quantity,
                occurred_at: cmd.occurred_at,
            }),
        };

        Ok(vec![event])
    }

    fn handle_remove_line(&self, cmd: &RemoveLine) -> Result<Vec<CartEvent>, StoreError> {
        self.ensure_cart_id(cmd.cart_id)?;

        // Removing something that is not there is a no-op.
        if self.line_for(&cmd.product_name).is_none() {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::LineRemoved(LineRemoved {
            cart_id: cmd.cart_id,
            product_name: cmd.product_name.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Result<Vec<CartEvent>, StoreError> {
        self.ensure_cart_id(cmd.cart_id)?;

        Ok(vec![CartEvent::CartCleared(CartCleared {
            cart_id: cmd.cart_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_finalize(&self, cmd: &FinalizeOrder) -> Result<Vec<CartEvent>, StoreError> {
        self.ensure_cart_id(cmd.cart_id)?;

        if self.lines.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let view = self.view_total();
        Ok(vec![CartEvent::OrderFinalized(OrderFinalized {
            cart_id: cmd.cart_id,
            summary: OrderSummary {
                order_id: cmd.order_id,
                checkout: cmd.checkout.clone(),
                lines: view.lines,
                total: view.total,
                placed_at: cmd.occurred_at,
            },
        })])
    }
}
