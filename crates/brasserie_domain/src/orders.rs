//! Orders and order lines.
//!
//! Order lines are extent-managed join records realizing the many-to-many
//! relation between orders and dishes: each line carries back-pointers to
//! one order and one dish plus a quantity and the unit price captured at
//! ordering time.

use brasserie_foundation::{Error, Result};
use brasserie_registry::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::{CustomerKey, DishKey, OrderId, OrderLineId};

/// An order placed by a customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub(crate) id: OrderId,
    pub(crate) placed_at: DateTime<Utc>,
    pub(crate) paid: bool,
    /// Back-pointer to the ordering customer.
    pub(crate) customer: Option<CustomerKey>,
    /// Order lines in attachment order.
    pub(crate) lines: Vec<OrderLineId>,
}

impl Order {
    /// Creates an unpaid order stamped with the given time; the
    /// [`crate::Restaurant`] context attaches it to its customer when it is
    /// registered.
    #[must_use]
    pub fn new(id: OrderId, placed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            placed_at,
            paid: false,
            customer: None,
            lines: Vec::new(),
        }
    }

    /// This order's identity.
    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// When the order was placed.
    #[must_use]
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Whether the order has been paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// The ordering customer, if attached.
    #[must_use]
    pub fn customer(&self) -> Option<&CustomerKey> {
        self.customer.as_ref()
    }

    /// Order lines in attachment order.
    #[must_use]
    pub fn lines(&self) -> &[OrderLineId] {
        &self.lines
    }

    /// Marks the order paid. One-way.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the order is already paid.
    pub(crate) fn mark_paid(&mut self) -> Result<()> {
        if self.paid {
            return Err(Error::invalid_transition("Order", "Paid", "Paid"));
        }
        self.paid = true;
        Ok(())
    }
}

impl Entity for Order {
    type Key = OrderId;
    const NAME: &'static str = "Order";

    fn key(&self) -> OrderId {
        self.id
    }
}

/// A join record between one order and one dish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub(crate) id: OrderLineId,
    pub(crate) quantity: u32,
    /// Price per unit at the time of ordering.
    pub(crate) unit_price: f64,
    /// Back-pointer to the owning order.
    pub(crate) order: Option<OrderId>,
    /// Back-pointer to the referenced dish.
    pub(crate) dish: Option<DishKey>,
}

impl OrderLine {
    /// Creates an unattached order line.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the quantity is zero or the unit price is
    /// not positive.
    pub fn new(id: OrderLineId, quantity: u32, unit_price: f64) -> Result<Self> {
        if quantity == 0 {
            return Err(Error::validation("order line quantity must be positive"));
        }
        if unit_price <= 0.0 {
            return Err(Error::validation(format!(
                "order line unit price must be positive, got {unit_price}"
            )));
        }
        Ok(Self {
            id,
            quantity,
            unit_price,
            order: None,
            dish: None,
        })
    }

    /// This line's identity.
    #[must_use]
    pub fn id(&self) -> OrderLineId {
        self.id
    }

    /// Quantity ordered.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured at ordering time.
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// The owning order, if attached.
    #[must_use]
    pub fn order(&self) -> Option<OrderId> {
        self.order
    }

    /// The referenced dish, if attached.
    #[must_use]
    pub fn dish(&self) -> Option<&DishKey> {
        self.dish.as_ref()
    }

    /// Line subtotal.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

impl Entity for OrderLine {
    type Key = OrderLineId;
    const NAME: &'static str = "OrderLine";

    fn key(&self) -> OrderLineId {
        self.id
    }
}
