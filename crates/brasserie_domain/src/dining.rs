//! Tables, customers, and reservations.
//!
//! A reservation holds back-pointer keys to exactly one table and one
//! customer; both of those hold the reservation's key in their ordered
//! collections. The [`crate::Restaurant`] context keeps the two sides in
//! agreement through the registry's association primitives.

use brasserie_foundation::{Error, Result};
use brasserie_registry::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::keys::{CustomerKey, OrderId, PaymentId, ReservationId, TableId};

/// A table in the dining room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub(crate) id: TableId,
    pub(crate) chairs: u32,
    pub(crate) kind: String,
    /// Reservations currently attached, in attachment order.
    pub(crate) reservations: Vec<ReservationId>,
}

impl Table {
    /// Creates a table with a chair count and a kind label ("booth",
    /// "window", ...).
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the chair count is zero or the kind is empty.
    pub fn new(id: TableId, chairs: u32, kind: impl Into<String>) -> Result<Self> {
        let kind = kind.into();
        if chairs == 0 {
            return Err(Error::validation("table chair count must be positive"));
        }
        if kind.trim().is_empty() {
            return Err(Error::validation("table kind cannot be empty"));
        }
        Ok(Self {
            id,
            chairs,
            kind,
            reservations: Vec::new(),
        })
    }

    /// This table's identity.
    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Number of chairs.
    #[must_use]
    pub fn chairs(&self) -> u32 {
        self.chairs
    }

    /// Kind label.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Attached reservations in attachment order.
    #[must_use]
    pub fn reservations(&self) -> &[ReservationId] {
        &self.reservations
    }
}

impl Entity for Table {
    type Key = TableId;
    const NAME: &'static str = "Table";

    fn key(&self) -> TableId {
        self.id
    }
}

/// A customer, keyed by email address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub(crate) email: CustomerKey,
    pub(crate) name: String,
    pub(crate) reservations: Vec<ReservationId>,
    pub(crate) orders: Vec<OrderId>,
    pub(crate) payments: Vec<PaymentId>,
}

impl Customer {
    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the email or name is empty, or the email has
    /// no `@`.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let name = name.into();
        if email.trim().is_empty() || !email.contains('@') {
            return Err(Error::validation(format!("invalid customer email: {email:?}")));
        }
        if name.trim().is_empty() {
            return Err(Error::validation("customer name cannot be empty"));
        }
        Ok(Self {
            email: CustomerKey::new(email),
            name,
            reservations: Vec::new(),
            orders: Vec::new(),
            payments: Vec::new(),
        })
    }

    /// The customer's email key.
    #[must_use]
    pub fn email(&self) -> &CustomerKey {
        &self.email
    }

    /// The customer's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached reservations in attachment order.
    #[must_use]
    pub fn reservations(&self) -> &[ReservationId] {
        &self.reservations
    }

    /// Attached orders in attachment order.
    #[must_use]
    pub fn orders(&self) -> &[OrderId] {
        &self.orders
    }

    /// Attached payments in attachment order.
    #[must_use]
    pub fn payments(&self) -> &[PaymentId] {
        &self.payments
    }
}

impl Entity for Customer {
    type Key = CustomerKey;
    const NAME: &'static str = "Customer";

    fn key(&self) -> CustomerKey {
        self.email.clone()
    }
}

/// Reservation lifecycle states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Created, awaiting confirmation.
    Pending,
    /// Confirmed; the forward step is irreversible.
    Confirmed,
    /// Canceled; terminal.
    Canceled,
}

impl ReservationStatus {
    fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Canceled => "Canceled",
        }
    }
}

/// A reservation of one table by one customer on one date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub(crate) id: ReservationId,
    pub(crate) date: NaiveDate,
    pub(crate) status: ReservationStatus,
    /// Back-pointer to the reserved table.
    pub(crate) table: Option<TableId>,
    /// Back-pointer to the reserving customer.
    pub(crate) customer: Option<CustomerKey>,
}

impl Reservation {
    /// Creates a pending reservation with no attachments yet; the
    /// [`crate::Restaurant`] context attaches it to its table and customer
    /// when it is registered.
    #[must_use]
    pub fn new(id: ReservationId, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            status: ReservationStatus::Pending,
            table: None,
            customer: None,
        }
    }

    /// This reservation's identity.
    #[must_use]
    pub fn id(&self) -> ReservationId {
        self.id
    }

    /// The reserved date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// The reserved table, if attached.
    #[must_use]
    pub fn table(&self) -> Option<TableId> {
        self.table
    }

    /// The reserving customer, if attached.
    #[must_use]
    pub fn customer(&self) -> Option<&CustomerKey> {
        self.customer.as_ref()
    }

    /// Confirms a pending reservation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the reservation is `Pending`.
    pub fn confirm(&mut self) -> Result<()> {
        if self.status != ReservationStatus::Pending {
            return Err(Error::invalid_transition(
                "Reservation",
                self.status.name(),
                ReservationStatus::Confirmed.name(),
            ));
        }
        self.status = ReservationStatus::Confirmed;
        Ok(())
    }

    /// Marks the reservation canceled.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if it is already `Canceled`.
    pub(crate) fn mark_canceled(&mut self) -> Result<()> {
        if self.status == ReservationStatus::Canceled {
            return Err(Error::invalid_transition(
                "Reservation",
                self.status.name(),
                ReservationStatus::Canceled.name(),
            ));
        }
        self.status = ReservationStatus::Canceled;
        Ok(())
    }
}

impl Entity for Reservation {
    type Key = ReservationId;
    const NAME: &'static str = "Reservation";

    fn key(&self) -> ReservationId {
        self.id
    }
}
