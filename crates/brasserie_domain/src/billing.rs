//! Payments.
//!
//! A payment moves `Pending -> Completed -> Refunded`, each step requiring
//! the exact predecessor state. Card and cash payments differ only in the
//! method details validated at construction.

use brasserie_foundation::{Error, Result};
use brasserie_registry::Entity;
use serde::{Deserialize, Serialize};

use crate::keys::{CustomerKey, PaymentId};

/// How a payment was made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card payment with its card details.
    Card {
        /// 15 or 16 digits.
        card_number: String,
        /// Name on the card.
        holder: String,
    },
    /// Cash payment handled by a cashier.
    Cash {
        /// Who took the cash.
        cashier: String,
    },
}

/// Payment lifecycle states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Created, not yet processed.
    Pending,
    /// Processed successfully.
    Completed,
    /// Returned to the customer; terminal.
    Refunded,
}

impl PaymentStatus {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Refunded => "Refunded",
        }
    }
}

/// A payment record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub(crate) id: PaymentId,
    pub(crate) amount: f64,
    pub(crate) method: PaymentMethod,
    pub(crate) status: PaymentStatus,
    /// Back-pointer to the paying customer.
    pub(crate) customer: Option<CustomerKey>,
}

impl Payment {
    /// Creates a pending card payment.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the amount is not positive, the card number
    /// is not 15 or 16 digits, or the holder name is empty.
    pub fn card(
        id: PaymentId,
        amount: f64,
        card_number: impl Into<String>,
        holder: impl Into<String>,
    ) -> Result<Self> {
        let card_number = card_number.into();
        let holder = holder.into();
        if !(card_number.len() == 15 || card_number.len() == 16)
            || !card_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::validation("card number must be 15 or 16 digits"));
        }
        if holder.trim().is_empty() {
            return Err(Error::validation("card holder name cannot be empty"));
        }
        Self::new(id, amount, PaymentMethod::Card {
            card_number,
            holder,
        })
    }

    /// Creates a pending cash payment.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the amount is not positive or the cashier
    /// name is empty.
    pub fn cash(id: PaymentId, amount: f64, cashier: impl Into<String>) -> Result<Self> {
        let cashier = cashier.into();
        if cashier.trim().is_empty() {
            return Err(Error::validation("cashier name cannot be empty"));
        }
        Self::new(id, amount, PaymentMethod::Cash { cashier })
    }

    fn new(id: PaymentId, amount: f64, method: PaymentMethod) -> Result<Self> {
        if amount <= 0.0 {
            return Err(Error::validation(format!(
                "payment amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            id,
            amount,
            method,
            status: PaymentStatus::Pending,
            customer: None,
        })
    }

    /// This payment's identity.
    #[must_use]
    pub fn id(&self) -> PaymentId {
        self.id
    }

    /// Payment amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// How the payment was made.
    #[must_use]
    pub fn method(&self) -> &PaymentMethod {
        &self.method
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// The paying customer, if attached.
    #[must_use]
    pub fn customer(&self) -> Option<&CustomerKey> {
        self.customer.as_ref()
    }

    /// Completes a pending payment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the payment is `Pending`.
    pub fn complete(&mut self) -> Result<()> {
        if self.status != PaymentStatus::Pending {
            return Err(Error::invalid_transition(
                "Payment",
                self.status.name(),
                PaymentStatus::Completed.name(),
            ));
        }
        self.status = PaymentStatus::Completed;
        Ok(())
    }

    /// Refunds a completed payment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the payment is `Completed`,
    /// or `Validation` if the refund amount is not positive or exceeds the
    /// paid amount.
    pub fn refund(&mut self, refund_amount: f64) -> Result<()> {
        if self.status != PaymentStatus::Completed {
            return Err(Error::invalid_transition(
                "Payment",
                self.status.name(),
                PaymentStatus::Refunded.name(),
            ));
        }
        if refund_amount <= 0.0 || refund_amount > self.amount {
            return Err(Error::validation(format!(
                "refund amount must be positive and at most {}, got {refund_amount}",
                self.amount
            )));
        }
        self.status = PaymentStatus::Refunded;
        Ok(())
    }
}

impl Entity for Payment {
    type Key = PaymentId;
    const NAME: &'static str = "Payment";

    fn key(&self) -> PaymentId {
        self.id
    }
}
