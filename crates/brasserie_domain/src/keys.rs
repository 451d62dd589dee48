//! Identity key types.
//!
//! Association fields hold these keys, never owning references, so the
//! entity graph stays cycle-free: every lookup goes back through the
//! owning extent.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_key {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

macro_rules! natural_key {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Wraps a raw string key.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_key!(
    /// Table identity.
    TableId
);
numeric_key!(
    /// Reservation identity.
    ReservationId
);
numeric_key!(
    /// Order identity.
    OrderId
);
numeric_key!(
    /// Order line identity (join records between orders and dishes).
    OrderLineId
);
numeric_key!(
    /// Employee identity.
    EmployeeId
);
numeric_key!(
    /// Work details identity.
    WorkDetailsId
);
numeric_key!(
    /// Payment identity.
    PaymentId
);

natural_key!(
    /// Customer identity: the customer's email address.
    CustomerKey
);
natural_key!(
    /// Dish identity: the dish name.
    DishKey
);
natural_key!(
    /// Menu identity: the menu name.
    MenuKey
);
