//! Error types for the Brasserie system.
//!
//! Uses `thiserror` for ergonomic error definition. Every failure in the
//! registry, association, and snapshot layers is recoverable by the caller;
//! nothing here is process-fatal.

use thiserror::Error;

/// The main error type for Brasserie operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a duplicate-key error for an extent registration.
    #[must_use]
    pub fn duplicate_key(entity: &'static str, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateKey {
            entity,
            key: key.into(),
        })
    }

    /// Creates a not-found error for an extent lookup.
    #[must_use]
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            entity,
            key: key.into(),
        })
    }

    /// Creates an already-linked error for a one-to-one association.
    #[must_use]
    pub fn already_linked(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyLinked {
            detail: detail.into(),
        })
    }

    /// Creates a not-linked error for a one-to-one association.
    #[must_use]
    pub fn not_linked(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotLinked {
            detail: detail.into(),
        })
    }

    /// Creates an already-attached error for a one-to-many association.
    #[must_use]
    pub fn already_attached(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyAttached {
            detail: detail.into(),
        })
    }

    /// Creates a not-attached error for a one-to-many association.
    #[must_use]
    pub fn not_attached(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAttached {
            detail: detail.into(),
        })
    }

    /// Creates a duplicate-qualifier error for a qualified association.
    #[must_use]
    pub fn duplicate_qualifier(qualifier: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateQualifier {
            qualifier: qualifier.into(),
        })
    }

    /// Creates an already-bound error for a qualified association.
    #[must_use]
    pub fn already_bound(qualifier: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyBound {
            qualifier: qualifier.into(),
        })
    }

    /// Creates an unknown-qualifier error for a qualified association.
    #[must_use]
    pub fn unknown_qualifier(qualifier: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownQualifier {
            qualifier: qualifier.into(),
        })
    }

    /// Creates an invalid-state-transition error.
    #[must_use]
    pub fn invalid_transition(
        entity: &'static str,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidStateTransition {
            entity,
            from: from.into(),
            to: to.into(),
        })
    }

    /// Creates a validation error for a rejected field value.
    #[must_use]
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation {
            detail: detail.into(),
        })
    }

    /// Creates a double-booking error for a table reservation conflict.
    #[must_use]
    pub fn double_booking(table: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(ErrorKind::DoubleBooking {
            table: table.into(),
            date: date.into(),
        })
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An instance with the same identity key is already registered.
    #[error("duplicate {entity} key: {key}")]
    DuplicateKey {
        /// Entity type name.
        entity: &'static str,
        /// The offending key, rendered for display.
        key: String,
    },

    /// No live instance with the given identity key.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity type name.
        entity: &'static str,
        /// The missing key, rendered for display.
        key: String,
    },

    /// One-to-one link attempted while either side already holds a partner.
    #[error("already linked: {detail}")]
    AlreadyLinked {
        /// Which pair, which side.
        detail: String,
    },

    /// One-to-one unlink of a pair that is not currently linked.
    #[error("not linked: {detail}")]
    NotLinked {
        /// Which pair was expected.
        detail: String,
    },

    /// One-to-many attach of a dependent that is already attached.
    #[error("already attached: {detail}")]
    AlreadyAttached {
        /// Which owner/dependent pair.
        detail: String,
    },

    /// One-to-many detach of a dependent that is not attached.
    #[error("not attached: {detail}")]
    NotAttached {
        /// Which owner/dependent pair.
        detail: String,
    },

    /// Qualified bind on a qualifier that is already in use.
    #[error("duplicate qualifier: {qualifier}")]
    DuplicateQualifier {
        /// The qualifier string.
        qualifier: String,
    },

    /// Qualified bind of an entity already bound under a different qualifier.
    #[error("entity already bound under qualifier: {qualifier}")]
    AlreadyBound {
        /// The qualifier the entity is currently bound under.
        qualifier: String,
    },

    /// Qualified unbind of a qualifier with no binding.
    #[error("unknown qualifier: {qualifier}")]
    UnknownQualifier {
        /// The qualifier string.
        qualifier: String,
    },

    /// A state machine rejected the requested transition.
    #[error("invalid {entity} transition: {from} -> {to}")]
    InvalidStateTransition {
        /// Entity type name.
        entity: &'static str,
        /// Current state.
        from: String,
        /// Requested state.
        to: String,
    },

    /// A field value failed construction-time validation.
    #[error("validation failed: {detail}")]
    Validation {
        /// What was rejected and why.
        detail: String,
    },

    /// A table already has a live reservation on the requested date.
    #[error("table {table} is already reserved on {date}")]
    DoubleBooking {
        /// The contested table, rendered for display.
        table: String,
        /// The contested date, rendered for display.
        date: String,
    },

    /// Snapshot encode/decode failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Snapshot file I/O failure.
    #[error("io error: {0}")]
    Io(String),
}
