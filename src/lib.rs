//! Brasserie - Restaurant domain model with extent-based persistence
//!
//! This crate re-exports all layers of the Brasserie system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: brasserie_snapshot   - MessagePack snapshot files, depot lifecycle
//! Layer 2: brasserie_domain     - Entity types, Restaurant context
//! Layer 1: brasserie_registry   - Extent stores, association primitives
//! Layer 0: brasserie_foundation - Core types (Error, Result)
//! ```

pub use brasserie_domain as domain;
pub use brasserie_foundation as foundation;
pub use brasserie_registry as registry;
pub use brasserie_snapshot as snapshot;
