//! Extent stores and association primitives for Brasserie.
//!
//! This crate provides:
//! - [`Entity`] - The identity contract every extent-managed type implements
//! - [`ExtentStore`] - Insertion-ordered identity map, one per entity type
//! - [`links`] - Primitives that keep both sides of an association in agreement

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod extent;
pub mod links;

pub use extent::{Entity, ExtentStore};
