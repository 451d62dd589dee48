//! Core types for Brasserie.
//!
//! This crate provides:
//! - [`Error`] - The error type shared by every layer
//! - [`ErrorKind`] - Categorized error kinds for pattern matching
//! - [`Result`] - Crate-wide result alias

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;

pub use error::{Error, ErrorKind};

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
