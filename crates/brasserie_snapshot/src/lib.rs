//! Snapshot persistence for Brasserie.
//!
//! This crate provides:
//! - Codec helpers - `MessagePack` encode/decode and buffered file I/O
//! - [`save_all`] / [`load_all`] - one snapshot file per entity type, with
//!   per-type failure isolation
//! - [`Depot`] - a restaurant bound to its snapshot directory for the
//!   open/work/close lifecycle

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod codec;
mod depot;
mod manifest;

pub use codec::{from_bytes, load_from_file, save_to_file, to_bytes};
pub use depot::Depot;
pub use manifest::{SnapshotReport, extent_file_name, load_all, load_extent, save_all, save_extent};
