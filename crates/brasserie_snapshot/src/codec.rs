//! Extent serialization and deserialization using `MessagePack`.
//!
//! Snapshots are written one file per entity type; this module provides the
//! byte-level encode/decode and the buffered file helpers the depot builds
//! on.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use brasserie_foundation::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes a value to `MessagePack` bytes.
///
/// Uses named serialization to preserve struct field names, so snapshots
/// survive field reordering.
///
/// # Errors
///
/// Returns a `Serialization` error if encoding fails.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| Error::serialization(e.to_string()))
}

/// Deserializes a value from `MessagePack` bytes.
///
/// # Errors
///
/// Returns a `Serialization` error if decoding fails.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
}

/// Saves a value to a `MessagePack` file, creating or overwriting it.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be created or written to, or a
/// `Serialization` error if encoding fails.
pub fn save_to_file<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(value)?;

    writer.write_all(&bytes).map_err(|e| {
        Error::io(format!(
            "failed to write to file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    writer.flush().map_err(|e| {
        Error::io(format!(
            "failed to flush file '{}': {e}",
            path.as_ref().display()
        ))
    })
}

/// Loads a value from a `MessagePack` file.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read, or a `Serialization`
/// error if decoding fails.
pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to open file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();

    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::io(format!(
            "failed to read file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    from_bytes(&bytes)
}
