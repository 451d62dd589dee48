//! The snapshot manifest: one entry per extent-managed entity type.
//!
//! Each entry knows how to write its extent to `{TypeName}_Extent.msgpack`
//! inside the snapshot directory and how to read it back. The manifest is a
//! static table, so adding an entity type to the system means adding one
//! line here.
//!
//! Association fields hold identity keys, so serializing each extent's
//! instance list captures the whole association graph with no embedded
//! copies; loading every extent restores both halves of every relation.

use std::path::Path;

use brasserie_domain::{
    Customer, Dish, Employee, Menu, Order, OrderLine, Payment, Reservation, Restaurant, Table,
    WorkDetails,
};
use brasserie_foundation::{Error, Result};
use brasserie_registry::{Entity, ExtentStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::codec;

/// The snapshot file name for an entity type.
#[must_use]
pub fn extent_file_name(type_name: &str) -> String {
    format!("{type_name}_Extent.msgpack")
}

/// Writes one extent to its snapshot file under `dir`.
///
/// # Errors
///
/// Returns a `Serialization` or `Io` error if encoding or writing fails.
pub fn save_extent<T>(store: &ExtentStore<T>, dir: &Path) -> Result<()>
where
    T: Entity + Serialize,
{
    let entries: Vec<&T> = store.iter().collect();
    codec::save_to_file(&entries, dir.join(extent_file_name(T::NAME)))
}

/// Reads one extent from its snapshot file under `dir`, replacing the
/// store's contents. A missing file loads as empty.
///
/// # Errors
///
/// Returns a `Serialization` or `Io` error if reading or decoding fails, or
/// `DuplicateKey` if the file holds two instances with the same key. Either
/// way the store is left empty.
pub fn load_extent<T>(store: &mut ExtentStore<T>, dir: &Path) -> Result<()>
where
    T: Entity + DeserializeOwned,
{
    let path = dir.join(extent_file_name(T::NAME));
    if !path.exists() {
        // Nothing recorded for this type yet; an empty extent is the
        // correct state, not an error.
        debug!(entity = T::NAME, "no snapshot file, starting empty");
        return store.replace_all(Vec::new());
    }
    let entries: Vec<T> = match codec::load_from_file(&path) {
        Ok(entries) => entries,
        Err(e) => {
            // A failed type loads as empty rather than keeping stale state.
            store.replace_all(Vec::new())?;
            return Err(e);
        }
    };
    store.replace_all(entries)
}

struct SnapshotEntry {
    name: &'static str,
    save: fn(&Restaurant, &Path) -> Result<()>,
    load: fn(&mut Restaurant, &Path) -> Result<()>,
}

/// One entry per entity type; replaces runtime type discovery.
const MANIFEST: &[SnapshotEntry] = &[
    SnapshotEntry {
        name: Table::NAME,
        save: |r, d| save_extent(r.tables(), d),
        load: |r, d| load_extent(r.tables_mut(), d),
    },
    SnapshotEntry {
        name: Customer::NAME,
        save: |r, d| save_extent(r.customers(), d),
        load: |r, d| load_extent(r.customers_mut(), d),
    },
    SnapshotEntry {
        name: Reservation::NAME,
        save: |r, d| save_extent(r.reservations(), d),
        load: |r, d| load_extent(r.reservations_mut(), d),
    },
    SnapshotEntry {
        name: Menu::NAME,
        save: |r, d| save_extent(r.menus(), d),
        load: |r, d| load_extent(r.menus_mut(), d),
    },
    SnapshotEntry {
        name: Dish::NAME,
        save: |r, d| save_extent(r.dishes(), d),
        load: |r, d| load_extent(r.dishes_mut(), d),
    },
    SnapshotEntry {
        name: Order::NAME,
        save: |r, d| save_extent(r.orders(), d),
        load: |r, d| load_extent(r.orders_mut(), d),
    },
    SnapshotEntry {
        name: OrderLine::NAME,
        save: |r, d| save_extent(r.order_lines(), d),
        load: |r, d| load_extent(r.order_lines_mut(), d),
    },
    SnapshotEntry {
        name: Employee::NAME,
        save: |r, d| save_extent(r.employees(), d),
        load: |r, d| load_extent(r.employees_mut(), d),
    },
    SnapshotEntry {
        name: WorkDetails::NAME,
        save: |r, d| save_extent(r.work_details(), d),
        load: |r, d| load_extent(r.work_details_mut(), d),
    },
    SnapshotEntry {
        name: Payment::NAME,
        save: |r, d| save_extent(r.payments(), d),
        load: |r, d| load_extent(r.payments_mut(), d),
    },
];

/// What happened to each entity type during a save or load pass.
#[derive(Clone, Debug, Default)]
pub struct SnapshotReport {
    /// Types whose extent was written or read successfully.
    pub succeeded: Vec<&'static str>,
    /// Types that failed; details went to the log.
    pub failed: Vec<&'static str>,
}

impl SnapshotReport {
    /// Returns true if no type failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes every extent to its own file under `dir`, creating the directory
/// if needed. A failure in one type is logged and does not stop the others.
///
/// # Errors
///
/// Returns an `Io` error only if the snapshot directory itself cannot be
/// created; per-type failures are reported, not raised.
pub fn save_all(restaurant: &Restaurant, dir: &Path) -> Result<SnapshotReport> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::io(format!(
            "failed to create snapshot directory '{}': {e}",
            dir.display()
        ))
    })?;

    let mut report = SnapshotReport::default();
    for entry in MANIFEST {
        match (entry.save)(restaurant, dir) {
            Ok(()) => report.succeeded.push(entry.name),
            Err(e) => {
                warn!(entity = entry.name, error = %e, "failed to save extent");
                report.failed.push(entry.name);
            }
        }
    }
    Ok(report)
}

/// Reads every extent from its file under `dir`, replacing the restaurant's
/// current contents. A missing file leaves that extent empty; a corrupt one
/// is logged, leaves its extent empty, and does not stop the others.
pub fn load_all(restaurant: &mut Restaurant, dir: &Path) -> SnapshotReport {
    let mut report = SnapshotReport::default();
    for entry in MANIFEST {
        match (entry.load)(restaurant, dir) {
            Ok(()) => report.succeeded.push(entry.name),
            Err(e) => {
                warn!(entity = entry.name, error = %e, "failed to load extent");
                report.failed.push(entry.name);
            }
        }
    }
    report
}
