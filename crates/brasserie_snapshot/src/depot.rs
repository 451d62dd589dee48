//! The depot: a restaurant bound to its snapshot directory.
//!
//! Opening a depot loads every extent from disk; closing it writes them all
//! back. In between, the depot hands out the restaurant and the caller works
//! through its operations as usual.

use std::path::{Path, PathBuf};

use brasserie_domain::Restaurant;
use brasserie_foundation::{Error, Result};
use tracing::info;

use crate::manifest::{self, SnapshotReport};

/// A restaurant with an attached snapshot directory.
#[derive(Debug)]
pub struct Depot {
    dir: PathBuf,
    restaurant: Restaurant,
    load_report: SnapshotReport,
}

impl Depot {
    /// Opens a depot, loading whatever the directory holds. A directory
    /// with no snapshot files yields an empty restaurant.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the directory cannot be created. Per-type
    /// load failures do not fail the open; they are logged and recorded in
    /// [`Self::load_report`].
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::io(format!(
                "failed to create snapshot directory '{}': {e}",
                dir.display()
            ))
        })?;

        let mut restaurant = Restaurant::new();
        let load_report = manifest::load_all(&mut restaurant, &dir);
        info!(
            dir = %dir.display(),
            loaded = load_report.succeeded.len(),
            failed = load_report.failed.len(),
            "opened depot"
        );
        Ok(Self {
            dir,
            restaurant,
            load_report,
        })
    }

    /// The snapshot directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// What happened per type when the depot was opened.
    #[must_use]
    pub fn load_report(&self) -> &SnapshotReport {
        &self.load_report
    }

    /// The loaded restaurant.
    #[must_use]
    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    /// The loaded restaurant, mutably.
    pub fn restaurant_mut(&mut self) -> &mut Restaurant {
        &mut self.restaurant
    }

    /// Writes every extent to the snapshot directory without closing.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the directory cannot be created.
    pub fn save(&self) -> Result<SnapshotReport> {
        manifest::save_all(&self.restaurant, &self.dir)
    }

    /// Saves and consumes the depot.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the directory cannot be created.
    pub fn close(self) -> Result<SnapshotReport> {
        let report = self.save()?;
        info!(
            dir = %self.dir.display(),
            saved = report.succeeded.len(),
            failed = report.failed.len(),
            "closed depot"
        );
        Ok(report)
    }
}
