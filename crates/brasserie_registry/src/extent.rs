//! Identity maps for extent-managed entity types.
//!
//! An extent is the complete in-memory set of currently-live instances of one
//! entity type. The `ExtentStore` owns that set, enforces key uniqueness, and
//! preserves insertion order so that traversal and snapshots are reproducible.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use brasserie_foundation::{Error, Result};

/// The identity contract for an extent-managed entity type.
///
/// Every entity carries a stable key, unique within its type's extent. The
/// key may be a numeric id or a natural key such as an email address.
pub trait Entity {
    /// Identity key type.
    type Key: Clone + Eq + Hash + Display;

    /// Entity type name, used in error messages and snapshot file names.
    const NAME: &'static str;

    /// Returns this instance's identity key.
    fn key(&self) -> Self::Key;
}

/// Insertion-ordered identity map for one entity type.
///
/// The store is the single owner of the canonical instance list. Association
/// fields elsewhere hold keys into this store, never owning copies, so the
/// read-only views returned here can never be used to bypass the association
/// protocol.
#[derive(Debug)]
pub struct ExtentStore<T: Entity> {
    /// Live instances in insertion order.
    entries: Vec<T>,
    /// Key -> position in `entries`.
    index: HashMap<T::Key, usize>,
}

impl<T: Entity> Default for ExtentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> ExtentStore<T> {
    /// Creates a new empty extent store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers an entity in the extent.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if an instance with the same key is already live.
    pub fn register(&mut self, entity: T) -> Result<()> {
        let key = entity.key();
        if self.index.contains_key(&key) {
            return Err(Error::duplicate_key(T::NAME, key.to_string()));
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entity);
        Ok(())
    }

    /// Removes the instance with the given key and returns it.
    ///
    /// Does not cascade: severing associations is the caller's job, performed
    /// before this call.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live instance has the key.
    pub fn unregister(&mut self, key: &T::Key) -> Result<T> {
        let pos = self
            .index
            .remove(key)
            .ok_or_else(|| Error::not_found(T::NAME, key.to_string()))?;
        let entity = self.entries.remove(pos);
        // Positions after the removed slot shift down by one.
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Ok(entity)
    }

    /// Looks up an instance by key.
    #[must_use]
    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    /// Looks up an instance by key, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live instance has the key.
    pub fn get(&self, key: &T::Key) -> Result<&T> {
        self.find(key)
            .ok_or_else(|| Error::not_found(T::NAME, key.to_string()))
    }

    /// Looks up an instance mutably by key, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live instance has the key.
    pub fn get_mut(&mut self, key: &T::Key) -> Result<&mut T> {
        let pos = *self
            .index
            .get(key)
            .ok_or_else(|| Error::not_found(T::NAME, key.to_string()))?;
        Ok(&mut self.entries[pos])
    }

    /// Mutably borrows two distinct instances at once.
    ///
    /// Needed for reflexive associations, where both ends of the relation
    /// live in the same extent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either key is absent, or `Validation` if the
    /// keys are equal.
    pub fn get_pair_mut(&mut self, a: &T::Key, b: &T::Key) -> Result<(&mut T, &mut T)> {
        if a == b {
            return Err(Error::validation(format!(
                "{} {a} cannot be paired with itself",
                T::NAME
            )));
        }
        let pos_a = *self
            .index
            .get(a)
            .ok_or_else(|| Error::not_found(T::NAME, a.to_string()))?;
        let pos_b = *self
            .index
            .get(b)
            .ok_or_else(|| Error::not_found(T::NAME, b.to_string()))?;
        if pos_a < pos_b {
            let (head, tail) = self.entries.split_at_mut(pos_b);
            Ok((&mut head[pos_a], &mut tail[0]))
        } else {
            let (head, tail) = self.entries.split_at_mut(pos_a);
            Ok((&mut tail[0], &mut head[pos_b]))
        }
    }

    /// Returns true if an instance with the key is live.
    #[must_use]
    pub fn contains(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates over live instances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Iterates over live identity keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = T::Key> + '_ {
        self.entries.iter().map(Entity::key)
    }

    /// Returns the number of live instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no live instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the store.
    ///
    /// Test-only escape hatch: instances referenced from other still-live
    /// extents are not detached, so clearing a store that participates in
    /// cross-extent associations leaves dangling keys behind. Production
    /// paths retire entities individually instead.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Rebuilds the store from an ordered instance sequence.
    ///
    /// Used by the snapshot-load path. The previous contents are discarded.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the sequence contains two instances with the
    /// same key; the store is left empty in that case.
    pub fn replace_all(&mut self, entities: Vec<T>) -> Result<()> {
        self.clear();
        for entity in entities {
            self.register(entity)?;
        }
        Ok(())
    }
}
