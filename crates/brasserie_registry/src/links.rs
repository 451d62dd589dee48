//! Association primitives that keep both sides of a relation in agreement.
//!
//! Each operation takes mutable access to both halves of the association at
//! once and validates completely before mutating anything, so a caller never
//! observes a relationship linked on one side only. Association fields hold
//! identity keys, not owning references; the entities themselves live in
//! their extents.

use std::collections::BTreeMap;
use std::fmt::Display;

use brasserie_foundation::{Error, Result};

/// Links a one-to-one pair.
///
/// `a_slot` is `a`'s pointer to its partner, `b_slot` is `b`'s pointer back.
/// Re-linking without an explicit [`unlink`] is rejected: reassignment intent
/// must be explicit, there is no silent overwrite.
///
/// # Errors
///
/// Returns `AlreadyLinked` if either side already holds a partner.
pub fn link<KA, KB>(
    a_slot: &mut Option<KB>,
    b_slot: &mut Option<KA>,
    a_key: &KA,
    b_key: &KB,
) -> Result<()>
where
    KA: Clone + Display,
    KB: Clone + Display,
{
    if a_slot.is_some() {
        return Err(Error::already_linked(format!("{a_key} already has a partner")));
    }
    if b_slot.is_some() {
        return Err(Error::already_linked(format!("{b_key} already has a partner")));
    }
    *a_slot = Some(b_key.clone());
    *b_slot = Some(a_key.clone());
    Ok(())
}

/// Unlinks a one-to-one pair.
///
/// # Errors
///
/// Returns `NotLinked` unless both slots currently name each other.
pub fn unlink<KA, KB>(
    a_slot: &mut Option<KB>,
    b_slot: &mut Option<KA>,
    a_key: &KA,
    b_key: &KB,
) -> Result<()>
where
    KA: Clone + PartialEq + Display,
    KB: Clone + PartialEq + Display,
{
    if a_slot.as_ref() != Some(b_key) || b_slot.as_ref() != Some(a_key) {
        return Err(Error::not_linked(format!("{a_key} and {b_key}")));
    }
    *a_slot = None;
    *b_slot = None;
    Ok(())
}

/// Attaches a dependent to a one-to-many owner.
///
/// `collection` is the owner's ordered dependent list, `back` is the
/// dependent's owner pointer. Appends to the collection, preserving
/// insertion order.
///
/// # Errors
///
/// Returns `AlreadyAttached` if the dependent is already in the collection
/// or already has an owner.
pub fn attach<KO, KD>(
    collection: &mut Vec<KD>,
    back: &mut Option<KO>,
    owner_key: &KO,
    dep_key: &KD,
) -> Result<()>
where
    KO: Clone + Display,
    KD: Clone + PartialEq + Display,
{
    if collection.contains(dep_key) {
        return Err(Error::already_attached(format!(
            "{dep_key} is already attached to {owner_key}"
        )));
    }
    if back.is_some() {
        return Err(Error::already_attached(format!(
            "{dep_key} already has an owner"
        )));
    }
    collection.push(dep_key.clone());
    *back = Some(owner_key.clone());
    Ok(())
}

/// Detaches a dependent from a one-to-many owner.
///
/// Reassigning a dependent to a new owner is a `detach` immediately followed
/// by an [`attach`], sequenced by the caller as one observable unit.
///
/// # Errors
///
/// Returns `NotAttached` unless the dependent is in the collection and its
/// back-pointer names this owner.
pub fn detach<KO, KD>(
    collection: &mut Vec<KD>,
    back: &mut Option<KO>,
    owner_key: &KO,
    dep_key: &KD,
) -> Result<()>
where
    KO: Clone + PartialEq + Display,
    KD: Clone + PartialEq + Display,
{
    let pos = collection.iter().position(|k| k == dep_key);
    let (Some(pos), Some(owner)) = (pos, back.as_ref()) else {
        return Err(Error::not_attached(format!("{dep_key} is not attached to {owner_key}")));
    };
    if owner != owner_key {
        return Err(Error::not_attached(format!(
            "{dep_key} is not attached to {owner_key}"
        )));
    }
    collection.remove(pos);
    *back = None;
    Ok(())
}

/// Binds an entity under a qualifier in a keyed sub-map.
///
/// A qualifier addresses exactly one entity, and an entity is bound under at
/// most one qualifier.
///
/// # Errors
///
/// Returns `DuplicateQualifier` if the qualifier is in use, or `AlreadyBound`
/// if the entity is already bound under a different qualifier.
pub fn bind<K>(map: &mut BTreeMap<String, K>, qualifier: &str, key: &K) -> Result<()>
where
    K: Clone + PartialEq,
{
    if map.contains_key(qualifier) {
        return Err(Error::duplicate_qualifier(qualifier));
    }
    if let Some((existing, _)) = map.iter().find(|(_, bound)| *bound == key) {
        return Err(Error::already_bound(existing.clone()));
    }
    map.insert(qualifier.to_string(), key.clone());
    Ok(())
}

/// Removes a qualifier binding and returns the previously bound key.
///
/// # Errors
///
/// Returns `UnknownQualifier` if the qualifier has no binding.
pub fn unbind<K>(map: &mut BTreeMap<String, K>, qualifier: &str) -> Result<K> {
    map.remove(qualifier)
        .ok_or_else(|| Error::unknown_qualifier(qualifier))
}
