//! Integration tests for extent stores
//!
//! Tests key uniqueness, insertion order, and removal against real entity
//! types rather than synthetic fixtures.

use brasserie_domain::{Customer, CustomerKey, Table, TableId};
use brasserie_foundation::ErrorKind;
use brasserie_registry::{Entity, ExtentStore};

// =============================================================================
// Registration
// =============================================================================

#[test]
fn registering_tracks_the_instance() {
    let mut tables: ExtentStore<Table> = ExtentStore::new();
    tables.register(Table::new(TableId(1), 4, "booth").unwrap()).unwrap();

    assert!(tables.contains(&TableId(1)));
    assert_eq!(tables.len(), 1);
    assert_eq!(tables.get(&TableId(1)).unwrap().chairs(), 4);
}

#[test]
fn duplicate_numeric_key_is_rejected() {
    let mut tables: ExtentStore<Table> = ExtentStore::new();
    tables.register(Table::new(TableId(1), 4, "booth").unwrap()).unwrap();

    let result = tables.register(Table::new(TableId(1), 2, "window").unwrap());
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::DuplicateKey { .. }
    ));
    // First registration wins.
    assert_eq!(tables.get(&TableId(1)).unwrap().kind(), "booth");
}

#[test]
fn duplicate_natural_key_is_rejected() {
    let mut customers: ExtentStore<Customer> = ExtentStore::new();
    customers
        .register(Customer::new("ana@x.com", "Ana").unwrap())
        .unwrap();

    let result = customers.register(Customer::new("ana@x.com", "Another Ana").unwrap());
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::DuplicateKey { .. }
    ));
}

// =============================================================================
// Traversal
// =============================================================================

#[test]
fn traversal_is_in_registration_order() {
    let mut tables: ExtentStore<Table> = ExtentStore::new();
    for id in [7, 2, 9] {
        tables.register(Table::new(TableId(id), 2, "window").unwrap()).unwrap();
    }

    let ids: Vec<TableId> = tables.keys().collect();
    assert_eq!(ids, vec![TableId(7), TableId(2), TableId(9)]);

    let via_iter: Vec<TableId> = tables.iter().map(Entity::key).collect();
    assert_eq!(via_iter, ids);
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn unregister_returns_ownership() {
    let mut customers: ExtentStore<Customer> = ExtentStore::new();
    customers
        .register(Customer::new("ana@x.com", "Ana").unwrap())
        .unwrap();

    let removed = customers.unregister(&CustomerKey::new("ana@x.com")).unwrap();
    assert_eq!(removed.name(), "Ana");
    assert!(customers.is_empty());
}

#[test]
fn removal_keeps_remaining_order() {
    let mut tables: ExtentStore<Table> = ExtentStore::new();
    for id in 1..=5 {
        tables.register(Table::new(TableId(id), 2, "window").unwrap()).unwrap();
    }

    tables.unregister(&TableId(3)).unwrap();
    tables.unregister(&TableId(1)).unwrap();

    let ids: Vec<TableId> = tables.keys().collect();
    assert_eq!(ids, vec![TableId(2), TableId(4), TableId(5)]);
}

#[test]
fn removed_key_is_reusable() {
    let mut tables: ExtentStore<Table> = ExtentStore::new();
    tables.register(Table::new(TableId(1), 4, "booth").unwrap()).unwrap();
    tables.unregister(&TableId(1)).unwrap();

    tables.register(Table::new(TableId(1), 6, "garden").unwrap()).unwrap();
    assert_eq!(tables.get(&TableId(1)).unwrap().chairs(), 6);
}
