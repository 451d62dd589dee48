//! Depot lifecycle
//!
//! Open, work, close: the depot owns the restaurant between snapshots.

use brasserie_domain::{Customer, CustomerKey, ReservationId, Table, TableId};
use brasserie_snapshot::Depot;
use chrono::NaiveDate;

use crate::scratch_dir;

#[test]
fn a_fresh_depot_starts_empty_and_clean() {
    let dir = scratch_dir("depot_fresh");

    let depot = Depot::open(&dir).unwrap();
    assert!(depot.load_report().is_clean());
    assert!(depot.restaurant().tables().is_empty());
    assert_eq!(depot.dir(), dir.as_path());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn work_survives_close_and_reopen() {
    let dir = scratch_dir("depot_cycle");

    let mut depot = Depot::open(&dir).unwrap();
    let restaurant = depot.restaurant_mut();
    restaurant.add_table(Table::new(TableId(1), 4, "booth").unwrap()).unwrap();
    restaurant
        .add_customer(Customer::new("ana@x.com", "Ana").unwrap())
        .unwrap();
    restaurant
        .make_reservation(
            ReservationId(1),
            NaiveDate::from_ymd_opt(2030, 6, 15).unwrap(),
            TableId(1),
            &CustomerKey::new("ana@x.com"),
        )
        .unwrap();
    let report = depot.close().unwrap();
    assert!(report.is_clean());

    let reopened = Depot::open(&dir).unwrap();
    assert!(reopened.load_report().is_clean());
    assert_eq!(
        reopened
            .restaurant()
            .reservations()
            .get(&ReservationId(1))
            .unwrap()
            .table(),
        Some(TableId(1))
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn interim_saves_do_not_consume_the_depot() {
    let dir = scratch_dir("depot_interim");

    let mut depot = Depot::open(&dir).unwrap();
    depot
        .restaurant_mut()
        .add_table(Table::new(TableId(1), 4, "booth").unwrap())
        .unwrap();
    depot.save().unwrap();

    // Keep working after the save, then close.
    depot
        .restaurant_mut()
        .add_table(Table::new(TableId(2), 2, "window").unwrap())
        .unwrap();
    depot.close().unwrap();

    let reopened = Depot::open(&dir).unwrap();
    assert_eq!(reopened.restaurant().tables().len(), 2);

    std::fs::remove_dir_all(&dir).ok();
}
