//! Save/load round trips
//!
//! A populated restaurant written to disk and read back must behave
//! identically, not merely compare equal field-by-field.

use brasserie_domain::{
    Customer, CustomerKey, Dish, DishKey, Employee, EmployeeId, Menu, MenuKey, OrderId, Payment,
    PaymentId, ReservationId, ReservationStatus, Restaurant, StaffRole, Table, TableId,
    WorkDetails, WorkDetailsId,
};
use brasserie_snapshot::{extent_file_name, load_all, save_all};
use chrono::{NaiveDate, Utc};

use crate::scratch_dir;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, day).unwrap()
}

fn ana() -> CustomerKey {
    CustomerKey::new("ana@x.com")
}

fn populated() -> Restaurant {
    let mut restaurant = Restaurant::new();
    restaurant.add_table(Table::new(TableId(1), 4, "booth").unwrap()).unwrap();
    restaurant.add_table(Table::new(TableId(2), 2, "window").unwrap()).unwrap();
    restaurant
        .add_customer(Customer::new("ana@x.com", "Ana").unwrap())
        .unwrap();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();
    restaurant.confirm_reservation(ReservationId(1)).unwrap();
    restaurant
        .add_menu(Menu::new("Lunch", "seasonal", vec!["en".into()]).unwrap())
        .unwrap();
    restaurant
        .add_dish(Dish::new("Pho", "Vietnamese", 11.0, false, vec!["broth".into()]).unwrap())
        .unwrap();
    restaurant
        .attach_dish(&MenuKey::new("Lunch"), &DishKey::new("Pho"))
        .unwrap();
    restaurant
        .bind_special(&MenuKey::new("Lunch"), "Special", &DishKey::new("Pho"))
        .unwrap();
    restaurant.place_order(OrderId(1), Utc::now(), &ana()).unwrap();
    restaurant.add_to_order(OrderId(1), &DishKey::new("Pho"), 2).unwrap();
    restaurant
        .pay_order(OrderId(1), Payment::cash(PaymentId(1), 22.0, "Jo").unwrap())
        .unwrap();
    restaurant
        .hire_employee(Employee::new(EmployeeId(1), "Greta", StaffRole::Manager).unwrap())
        .unwrap();
    restaurant
        .hire_employee(Employee::new(EmployeeId(2), "Marta", StaffRole::Waiter).unwrap())
        .unwrap();
    restaurant.supervise(EmployeeId(1), EmployeeId(2)).unwrap();
    restaurant
        .add_work_details(
            WorkDetails::new(WorkDetailsId(1), june(1), "floor", "evening").unwrap(),
        )
        .unwrap();
    restaurant.assign_work_details(EmployeeId(2), WorkDetailsId(1)).unwrap();
    restaurant
}

// =============================================================================
// Restoration
// =============================================================================

#[test]
fn every_type_gets_its_own_file() {
    let dir = scratch_dir("file_per_type");
    save_all(&populated(), &dir).unwrap();

    for name in [
        "Table",
        "Customer",
        "Reservation",
        "Menu",
        "Dish",
        "Order",
        "OrderLine",
        "Employee",
        "WorkDetails",
        "Payment",
    ] {
        assert!(
            dir.join(extent_file_name(name)).exists(),
            "missing snapshot file for {name}"
        );
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn reload_restores_state_and_associations() {
    let dir = scratch_dir("reload");
    save_all(&populated(), &dir).unwrap();

    let mut reloaded = Restaurant::new();
    let report = load_all(&mut reloaded, &dir);
    assert!(report.is_clean());

    // Lifecycle state survives.
    assert_eq!(
        reloaded.reservations().get(&ReservationId(1)).unwrap().status(),
        ReservationStatus::Confirmed
    );
    assert!(reloaded.orders().get(&OrderId(1)).unwrap().is_paid());

    // Both halves of the associations survive.
    assert_eq!(
        reloaded.tables().get(&TableId(1)).unwrap().reservations(),
        [ReservationId(1)]
    );
    assert_eq!(
        reloaded.menus().get(&MenuKey::new("Lunch")).unwrap().special("Special"),
        Some(&DishKey::new("Pho"))
    );
    assert_eq!(
        reloaded.employees().get(&EmployeeId(2)).unwrap().supervisor(),
        Some(EmployeeId(1))
    );
    assert_eq!(
        reloaded.work_details().get(&WorkDetailsId(1)).unwrap().employee(),
        Some(EmployeeId(2))
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn reloaded_state_keeps_enforcing_invariants() {
    let dir = scratch_dir("invariants");
    save_all(&populated(), &dir).unwrap();

    let mut reloaded = Restaurant::new();
    load_all(&mut reloaded, &dir);

    // The reloaded booking still blocks its slot.
    assert!(reloaded
        .make_reservation(ReservationId(9), june(15), TableId(1), &ana())
        .is_err());
    // The reloaded paid order still refuses amendment.
    assert!(reloaded.add_to_order(OrderId(1), &DishKey::new("Pho"), 1).is_err());
    // And the free table still books.
    reloaded
        .make_reservation(ReservationId(9), june(15), TableId(2), &ana())
        .unwrap();

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn save_load_save_is_stable() {
    let dir_a = scratch_dir("stable_a");
    let dir_b = scratch_dir("stable_b");
    save_all(&populated(), &dir_a).unwrap();

    let mut reloaded = Restaurant::new();
    load_all(&mut reloaded, &dir_a);
    save_all(&reloaded, &dir_b).unwrap();

    for name in ["Table", "Customer", "Reservation", "Menu", "Dish"] {
        let a = std::fs::read(dir_a.join(extent_file_name(name))).unwrap();
        let b = std::fs::read(dir_b.join(extent_file_name(name))).unwrap();
        assert_eq!(a, b, "snapshot for {name} changed across a round trip");
    }

    std::fs::remove_dir_all(&dir_a).ok();
    std::fs::remove_dir_all(&dir_b).ok();
}

// =============================================================================
// Damage
// =============================================================================

#[test]
fn a_missing_file_means_an_empty_extent() {
    let dir = scratch_dir("missing_file");
    save_all(&populated(), &dir).unwrap();
    std::fs::remove_file(dir.join(extent_file_name("Payment"))).unwrap();

    let mut reloaded = Restaurant::new();
    let report = load_all(&mut reloaded, &dir);

    assert!(report.is_clean());
    assert!(reloaded.payments().is_empty());
    assert!(!reloaded.tables().is_empty());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn a_corrupt_file_fails_only_its_own_type() {
    let dir = scratch_dir("corrupt_file");
    save_all(&populated(), &dir).unwrap();
    std::fs::write(dir.join(extent_file_name("Order")), b"\xc1 garbage").unwrap();

    let mut reloaded = Restaurant::new();
    let report = load_all(&mut reloaded, &dir);

    assert_eq!(report.failed, vec!["Order"]);
    assert!(reloaded.orders().is_empty());
    assert!(!reloaded.order_lines().is_empty());
    assert!(!reloaded.customers().is_empty());

    std::fs::remove_dir_all(&dir).ok();
}
