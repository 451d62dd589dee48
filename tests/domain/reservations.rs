//! Reservation scenarios
//!
//! Booking, confirming, canceling, and moving reservations, plus the
//! cascades triggered by removing tables and customers.

use brasserie_domain::{Customer, CustomerKey, ReservationId, ReservationStatus, TableId};
use brasserie_foundation::ErrorKind;
use chrono::NaiveDate;

use crate::{ana, base_restaurant};

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, day).unwrap()
}

// =============================================================================
// Booking
// =============================================================================

#[test]
fn booking_requires_known_table_and_customer() {
    let mut restaurant = base_restaurant();

    let result = restaurant.make_reservation(ReservationId(1), june(15), TableId(99), &ana());
    assert!(matches!(result.unwrap_err().kind, ErrorKind::NotFound { .. }));

    let result = restaurant.make_reservation(
        ReservationId(1),
        june(15),
        TableId(1),
        &CustomerKey::new("ghost@x.com"),
    );
    assert!(matches!(result.unwrap_err().kind, ErrorKind::NotFound { .. }));

    // A failed booking leaves no trace anywhere.
    assert!(restaurant.reservations().is_empty());
    assert!(restaurant.tables().get(&TableId(1)).unwrap().reservations().is_empty());
}

#[test]
fn two_customers_cannot_share_a_table_on_one_date() {
    let mut restaurant = base_restaurant();
    restaurant
        .add_customer(Customer::new("bo@x.com", "Bo").unwrap())
        .unwrap();

    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();
    let result = restaurant.make_reservation(
        ReservationId(2),
        june(15),
        TableId(1),
        &CustomerKey::new("bo@x.com"),
    );

    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::DoubleBooking { .. }
    ));
    // The other table and other dates stay open.
    restaurant
        .make_reservation(
            ReservationId(2),
            june(15),
            TableId(2),
            &CustomerKey::new("bo@x.com"),
        )
        .unwrap();
    restaurant
        .make_reservation(
            ReservationId(3),
            june(16),
            TableId(1),
            &CustomerKey::new("bo@x.com"),
        )
        .unwrap();
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn confirm_then_cancel() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();

    restaurant.confirm_reservation(ReservationId(1)).unwrap();
    assert_eq!(
        restaurant.reservations().get(&ReservationId(1)).unwrap().status(),
        ReservationStatus::Confirmed
    );

    // Confirmed reservations can still be canceled.
    let canceled = restaurant.cancel_reservation(ReservationId(1)).unwrap();
    assert_eq!(canceled.status(), ReservationStatus::Canceled);
    assert!(restaurant.reservations().is_empty());
}

#[test]
fn confirming_twice_fails() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();
    restaurant.confirm_reservation(ReservationId(1)).unwrap();

    let result = restaurant.confirm_reservation(ReservationId(1));
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::InvalidStateTransition { .. }
    ));
}

#[test]
fn canceling_frees_the_slot_for_rebooking() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();
    restaurant.cancel_reservation(ReservationId(1)).unwrap();

    restaurant
        .make_reservation(ReservationId(2), june(15), TableId(1), &ana())
        .unwrap();
    assert_eq!(
        restaurant.tables().get(&TableId(1)).unwrap().reservations(),
        [ReservationId(2)]
    );
}

#[test]
fn canceling_an_unknown_reservation_fails() {
    let mut restaurant = base_restaurant();
    let result = restaurant.cancel_reservation(ReservationId(404));
    assert!(matches!(result.unwrap_err().kind, ErrorKind::NotFound { .. }));
}

// =============================================================================
// Moving
// =============================================================================

#[test]
fn moving_keeps_customer_and_date() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();

    restaurant.move_reservation(ReservationId(1), TableId(2)).unwrap();

    let reservation = restaurant.reservations().get(&ReservationId(1)).unwrap();
    assert_eq!(reservation.table(), Some(TableId(2)));
    assert_eq!(reservation.customer(), Some(&ana()));
    assert_eq!(reservation.date(), june(15));
    assert_eq!(
        restaurant.customers().get(&ana()).unwrap().reservations(),
        [ReservationId(1)]
    );
}

#[test]
fn moving_to_the_same_table_is_rejected() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();

    let result = restaurant.move_reservation(ReservationId(1), TableId(1));
    assert!(matches!(
        result.unwrap_err().kind,
        ErrorKind::Validation { .. }
    ));
}

// =============================================================================
// Cascades
// =============================================================================

#[test]
fn removing_a_table_cancels_every_booking_on_it() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();
    restaurant
        .make_reservation(ReservationId(2), june(16), TableId(1), &ana())
        .unwrap();
    restaurant
        .make_reservation(ReservationId(3), june(15), TableId(2), &ana())
        .unwrap();

    restaurant.remove_table(TableId(1)).unwrap();

    // Only the removed table's bookings are gone.
    assert_eq!(
        restaurant.reservations().keys().collect::<Vec<_>>(),
        vec![ReservationId(3)]
    );
    assert_eq!(
        restaurant.customers().get(&ana()).unwrap().reservations(),
        [ReservationId(3)]
    );
}

#[test]
fn removing_a_customer_cancels_their_bookings() {
    let mut restaurant = base_restaurant();
    restaurant
        .make_reservation(ReservationId(1), june(15), TableId(1), &ana())
        .unwrap();

    restaurant.remove_customer(&ana()).unwrap();

    assert!(restaurant.reservations().is_empty());
    assert!(restaurant.tables().get(&TableId(1)).unwrap().reservations().is_empty());
}
