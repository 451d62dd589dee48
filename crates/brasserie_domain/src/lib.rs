//! Restaurant domain model for Brasserie.
//!
//! This crate provides:
//! - The entity types: tables, customers, reservations, menus, dishes,
//!   orders, order lines, employees, work details, and payments
//! - [`Restaurant`] - The application context owning one extent per type
//!   and routing every association mutation through the registry protocol

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod billing;
mod dining;
mod keys;
mod menu;
mod orders;
mod restaurant;
mod staff;

pub use billing::{Payment, PaymentMethod, PaymentStatus};
pub use dining::{Customer, Reservation, ReservationStatus, Table};
pub use keys::{
    CustomerKey, DishKey, EmployeeId, MenuKey, OrderId, OrderLineId, PaymentId, ReservationId,
    TableId, WorkDetailsId,
};
pub use menu::{Dish, Menu};
pub use orders::{Order, OrderLine};
pub use restaurant::Restaurant;
pub use staff::{Employee, StaffRole, WorkDetails};
