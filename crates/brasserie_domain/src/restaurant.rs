//! The application context.
//!
//! [`Restaurant`] owns one extent per entity type and is the only writer of
//! association fields. Every operation validates against the current extents
//! before mutating, and every mutation goes through the registry's
//! association primitives, so both halves of a relation always agree.

use brasserie_foundation::{Error, Result};
use brasserie_registry::{links, Entity, ExtentStore};
use chrono::{DateTime, NaiveDate, Utc};

use crate::billing::{Payment, PaymentStatus};
use crate::dining::{Customer, Reservation, Table};
use crate::keys::{
    CustomerKey, DishKey, EmployeeId, MenuKey, OrderId, OrderLineId, PaymentId, ReservationId,
    TableId, WorkDetailsId,
};
use crate::menu::{Dish, Menu};
use crate::orders::{Order, OrderLine};
use crate::staff::{Employee, StaffRole, WorkDetails};

/// The restaurant: one extent per entity type plus the operations that keep
/// the association graph consistent.
#[derive(Debug, Default)]
pub struct Restaurant {
    tables: ExtentStore<Table>,
    customers: ExtentStore<Customer>,
    reservations: ExtentStore<Reservation>,
    menus: ExtentStore<Menu>,
    dishes: ExtentStore<Dish>,
    orders: ExtentStore<Order>,
    order_lines: ExtentStore<OrderLine>,
    employees: ExtentStore<Employee>,
    work_details: ExtentStore<WorkDetails>,
    payments: ExtentStore<Payment>,
}

impl Restaurant {
    /// Creates a restaurant with empty extents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- extent access ------------------------------------------------------

    /// The table extent.
    #[must_use]
    pub fn tables(&self) -> &ExtentStore<Table> {
        &self.tables
    }

    /// Mutable table extent. Snapshot-layer and test path; production code
    /// mutates through the operations below.
    pub fn tables_mut(&mut self) -> &mut ExtentStore<Table> {
        &mut self.tables
    }

    /// The customer extent.
    #[must_use]
    pub fn customers(&self) -> &ExtentStore<Customer> {
        &self.customers
    }

    /// Mutable customer extent. Snapshot-layer and test path.
    pub fn customers_mut(&mut self) -> &mut ExtentStore<Customer> {
        &mut self.customers
    }

    /// The reservation extent.
    #[must_use]
    pub fn reservations(&self) -> &ExtentStore<Reservation> {
        &self.reservations
    }

    /// Mutable reservation extent. Snapshot-layer and test path.
    pub fn reservations_mut(&mut self) -> &mut ExtentStore<Reservation> {
        &mut self.reservations
    }

    /// The menu extent.
    #[must_use]
    pub fn menus(&self) -> &ExtentStore<Menu> {
        &self.menus
    }

    /// Mutable menu extent. Snapshot-layer and test path.
    pub fn menus_mut(&mut self) -> &mut ExtentStore<Menu> {
        &mut self.menus
    }

    /// The dish extent.
    #[must_use]
    pub fn dishes(&self) -> &ExtentStore<Dish> {
        &self.dishes
    }

    /// Mutable dish extent. Snapshot-layer and test path.
    pub fn dishes_mut(&mut self) -> &mut ExtentStore<Dish> {
        &mut self.dishes
    }

    /// The order extent.
    #[must_use]
    pub fn orders(&self) -> &ExtentStore<Order> {
        &self.orders
    }

    /// Mutable order extent. Snapshot-layer and test path.
    pub fn orders_mut(&mut self) -> &mut ExtentStore<Order> {
        &mut self.orders
    }

    /// The order line extent.
    #[must_use]
    pub fn order_lines(&self) -> &ExtentStore<OrderLine> {
        &self.order_lines
    }

    /// Mutable order line extent. Snapshot-layer and test path.
    pub fn order_lines_mut(&mut self) -> &mut ExtentStore<OrderLine> {
        &mut self.order_lines
    }

    /// The employee extent.
    #[must_use]
    pub fn employees(&self) -> &ExtentStore<Employee> {
        &self.employees
    }

    /// Mutable employee extent. Snapshot-layer and test path.
    pub fn employees_mut(&mut self) -> &mut ExtentStore<Employee> {
        &mut self.employees
    }

    /// The work details extent.
    #[must_use]
    pub fn work_details(&self) -> &ExtentStore<WorkDetails> {
        &self.work_details
    }

    /// Mutable work details extent. Snapshot-layer and test path.
    pub fn work_details_mut(&mut self) -> &mut ExtentStore<WorkDetails> {
        &mut self.work_details
    }

    /// The payment extent.
    #[must_use]
    pub fn payments(&self) -> &ExtentStore<Payment> {
        &self.payments
    }

    /// Mutable payment extent. Snapshot-layer and test path.
    pub fn payments_mut(&mut self) -> &mut ExtentStore<Payment> {
        &mut self.payments
    }

    // -- registration -------------------------------------------------------

    /// Registers a table.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the table id is taken.
    pub fn add_table(&mut self, table: Table) -> Result<()> {
        self.tables.register(table)
    }

    /// Registers a customer.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the email is taken.
    pub fn add_customer(&mut self, customer: Customer) -> Result<()> {
        self.customers.register(customer)
    }

    /// Registers a menu.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the menu name is taken.
    pub fn add_menu(&mut self, menu: Menu) -> Result<()> {
        self.menus.register(menu)
    }

    /// Registers a dish.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the dish name is taken.
    pub fn add_dish(&mut self, dish: Dish) -> Result<()> {
        self.dishes.register(dish)
    }

    /// Registers an employee.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the employee id is taken.
    pub fn hire_employee(&mut self, employee: Employee) -> Result<()> {
        self.employees.register(employee)
    }

    /// Registers a work details record, not yet linked to any employee.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the record id is taken.
    pub fn add_work_details(&mut self, details: WorkDetails) -> Result<()> {
        self.work_details.register(details)
    }

    // -- reservations -------------------------------------------------------

    /// Creates a pending reservation of `table` by `customer` on `date`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the table or customer is absent, `DoubleBooking`
    /// if the table already has a live reservation on the date, or
    /// `DuplicateKey` if the reservation id is taken.
    pub fn make_reservation(
        &mut self,
        id: ReservationId,
        date: NaiveDate,
        table_id: TableId,
        customer_key: &CustomerKey,
    ) -> Result<()> {
        if !self.tables.contains(&table_id) {
            return Err(Error::not_found(Table::NAME, table_id.to_string()));
        }
        if !self.customers.contains(customer_key) {
            return Err(Error::not_found(Customer::NAME, customer_key.to_string()));
        }
        if self
            .reservations
            .iter()
            .any(|r| r.table == Some(table_id) && r.date == date)
        {
            return Err(Error::double_booking(table_id.to_string(), date.to_string()));
        }

        self.reservations.register(Reservation::new(id, date))?;
        // Fresh reservation, both attaches cannot fail.
        let reservation = self.reservations.get_mut(&id)?;
        let table = self.tables.get_mut(&table_id)?;
        links::attach(&mut table.reservations, &mut reservation.table, &table_id, &id)?;
        let customer = self.customers.get_mut(customer_key)?;
        links::attach(
            &mut customer.reservations,
            &mut reservation.customer,
            customer_key,
            &id,
        )?;
        Ok(())
    }

    /// Confirms a pending reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation is absent, or
    /// `InvalidStateTransition` unless it is pending.
    pub fn confirm_reservation(&mut self, id: ReservationId) -> Result<()> {
        self.reservations.get_mut(&id)?.confirm()
    }

    /// Cancels a reservation: marks it canceled, detaches it from its table
    /// and customer, and removes it from the extent. The canceled record is
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation is absent.
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Result<Reservation> {
        let reservation = self.reservations.get_mut(&id)?;
        reservation.mark_canceled()?;

        if let Some(table_id) = reservation.table {
            let table = self.tables.get_mut(&table_id)?;
            links::detach(&mut table.reservations, &mut reservation.table, &table_id, &id)?;
        }
        if let Some(customer_key) = reservation.customer.clone() {
            let customer = self.customers.get_mut(&customer_key)?;
            links::detach(
                &mut customer.reservations,
                &mut reservation.customer,
                &customer_key,
                &id,
            )?;
        }
        self.reservations.unregister(&id)
    }

    /// Moves a reservation to a different table, keeping its date and
    /// customer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reservation or target table is absent,
    /// `Validation` if the target is the current table, or `DoubleBooking`
    /// if the target already has a reservation on the date.
    pub fn move_reservation(&mut self, id: ReservationId, new_table: TableId) -> Result<()> {
        if !self.tables.contains(&new_table) {
            return Err(Error::not_found(Table::NAME, new_table.to_string()));
        }
        let reservation = self.reservations.get(&id)?;
        let date = reservation.date;
        let Some(old_table) = reservation.table else {
            return Err(Error::not_attached(format!(
                "reservation {id} has no table"
            )));
        };
        if old_table == new_table {
            return Err(Error::validation(format!(
                "reservation {id} is already at table {new_table}"
            )));
        }
        if self
            .reservations
            .iter()
            .any(|r| r.id != id && r.table == Some(new_table) && r.date == date)
        {
            return Err(Error::double_booking(new_table.to_string(), date.to_string()));
        }

        let reservation = self.reservations.get_mut(&id)?;
        let table = self.tables.get_mut(&old_table)?;
        links::detach(&mut table.reservations, &mut reservation.table, &old_table, &id)?;
        let table = self.tables.get_mut(&new_table)?;
        links::attach(&mut table.reservations, &mut reservation.table, &new_table, &id)
    }

    /// Removes a table, canceling every reservation attached to it first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the table is absent.
    pub fn remove_table(&mut self, id: TableId) -> Result<Table> {
        let pending: Vec<ReservationId> = self.tables.get(&id)?.reservations.clone();
        for reservation_id in pending {
            self.cancel_reservation(reservation_id)?;
        }
        self.tables.unregister(&id)
    }

    // -- customers ----------------------------------------------------------

    /// Removes a customer, canceling their reservations and unpaid orders
    /// and detaching their payments. Payment records stay in the extent as
    /// financial history.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer is absent, or `Validation` if any
    /// of the customer's orders has been paid.
    pub fn remove_customer(&mut self, key: &CustomerKey) -> Result<Customer> {
        let customer = self.customers.get(key)?;
        for order_id in &customer.orders {
            if self.orders.get(order_id)?.paid {
                return Err(Error::validation(format!(
                    "customer {key} has a paid order and cannot be removed"
                )));
            }
        }

        let reservations = customer.reservations.clone();
        let orders = customer.orders.clone();
        let payments = customer.payments.clone();
        for reservation_id in reservations {
            self.cancel_reservation(reservation_id)?;
        }
        for order_id in orders {
            self.cancel_order(order_id)?;
        }
        for payment_id in payments {
            let customer = self.customers.get_mut(key)?;
            let payment = self.payments.get_mut(&payment_id)?;
            links::detach(&mut customer.payments, &mut payment.customer, key, &payment_id)?;
        }
        self.customers.unregister(key)
    }

    // -- menus and dishes ---------------------------------------------------

    /// Attaches a dish to a menu.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either is absent, or `AlreadyAttached` if the
    /// dish is already on a menu.
    pub fn attach_dish(&mut self, menu_key: &MenuKey, dish_key: &DishKey) -> Result<()> {
        let menu = self.menus.get_mut(menu_key)?;
        let dish = self.dishes.get_mut(dish_key)?;
        links::attach(&mut menu.dishes, &mut dish.menu, menu_key, dish_key)
    }

    /// Detaches a dish from a menu, dropping any special binding that names
    /// the dish.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either is absent, or `NotAttached` if the dish
    /// is not on this menu.
    pub fn detach_dish(&mut self, menu_key: &MenuKey, dish_key: &DishKey) -> Result<()> {
        let menu = self.menus.get_mut(menu_key)?;
        let dish = self.dishes.get_mut(dish_key)?;
        links::detach(&mut menu.dishes, &mut dish.menu, menu_key, dish_key)?;
        menu.specials.retain(|_, bound| bound != dish_key);
        Ok(())
    }

    /// Binds a dish under a qualifier ("Special", "Seasonal", ...) on a menu
    /// the dish is already attached to.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the menu or dish is absent, `Validation` if the
    /// dish is not on the menu, `DuplicateQualifier` if the qualifier is in
    /// use, or `AlreadyBound` if the dish already has a qualifier.
    pub fn bind_special(
        &mut self,
        menu_key: &MenuKey,
        qualifier: &str,
        dish_key: &DishKey,
    ) -> Result<()> {
        if !self.dishes.contains(dish_key) {
            return Err(Error::not_found(Dish::NAME, dish_key.to_string()));
        }
        let menu = self.menus.get_mut(menu_key)?;
        if !menu.dishes.contains(dish_key) {
            return Err(Error::validation(format!(
                "dish {dish_key} is not on menu {menu_key}"
            )));
        }
        links::bind(&mut menu.specials, qualifier, dish_key)
    }

    /// Removes a qualifier binding from a menu, returning the dish that was
    /// bound. The dish stays attached to the menu.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the menu is absent, or `UnknownQualifier` if
    /// the qualifier has no binding.
    pub fn unbind_special(&mut self, menu_key: &MenuKey, qualifier: &str) -> Result<DishKey> {
        let menu = self.menus.get_mut(menu_key)?;
        links::unbind(&mut menu.specials, qualifier)
    }

    /// Removes a dish that no order line references, detaching it from its
    /// menu first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the dish is absent, or `Validation` if order
    /// lines still reference it.
    pub fn remove_dish(&mut self, key: &DishKey) -> Result<Dish> {
        let dish = self.dishes.get(key)?;
        if !dish.lines.is_empty() {
            return Err(Error::validation(format!(
                "dish {key} is referenced by order lines and cannot be removed"
            )));
        }
        if let Some(menu_key) = dish.menu.clone() {
            self.detach_dish(&menu_key, key)?;
        }
        self.dishes.unregister(key)
    }

    /// Removes a menu, detaching every dish on it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the menu is absent.
    pub fn remove_menu(&mut self, key: &MenuKey) -> Result<Menu> {
        let attached: Vec<DishKey> = self.menus.get(key)?.dishes.clone();
        for dish_key in attached {
            self.detach_dish(key, &dish_key)?;
        }
        self.menus.unregister(key)
    }

    // -- orders -------------------------------------------------------------

    /// Places a new empty order for a customer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer is absent, or `DuplicateKey` if
    /// the order id is taken.
    pub fn place_order(
        &mut self,
        id: OrderId,
        placed_at: DateTime<Utc>,
        customer_key: &CustomerKey,
    ) -> Result<()> {
        if !self.customers.contains(customer_key) {
            return Err(Error::not_found(Customer::NAME, customer_key.to_string()));
        }
        self.orders.register(Order::new(id, placed_at))?;
        let order = self.orders.get_mut(&id)?;
        let customer = self.customers.get_mut(customer_key)?;
        links::attach(&mut customer.orders, &mut order.customer, customer_key, &id)
    }

    /// Adds a dish to an unpaid order, returning the id of the affected
    /// line. Ordering the same dish again aggregates onto the existing line
    /// instead of creating a second one; the unit price stays as captured
    /// when the line was first created.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order or dish is absent,
    /// `InvalidStateTransition` if the order is paid, or `Validation` if the
    /// quantity is zero or the aggregated quantity would overflow.
    pub fn add_to_order(
        &mut self,
        order_id: OrderId,
        dish_key: &DishKey,
        quantity: u32,
    ) -> Result<OrderLineId> {
        if quantity == 0 {
            return Err(Error::validation("order line quantity must be positive"));
        }
        let order = self.orders.get(&order_id)?;
        if order.paid {
            return Err(Error::invalid_transition("Order", "Paid", "Amended"));
        }
        let unit_price = self.dishes.get(dish_key)?.price;

        // Aggregate onto an existing line for the same dish.
        for line_id in &order.lines {
            let line = self.order_lines.get(line_id)?;
            if line.dish.as_ref() == Some(dish_key) {
                let line_id = *line_id;
                let line = self.order_lines.get_mut(&line_id)?;
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| Error::validation("order line quantity overflows"))?;
                return Ok(line_id);
            }
        }

        let line_id = self.next_order_line_id();
        self.order_lines
            .register(OrderLine::new(line_id, quantity, unit_price)?)?;
        let line = self.order_lines.get_mut(&line_id)?;
        let order = self.orders.get_mut(&order_id)?;
        links::attach(&mut order.lines, &mut line.order, &order_id, &line_id)?;
        let dish = self.dishes.get_mut(dish_key)?;
        links::attach(&mut dish.lines, &mut line.dish, dish_key, &line_id)?;
        Ok(line_id)
    }

    /// Removes a line from an unpaid order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the line is absent, or `InvalidStateTransition`
    /// if its order is paid.
    pub fn remove_order_line(&mut self, line_id: OrderLineId) -> Result<()> {
        let line = self.order_lines.get(&line_id)?;
        if let Some(order_id) = line.order {
            if self.orders.get(&order_id)?.paid {
                return Err(Error::invalid_transition("Order", "Paid", "Amended"));
            }
        }

        let line = self.order_lines.get_mut(&line_id)?;
        if let Some(order_id) = line.order {
            let order = self.orders.get_mut(&order_id)?;
            links::detach(&mut order.lines, &mut line.order, &order_id, &line_id)?;
        }
        if let Some(dish_key) = line.dish.clone() {
            let dish = self.dishes.get_mut(&dish_key)?;
            links::detach(&mut dish.lines, &mut line.dish, &dish_key, &line_id)?;
        }
        self.order_lines.unregister(&line_id)?;
        Ok(())
    }

    /// Sums an order's line subtotals.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is absent.
    pub fn order_total(&self, order_id: OrderId) -> Result<f64> {
        let order = self.orders.get(&order_id)?;
        let mut total = 0.0;
        for line_id in &order.lines {
            total += self.order_lines.get(line_id)?.subtotal();
        }
        Ok(total)
    }

    /// Settles an unpaid order with a pending payment: registers the
    /// payment, completes it, attaches it to the ordering customer, and
    /// marks the order paid. One-way; a paid order never becomes unpaid.
    /// Every check runs before the payment is registered, so a rejected
    /// settlement leaves the extents untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is absent, `InvalidStateTransition`
    /// if it is already paid or the payment is not pending, `Validation` if
    /// the order is empty or the payment amount does not cover the total,
    /// or `DuplicateKey` if the payment id is taken.
    pub fn pay_order(&mut self, order_id: OrderId, payment: Payment) -> Result<()> {
        let order = self.orders.get(&order_id)?;
        if order.paid {
            return Err(Error::invalid_transition("Order", "Paid", "Paid"));
        }
        if order.lines.is_empty() {
            return Err(Error::validation(format!("order {order_id} has no lines")));
        }
        let total = self.order_total(order_id)?;
        if payment.amount < total {
            return Err(Error::validation(format!(
                "payment of {} does not cover order total {total}",
                payment.amount
            )));
        }
        if payment.status() != PaymentStatus::Pending {
            return Err(Error::invalid_transition(
                "Payment",
                payment.status().name(),
                PaymentStatus::Completed.name(),
            ));
        }
        let payment_id = payment.id;
        let customer_key = self.orders.get(&order_id)?.customer.clone();

        self.payments.register(payment)?;
        let payment = self.payments.get_mut(&payment_id)?;
        payment.complete()?;
        if let Some(customer_key) = customer_key {
            let customer = self.customers.get_mut(&customer_key)?;
            links::attach(
                &mut customer.payments,
                &mut payment.customer,
                &customer_key,
                &payment_id,
            )?;
        }
        self.orders.get_mut(&order_id)?.mark_paid()
    }

    /// Cancels an unpaid order: removes its lines, detaches it from its
    /// customer, and removes it from the extent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is absent, or `InvalidStateTransition`
    /// if it has been paid.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<Order> {
        let order = self.orders.get(&order_id)?;
        if order.paid {
            return Err(Error::invalid_transition("Order", "Paid", "Canceled"));
        }
        let lines = order.lines.clone();
        for line_id in lines {
            self.remove_order_line(line_id)?;
        }
        let order = self.orders.get_mut(&order_id)?;
        if let Some(customer_key) = order.customer.clone() {
            let customer = self.customers.get_mut(&customer_key)?;
            links::detach(&mut customer.orders, &mut order.customer, &customer_key, &order_id)?;
        }
        self.orders.unregister(&order_id)
    }

    // -- payments -----------------------------------------------------------

    /// Completes a pending payment that was registered outside the order
    /// settlement path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the payment is absent, or
    /// `InvalidStateTransition` unless it is pending.
    pub fn complete_payment(&mut self, id: PaymentId) -> Result<()> {
        self.payments.get_mut(&id)?.complete()
    }

    /// Refunds a completed payment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the payment is absent, `InvalidStateTransition`
    /// unless it is completed, or `Validation` if the amount is out of
    /// bounds.
    pub fn refund_payment(&mut self, id: PaymentId, amount: f64) -> Result<()> {
        self.payments.get_mut(&id)?.refund(amount)
    }

    // -- staff --------------------------------------------------------------

    /// Links an employee to an unassigned work details record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either is absent, or `AlreadyLinked` if either
    /// side already has a partner. Reassignment goes through
    /// [`Self::unassign_work_details`] first.
    pub fn assign_work_details(
        &mut self,
        employee_id: EmployeeId,
        details_id: WorkDetailsId,
    ) -> Result<()> {
        let employee = self.employees.get_mut(&employee_id)?;
        let details = self.work_details.get_mut(&details_id)?;
        links::link(
            &mut employee.work_details,
            &mut details.employee,
            &employee_id,
            &details_id,
        )
    }

    /// Unlinks an employee from their work details record. The record stays
    /// in the extent for reassignment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either is absent, or `NotLinked` unless the two
    /// currently name each other.
    pub fn unassign_work_details(
        &mut self,
        employee_id: EmployeeId,
        details_id: WorkDetailsId,
    ) -> Result<()> {
        let employee = self.employees.get_mut(&employee_id)?;
        let details = self.work_details.get_mut(&details_id)?;
        links::unlink(
            &mut employee.work_details,
            &mut details.employee,
            &employee_id,
            &details_id,
        )
    }

    /// Puts an employee under a manager's supervision. Both ends live in the
    /// employee extent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either is absent, `Validation` if the
    /// supervisor is not a manager or supervises themselves, or
    /// `AlreadyAttached` if the report already has a supervisor.
    pub fn supervise(&mut self, manager_id: EmployeeId, report_id: EmployeeId) -> Result<()> {
        if self.employees.get(&manager_id)?.role != StaffRole::Manager {
            return Err(Error::validation(format!(
                "employee {manager_id} is not a manager"
            )));
        }
        let (manager, report) = self.employees.get_pair_mut(&manager_id, &report_id)?;
        links::attach(
            &mut manager.supervised,
            &mut report.supervisor,
            &manager_id,
            &report_id,
        )
    }

    /// Removes an employee from a manager's supervision.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either is absent, or `NotAttached` unless this
    /// manager supervises this report.
    pub fn unsupervise(&mut self, manager_id: EmployeeId, report_id: EmployeeId) -> Result<()> {
        let (manager, report) = self.employees.get_pair_mut(&manager_id, &report_id)?;
        links::detach(
            &mut manager.supervised,
            &mut report.supervisor,
            &manager_id,
            &report_id,
        )
    }

    /// Records an employee's date of leaving without removing them.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee is absent, or `Validation` if a
    /// leaving date is already recorded.
    pub fn record_departure(&mut self, id: EmployeeId, left_on: NaiveDate) -> Result<()> {
        let employee = self.employees.get_mut(&id)?;
        if employee.left_on.is_some() {
            return Err(Error::validation(format!(
                "employee {id} already has a leaving date"
            )));
        }
        employee.left_on = Some(left_on);
        Ok(())
    }

    /// Retires an employee: severs supervision in both directions, removes
    /// their work details record, and removes them from the extent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee is absent.
    pub fn retire_employee(&mut self, id: EmployeeId) -> Result<Employee> {
        let employee = self.employees.get(&id)?;
        let supervisor = employee.supervisor;
        let reports = employee.supervised.clone();
        let details_id = employee.work_details;

        if let Some(manager_id) = supervisor {
            self.unsupervise(manager_id, id)?;
        }
        for report_id in reports {
            self.unsupervise(id, report_id)?;
        }
        if let Some(details_id) = details_id {
            self.unassign_work_details(id, details_id)?;
            self.work_details.unregister(&details_id)?;
        }
        self.employees.unregister(&id)
    }

    // -- helpers ------------------------------------------------------------

    /// Allocates the next order line id: one past the highest live id. Safe
    /// across snapshot reloads because the extent itself is the counter.
    fn next_order_line_id(&self) -> OrderLineId {
        OrderLineId(
            self.order_lines
                .keys()
                .map(|k| k.0)
                .max()
                .map_or(1, |max| max + 1),
        )
    }
}
