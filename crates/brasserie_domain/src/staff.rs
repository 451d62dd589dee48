//! Employees and work details.
//!
//! Employees pair one-to-one with their work details and supervise each
//! other reflexively: a manager's supervised list and each report's
//! supervisor pointer are two halves of the same relation inside a single
//! extent.

use brasserie_foundation::{Error, Result};
use brasserie_registry::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::keys::{EmployeeId, WorkDetailsId};

/// Staff roles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    /// Kitchen staff.
    Chef,
    /// Floor staff.
    Waiter,
    /// Supervises other employees.
    Manager,
    /// Parking attendant.
    Valet,
}

/// An employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub(crate) id: EmployeeId,
    pub(crate) name: String,
    pub(crate) role: StaffRole,
    pub(crate) left_on: Option<NaiveDate>,
    /// One-to-one partner.
    pub(crate) work_details: Option<WorkDetailsId>,
    /// Reflexive back-pointer: the supervising manager, at most one.
    pub(crate) supervisor: Option<EmployeeId>,
    /// Reflexive forward collection: employees this one supervises.
    pub(crate) supervised: Vec<EmployeeId>,
}

impl Employee {
    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name is empty.
    pub fn new(id: EmployeeId, name: impl Into<String>, role: StaffRole) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::validation("employee name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            role,
            left_on: None,
            work_details: None,
            supervisor: None,
            supervised: Vec::new(),
        })
    }

    /// This employee's identity.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Staff role.
    #[must_use]
    pub fn role(&self) -> StaffRole {
        self.role
    }

    /// Date of leaving, if set.
    #[must_use]
    pub fn left_on(&self) -> Option<NaiveDate> {
        self.left_on
    }

    /// The linked work details, if any.
    #[must_use]
    pub fn work_details(&self) -> Option<WorkDetailsId> {
        self.work_details
    }

    /// The supervising manager, if any.
    #[must_use]
    pub fn supervisor(&self) -> Option<EmployeeId> {
        self.supervisor
    }

    /// Supervised employees in attachment order.
    #[must_use]
    pub fn supervised(&self) -> &[EmployeeId] {
        &self.supervised
    }
}

impl Entity for Employee {
    type Key = EmployeeId;
    const NAME: &'static str = "Employee";

    fn key(&self) -> EmployeeId {
        self.id
    }
}

/// Employment details: hire date, department, shift.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkDetails {
    pub(crate) id: WorkDetailsId,
    pub(crate) hired_on: NaiveDate,
    pub(crate) department: String,
    pub(crate) shift: String,
    /// One-to-one partner.
    pub(crate) employee: Option<EmployeeId>,
}

impl WorkDetails {
    /// Creates work details.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the department or shift is empty.
    pub fn new(
        id: WorkDetailsId,
        hired_on: NaiveDate,
        department: impl Into<String>,
        shift: impl Into<String>,
    ) -> Result<Self> {
        let department = department.into();
        let shift = shift.into();
        if department.trim().is_empty() {
            return Err(Error::validation("department cannot be empty"));
        }
        if shift.trim().is_empty() {
            return Err(Error::validation("shift schedule cannot be empty"));
        }
        Ok(Self {
            id,
            hired_on,
            department,
            shift,
            employee: None,
        })
    }

    /// This record's identity.
    #[must_use]
    pub fn id(&self) -> WorkDetailsId {
        self.id
    }

    /// Hire date.
    #[must_use]
    pub fn hired_on(&self) -> NaiveDate {
        self.hired_on
    }

    /// Department name.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Shift schedule label.
    #[must_use]
    pub fn shift(&self) -> &str {
        &self.shift
    }

    /// The linked employee, if any.
    #[must_use]
    pub fn employee(&self) -> Option<EmployeeId> {
        self.employee
    }

    /// Days employed as of `today`, bounded by the employee's date of
    /// leaving when set.
    #[must_use]
    pub fn employment_days(&self, today: NaiveDate, left_on: Option<NaiveDate>) -> i64 {
        let end = left_on.unwrap_or(today);
        (end - self.hired_on).num_days()
    }
}

impl Entity for WorkDetails {
    type Key = WorkDetailsId;
    const NAME: &'static str = "WorkDetails";

    fn key(&self) -> WorkDetailsId {
        self.id
    }
}
