//! The employee registry.
//!
//! [`EmployeeRegistry`] keeps three parallel sequences (employees,
//! attendance ledgers, compliance ledgers) that are index-aligned: the
//! ledgers at index `i` belong to the employee at index `i`. Every mutation
//! either keeps the three lengths equal or reports
//! [`HrError::RegistrySync`].
//!
//! The registry is an ordinary value owned by its caller and passed by
//! reference; there is no process-wide instance.

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PaymentPolicy;
use crate::error::{HrError, HrResult};
use crate::events::{RateChange, RateListener, RateListeners};
use crate::models::{AttendanceLedger, ComplianceLedger, Employee};

/// Index-synchronized storage for employees and their ledgers.
///
/// # Example
///
/// ```
/// use hr_records::config::PaymentPolicy;
/// use hr_records::models::EmployeeBuilder;
/// use hr_records::registry::EmployeeRegistry;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeBuilder::new("Lia Prado", 35, "lia@example.com")
///     .hourly_rate(Decimal::new(30, 0))
///     .build(&PaymentPolicy::default())
///     .unwrap();
///
/// let mut registry = EmployeeRegistry::new();
/// let index = registry.add(employee).unwrap();
/// assert_eq!(registry.len(), 1);
///
/// registry.remove(index).unwrap();
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct EmployeeRegistry {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceLedger>,
    compliance: Vec<ComplianceLedger>,
    rate_listeners: RateListeners,
}

impl EmployeeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if no employees are registered.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Appends `employee` with fresh ledgers, returning its index.
    ///
    /// Room for the new entry is reserved in all three sequences before any of
    /// them is touched; if that fails, [`HrError::RegistrySync`] is returned and
    /// the registry is left unchanged.
    pub fn add(&mut self, employee: Employee) -> HrResult<usize> {
        self.ensure_synchronized("add")?;
        let index = self.employees.len();

        let reserved = self.employees.try_reserve(1).is_ok()
            && self.attendance.try_reserve(1).is_ok()
            && self.compliance.try_reserve(1).is_ok();
        if !reserved {
            let err = self.sync_error("add");
            warn!(error = %err, "Could not grow registry");
            return Err(err);
        }

        self.employees.push(employee);
        self.attendance.push(AttendanceLedger::new());
        self.compliance.push(ComplianceLedger::new());

        if let Some(added) = self.employees.get(index) {
            info!(employee_id = %added.id, name = %added.name, index, "Employee registered");
        }
        Ok(index)
    }

    /// Removes the employee at `index` together with both ledgers.
    ///
    /// An index outside `[0, len)` fails with [`HrError::IndexOutOfRange`]
    /// and changes nothing. If a ledger removal fails after the employee was
    /// removed, the registry is left as it is and [`HrError::RegistrySync`]
    /// is returned.
    pub fn remove(&mut self, index: usize) -> HrResult<Employee> {
        let len = self.employees.len();
        if index >= len {
            return Err(HrError::index_out_of_range("employees", index, len));
        }

        let employee = self.employees.remove(index);

        if index >= self.attendance.len() {
            let err = self.sync_error("remove");
            warn!(error = %err, "Attendance ledger missing during removal");
            return Err(err);
        }
        self.attendance.remove(index);

        if index >= self.compliance.len() {
            let err = self.sync_error("remove");
            warn!(error = %err, "Compliance ledger missing during removal");
            return Err(err);
        }
        self.compliance.remove(index);

        info!(employee_id = %employee.id, name = %employee.name, index, "Employee removed");
        Ok(employee)
    }

    /// Checks that the three sequences have equal length.
    pub fn ensure_synchronized(&self, operation: &str) -> HrResult<()> {
        let len = self.employees.len();
        if self.attendance.len() == len && self.compliance.len() == len {
            Ok(())
        } else {
            Err(self.sync_error(operation))
        }
    }

    fn sync_error(&self, operation: &str) -> HrError {
        HrError::RegistrySync {
            operation: operation.to_string(),
            employees: self.employees.len(),
            attendance: self.attendance.len(),
            compliance: self.compliance.len(),
        }
    }

    /// All employees in registration order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// The employee at `index`.
    pub fn employee(&self, index: usize) -> HrResult<&Employee> {
        let len = self.employees.len();
        self.employees
            .get(index)
            .ok_or_else(|| HrError::index_out_of_range("employees", index, len))
    }

    /// Mutable access to the employee at `index`.
    ///
    /// The hourly rate is not writable through this reference; use
    /// [`EmployeeRegistry::set_hourly_rate`].
    pub fn employee_mut(&mut self, index: usize) -> HrResult<&mut Employee> {
        let len = self.employees.len();
        self.employees
            .get_mut(index)
            .ok_or_else(|| HrError::index_out_of_range("employees", index, len))
    }

    /// The attendance ledger at `index`.
    pub fn attendance(&self, index: usize) -> HrResult<&AttendanceLedger> {
        let len = self.attendance.len();
        self.attendance
            .get(index)
            .ok_or_else(|| HrError::index_out_of_range("attendance ledgers", index, len))
    }

    /// Mutable access to the attendance ledger at `index`.
    pub fn attendance_mut(&mut self, index: usize) -> HrResult<&mut AttendanceLedger> {
        let len = self.attendance.len();
        self.attendance
            .get_mut(index)
            .ok_or_else(|| HrError::index_out_of_range("attendance ledgers", index, len))
    }

    /// The compliance ledger at `index`.
    pub fn compliance(&self, index: usize) -> HrResult<&ComplianceLedger> {
        let len = self.compliance.len();
        self.compliance
            .get(index)
            .ok_or_else(|| HrError::index_out_of_range("compliance ledgers", index, len))
    }

    /// Mutable access to the compliance ledger at `index`.
    pub fn compliance_mut(&mut self, index: usize) -> HrResult<&mut ComplianceLedger> {
        let len = self.compliance.len();
        self.compliance
            .get_mut(index)
            .ok_or_else(|| HrError::index_out_of_range("compliance ledgers", index, len))
    }

    /// Current index of the employee with `id`.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.employees.iter().position(|e| e.id == id)
    }

    /// Registers a listener for hourly-rate changes.
    pub fn subscribe_rate_changes(&mut self, listener: RateListener) {
        self.rate_listeners.subscribe(listener);
    }

    /// Validates and commits a new hourly rate, then notifies listeners.
    ///
    /// Returns the previous rate. A rejected rate notifies nobody.
    pub fn set_hourly_rate(
        &mut self,
        index: usize,
        rate: Decimal,
        policy: &PaymentPolicy,
    ) -> HrResult<Decimal> {
        let previous_rate = self.employee_mut(index)?.replace_hourly_rate(rate, policy)?;

        let len = self.employees.len();
        let employee = self
            .employees
            .get(index)
            .ok_or_else(|| HrError::index_out_of_range("employees", index, len))?;
        info!(
            employee_id = %employee.id,
            previous_rate = %previous_rate,
            new_rate = %rate,
            "Hourly rate changed"
        );

        let change = RateChange {
            employee,
            previous_rate,
        };
        self.rate_listeners.notify(&change);

        Ok(previous_rate)
    }

    #[cfg(test)]
    fn push_unsynced_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
    }
}
