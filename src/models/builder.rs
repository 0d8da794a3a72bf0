//! Step-by-step employee construction.
//!
//! [`EmployeeBuilder`] collects the fields of a new hire with defaults for
//! everything optional, then validates the lot in [`EmployeeBuilder::build`].
//! [`EmployeeFactory`] maps the numeric menu code onto a role and drives the
//! builder for callers that only have raw form input.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PaymentPolicy;
use crate::error::{HrError, HrResult};

use super::employee::{Employee, Role};

const NOT_ASSIGNED: &str = "Not Assigned";

/// Collects the fields of a new employee.
///
/// # Examples
///
/// ```
/// use hr_records::config::PaymentPolicy;
/// use hr_records::models::{EmployeeBuilder, Role};
/// use rust_decimal::Decimal;
///
/// let manager = EmployeeBuilder::new("Carla Dias", 41, "carla@example.com")
///     .role(Role::Manager)
///     .details("Sales", "Head of Sales", None)
///     .hourly_rate(Decimal::new(60, 0))
///     .team_size(5)
///     .build(&PaymentPolicy::default())
///     .unwrap();
///
/// assert_eq!(manager.work_position, "Manager");
/// assert_eq!(manager.team_size, 5);
/// ```
#[derive(Debug, Clone)]
pub struct EmployeeBuilder {
    name: String,
    age: u32,
    email: String,
    role: Role,
    department: String,
    work_position: String,
    hire_date: Option<NaiveDate>,
    hourly_rate: Decimal,
    team_size: u32,
    mentor: Option<String>,
}

impl EmployeeBuilder {
    /// Starts a builder with the identity fields every employee needs.
    pub fn new(name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
            role: Role::Regular,
            department: NOT_ASSIGNED.to_string(),
            work_position: NOT_ASSIGNED.to_string(),
            hire_date: None,
            hourly_rate: Decimal::ZERO,
            team_size: 0,
            mentor: None,
        }
    }

    /// Sets the role. Defaults to [`Role::Regular`].
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets department, job title and hire date.
    pub fn details(
        mut self,
        department: impl Into<String>,
        work_position: impl Into<String>,
        hire_date: Option<NaiveDate>,
    ) -> Self {
        self.department = department.into();
        self.work_position = work_position.into();
        self.hire_date = hire_date;
        self
    }

    /// Sets the hourly rate. Required: the default of zero fails validation.
    pub fn hourly_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Sets the team size (kept for managers only).
    pub fn team_size(mut self, team_size: u32) -> Self {
        self.team_size = team_size;
        self
    }

    /// Sets the mentor (kept for interns only).
    pub fn mentor(mut self, mentor: impl Into<String>) -> Self {
        self.mentor = Some(mentor.into());
        self
    }

    /// Validates the collected fields and builds the employee.
    pub fn build(self, policy: &PaymentPolicy) -> HrResult<Employee> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(HrError::invalid_employee("name", "must not be blank"));
        }
        if self.age == 0 {
            return Err(HrError::invalid_employee("age", "must be a positive number"));
        }
        let email = self.email.trim();
        if !email.contains('@') {
            return Err(HrError::invalid_employee(
                "email",
                format!("'{}' must contain @", email),
            ));
        }
        let department = self.department.trim();
        if department.is_empty() {
            return Err(HrError::invalid_employee("department", "must not be blank"));
        }
        policy.check_rate(self.hourly_rate)?;

        let work_position = match self.role {
            Role::Manager => "Manager".to_string(),
            Role::Intern => "Intern".to_string(),
            Role::Regular if self.work_position.trim().is_empty() => NOT_ASSIGNED.to_string(),
            Role::Regular => self.work_position.trim().to_string(),
        };

        let mut employee = Employee::new(
            name.to_string(),
            self.age,
            email.to_string(),
            self.role,
            work_position,
            department.to_string(),
            self.hourly_rate,
            self.hire_date,
        );

        match self.role {
            Role::Manager => employee.team_size = self.team_size,
            Role::Intern => employee.mentor = self.mentor.filter(|m| !m.trim().is_empty()),
            Role::Regular => {}
        }

        Ok(employee)
    }
}

/// Raw form input for a new hire.
#[derive(Debug, Clone)]
pub struct NewHire {
    /// Menu code: 1 Regular, 2 Manager, 3 Intern.
    pub type_code: u8,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Contact email.
    pub email: String,
    /// Department.
    pub department: String,
    /// Job title (ignored for managers and interns).
    pub work_position: String,
    /// Hourly rate.
    pub hourly_rate: Decimal,
    /// Date of hire, if known.
    pub hire_date: Option<NaiveDate>,
}

/// Creates employees from raw form input.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeFactory;

impl EmployeeFactory {
    /// Resolves the type code and builds the employee.
    pub fn create(hire: NewHire, policy: &PaymentPolicy) -> HrResult<Employee> {
        let role = Role::from_code(hire.type_code)?;

        EmployeeBuilder::new(hire.name, hire.age, hire.email)
            .role(role)
            .details(hire.department, hire.work_position, hire.hire_date)
            .hourly_rate(hire.hourly_rate)
            .build(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn builder() -> EmployeeBuilder {
        EmployeeBuilder::new("Rafael Lima", 28, "rafael@example.com")
            .details("Engineering", "Developer", None)
            .hourly_rate(dec("40"))
    }

    fn hire(type_code: u8) -> NewHire {
        NewHire {
            type_code,
            name: "Julia Reis".to_string(),
            age: 22,
            email: "julia@example.com".to_string(),
            department: "HR".to_string(),
            work_position: "Recruiter".to_string(),
            hourly_rate: dec("20"),
            hire_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        }
    }

    fn assert_invalid_field(result: HrResult<Employee>, expected: &str) {
        match result {
            Err(HrError::InvalidEmployee { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidEmployee({}), got {:?}", expected, other),
        }
    }

    #[test]
    fn test_build_regular_employee() {
        let employee = builder().build(&PaymentPolicy::default()).unwrap();
        assert_eq!(employee.role, Role::Regular);
        assert_eq!(employee.work_position, "Developer");
        assert_eq!(employee.hourly_rate(), dec("40"));
    }

    #[test]
    fn test_defaults_are_not_assigned() {
        let employee = EmployeeBuilder::new("Rafael Lima", 28, "rafael@example.com")
            .hourly_rate(dec("40"))
            .build(&PaymentPolicy::default())
            .unwrap();
        assert_eq!(employee.department, "Not Assigned");
        assert_eq!(employee.work_position, "Not Assigned");
        assert_eq!(employee.hire_date, None);
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = EmployeeBuilder::new("   ", 28, "x@example.com")
            .hourly_rate(dec("40"))
            .build(&PaymentPolicy::default());
        assert_invalid_field(result, "name");
    }

    #[test]
    fn test_zero_age_rejected() {
        let result = EmployeeBuilder::new("Rafael", 0, "x@example.com")
            .hourly_rate(dec("40"))
            .build(&PaymentPolicy::default());
        assert_invalid_field(result, "age");
    }

    #[test]
    fn test_email_without_at_rejected() {
        let result = EmployeeBuilder::new("Rafael", 28, "rafael.example.com")
            .hourly_rate(dec("40"))
            .build(&PaymentPolicy::default());
        assert_invalid_field(result, "email");
    }

    #[test]
    fn test_missing_rate_rejected() {
        let result = EmployeeBuilder::new("Rafael", 28, "rafael@example.com")
            .build(&PaymentPolicy::default());
        assert!(matches!(result, Err(HrError::InvalidRate { .. })));
    }

    #[test]
    fn test_rate_above_bound_rejected() {
        let result = builder()
            .hourly_rate(dec("10000.01"))
            .build(&PaymentPolicy::default());
        assert!(matches!(result, Err(HrError::InvalidRate { .. })));
    }

    #[test]
    fn test_intern_keeps_mentor_and_fixed_position() {
        let intern = builder()
            .role(Role::Intern)
            .mentor("Carla")
            .team_size(3)
            .build(&PaymentPolicy::default())
            .unwrap();
        assert_eq!(intern.work_position, "Intern");
        assert_eq!(intern.mentor.as_deref(), Some("Carla"));
        assert_eq!(intern.team_size, 0);
    }

    #[test]
    fn test_factory_maps_type_codes() {
        let policy = PaymentPolicy::default();
        assert_eq!(EmployeeFactory::create(hire(1), &policy).unwrap().role, Role::Regular);
        assert_eq!(EmployeeFactory::create(hire(2), &policy).unwrap().role, Role::Manager);
        assert_eq!(EmployeeFactory::create(hire(3), &policy).unwrap().role, Role::Intern);
    }

    #[test]
    fn test_factory_rejects_unknown_type_code() {
        let result = EmployeeFactory::create(hire(7), &PaymentPolicy::default());
        assert!(matches!(result, Err(HrError::InvalidEmployeeType { code: 7 })));
    }

    #[test]
    fn test_each_build_gets_a_fresh_id() {
        let policy = PaymentPolicy::default();
        let a = builder().build(&policy).unwrap();
        let b = builder().build(&policy).unwrap();
        assert_ne!(a.id, b.id);
    }
}
