//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct and the [`Role`] tag used to
//! distinguish regular staff, managers and interns. Behaviour that differs
//! by role dispatches on the tag with `match`.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PaymentPolicy;
use crate::error::{HrError, HrResult};

use super::development::{LeaveRequest, PerformanceLevel, TrainingSession};

/// The employee's role classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular employee.
    Regular,
    /// A manager; receives the manager bonus.
    Manager,
    /// An intern.
    Intern,
}

impl Role {
    /// Maps the menu code (1 Regular, 2 Manager, 3 Intern) to a role.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_records::models::Role;
    ///
    /// assert_eq!(Role::from_code(2).unwrap(), Role::Manager);
    /// assert!(Role::from_code(9).is_err());
    /// ```
    pub fn from_code(code: u8) -> HrResult<Self> {
        match code {
            1 => Ok(Role::Regular),
            2 => Ok(Role::Manager),
            3 => Ok(Role::Intern),
            _ => Err(HrError::InvalidEmployeeType { code }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Regular => "Regular",
            Role::Manager => "Manager",
            Role::Intern => "Intern",
        };
        f.write_str(label)
    }
}

/// An employee record.
///
/// Employees are created through [`EmployeeBuilder`](super::EmployeeBuilder),
/// which validates every field. The hourly rate can only change through
/// the registry so that rate-change listeners are always notified.
/// Records serialize for export but are never read back from untrusted data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    /// Unique identifier, used by the organisation hierarchy.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Contact email.
    pub email: String,
    /// Role classification.
    pub role: Role,
    /// Job title.
    pub work_position: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Date of hire, if known.
    pub hire_date: Option<NaiveDate>,
    /// Size of the team a manager leads. Zero for other roles.
    pub team_size: u32,
    /// Name of an intern's mentor.
    pub mentor: Option<String>,
    pub(crate) hourly_rate: Decimal,
    benefits: Vec<String>,
    training: Vec<TrainingSession>,
    performance: Vec<PerformanceLevel>,
    leave_requests: Vec<LeaveRequest>,
}

impl Employee {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        age: u32,
        email: String,
        role: Role,
        work_position: String,
        department: String,
        hourly_rate: Decimal,
        hire_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            age,
            email,
            role,
            work_position,
            department,
            hire_date,
            team_size: 0,
            mentor: None,
            hourly_rate,
            benefits: Vec::new(),
            training: Vec::new(),
            performance: Vec::new(),
            leave_requests: Vec::new(),
        }
    }

    /// The current hourly rate.
    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    /// Replaces the hourly rate after validating it, returning the previous one.
    pub(crate) fn replace_hourly_rate(
        &mut self,
        rate: Decimal,
        policy: &PaymentPolicy,
    ) -> HrResult<Decimal> {
        policy.check_rate(rate)?;
        Ok(std::mem::replace(&mut self.hourly_rate, rate))
    }

    /// Short role description, e.g. `"Manager - Sales Department"`.
    pub fn role_label(&self) -> String {
        match self.role {
            Role::Regular => format!("Employee - {}", self.work_position),
            Role::Manager => format!("Manager - {} Department", self.department),
            Role::Intern => format!("Intern - {} Department", self.department),
        }
    }

    /// Multi-line summary of the employee, including role-specific lines.
    pub fn describe(&self) -> String {
        let hire_date = self
            .hire_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Not Defined".to_string());
        let benefits = if self.benefits.is_empty() {
            "None".to_string()
        } else {
            self.benefits.join(", ")
        };

        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("Age: {}", self.age),
            format!("Email: {}", self.email),
            format!("Department: {}", self.department),
            format!("Position: {}", self.work_position),
            format!("Salary per hour: {:.2}", self.hourly_rate),
            format!("Hire Date: {}", hire_date),
            format!("Benefits: {}", benefits),
        ];

        match self.role {
            Role::Manager => lines.push(format!("Team Size: {}", self.team_size)),
            Role::Intern => lines.push(format!(
                "Mentor: {}",
                self.mentor.as_deref().unwrap_or("Not assigned")
            )),
            Role::Regular => {}
        }

        lines.push(format!("Role: {}", self.role_label()));
        lines.join("\n")
    }

    /// Schedules a training session.
    pub fn add_training(&mut self, session: TrainingSession) -> HrResult<()> {
        if session.description.trim().is_empty() {
            return Err(HrError::invalid_employee(
                "training.description",
                "must not be blank",
            ));
        }
        self.training.push(session);
        Ok(())
    }

    /// Removes the training session at `index`.
    pub fn remove_training(&mut self, index: usize) -> HrResult<TrainingSession> {
        checked_remove(&mut self.training, "training sessions", index)
    }

    /// Scheduled training sessions.
    pub fn training(&self) -> &[TrainingSession] {
        &self.training
    }

    /// Records a performance evaluation.
    pub fn add_performance_evaluation(&mut self, level: PerformanceLevel) {
        self.performance.push(level);
    }

    /// Removes the evaluation at `index`.
    pub fn remove_performance_evaluation(&mut self, index: usize) -> HrResult<PerformanceLevel> {
        checked_remove(&mut self.performance, "performance evaluations", index)
    }

    /// Performance evaluations in the order they were recorded.
    pub fn performance(&self) -> &[PerformanceLevel] {
        &self.performance
    }

    /// Files a leave request.
    pub fn add_leave_request(&mut self, request: LeaveRequest) {
        self.leave_requests.push(request);
    }

    /// Withdraws the leave request at `index`.
    pub fn remove_leave_request(&mut self, index: usize) -> HrResult<LeaveRequest> {
        checked_remove(&mut self.leave_requests, "leave requests", index)
    }

    /// Filed leave requests.
    pub fn leave_requests(&self) -> &[LeaveRequest] {
        &self.leave_requests
    }

    /// Grants a benefit. Each benefit can be granted once.
    pub fn add_benefit(&mut self, benefit: &str) -> HrResult<()> {
        let benefit = benefit.trim();
        if benefit.is_empty() {
            return Err(HrError::invalid_employee("benefit", "must not be blank"));
        }
        if self.benefits.iter().any(|b| b == benefit) {
            return Err(HrError::BenefitAlreadyExists {
                benefit: benefit.to_string(),
            });
        }
        self.benefits.push(benefit.to_string());
        Ok(())
    }

    /// Revokes a benefit.
    pub fn remove_benefit(&mut self, benefit: &str) -> HrResult<()> {
        let benefit = benefit.trim();
        match self.benefits.iter().position(|b| b == benefit) {
            Some(position) => {
                self.benefits.remove(position);
                Ok(())
            }
            None => Err(HrError::BenefitNotFound {
                benefit: benefit.to_string(),
            }),
        }
    }

    /// Granted benefits in the order they were added.
    pub fn benefits(&self) -> &[String] {
        &self.benefits
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn checked_remove<T>(items: &mut Vec<T>, collection: &str, index: usize) -> HrResult<T> {
    if index >= items.len() {
        return Err(HrError::index_out_of_range(collection, index, items.len()));
    }
    Ok(items.remove(index))
}
