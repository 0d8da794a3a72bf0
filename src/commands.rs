//! Management commands.
//!
//! Each change to an employee's development records is expressed as a
//! [`ManagementCommand`] value. [`CommandInvoker`] runs commands against the
//! registry and keeps an ordered history of what was executed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::HrResult;
use crate::models::{Employee, LeaveRequest, PerformanceLevel, TrainingSession};
use crate::registry::EmployeeRegistry;

/// A change to an employee's development records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "args")]
pub enum ManagementCommand {
    /// Schedule a training session.
    AddTraining(TrainingSession),
    /// Cancel the training session at the given index.
    RemoveTraining(usize),
    /// Record a performance evaluation.
    AddPerformanceEvaluation(PerformanceLevel),
    /// Delete the evaluation at the given index.
    RemovePerformanceEvaluation(usize),
    /// File a leave request.
    AddLeaveRequest(LeaveRequest),
    /// Withdraw the leave request at the given index.
    RemoveLeaveRequest(usize),
    /// Grant a benefit.
    AddBenefit(String),
    /// Revoke a benefit.
    RemoveBenefit(String),
}

impl ManagementCommand {
    /// Applies the command, returning a confirmation message.
    pub fn execute(&self, employee: &mut Employee) -> HrResult<String> {
        let message = match self {
            ManagementCommand::AddTraining(session) => {
                employee.add_training(session.clone())?;
                format!(
                    "Training session '{}' added for {}.",
                    session.description, employee.name
                )
            }
            ManagementCommand::RemoveTraining(index) => {
                let session = employee.remove_training(*index)?;
                format!(
                    "Training session '{}' removed for {}.",
                    session.description, employee.name
                )
            }
            ManagementCommand::AddPerformanceEvaluation(level) => {
                employee.add_performance_evaluation(*level);
                format!(
                    "Performance evaluation ({}) added for {}.",
                    level, employee.name
                )
            }
            ManagementCommand::RemovePerformanceEvaluation(index) => {
                let level = employee.remove_performance_evaluation(*index)?;
                format!(
                    "Performance evaluation ({}) removed for {}.",
                    level, employee.name
                )
            }
            ManagementCommand::AddLeaveRequest(request) => {
                employee.add_leave_request(request.clone());
                format!(
                    "Leave request {} to {} added for {}.",
                    request.start, request.end, employee.name
                )
            }
            ManagementCommand::RemoveLeaveRequest(index) => {
                let request = employee.remove_leave_request(*index)?;
                format!(
                    "Leave request {} to {} removed for {}.",
                    request.start, request.end, employee.name
                )
            }
            ManagementCommand::AddBenefit(benefit) => {
                employee.add_benefit(benefit)?;
                format!("Benefit '{}' granted to {}.", benefit.trim(), employee.name)
            }
            ManagementCommand::RemoveBenefit(benefit) => {
                employee.remove_benefit(benefit)?;
                format!("Benefit '{}' revoked from {}.", benefit.trim(), employee.name)
            }
        };
        Ok(message)
    }
}

/// A command that ran successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The employee the command ran against.
    pub employee_id: Uuid,
    /// The command itself.
    pub command: ManagementCommand,
    /// When it ran.
    pub executed_at: NaiveDateTime,
    /// The confirmation message it produced.
    pub message: String,
}

/// Runs commands and remembers the successful ones.
#[derive(Debug, Clone, Default)]
pub struct CommandInvoker {
    history: Vec<CommandRecord>,
}

impl CommandInvoker {
    /// Creates an invoker with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `command` against the employee at `index`.
    ///
    /// Failed commands are not recorded.
    pub fn run(
        &mut self,
        registry: &mut EmployeeRegistry,
        index: usize,
        command: ManagementCommand,
        executed_at: NaiveDateTime,
    ) -> HrResult<String> {
        let employee = registry.employee_mut(index)?;
        let message = command.execute(employee)?;
        info!(employee_id = %employee.id, message = %message, "Management command executed");

        self.history.push(CommandRecord {
            employee_id: employee.id,
            command,
            executed_at,
            message: message.clone(),
        });
        Ok(message)
    }

    /// Successful commands in execution order.
    pub fn history(&self) -> &[CommandRecord] {
        &self.history
    }
}
