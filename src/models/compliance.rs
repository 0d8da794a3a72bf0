//! Compliance violation model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// How serious a compliance violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Minor issue.
    Low,
    /// Should be addressed soon.
    Medium,
    /// Needs prompt attention.
    High,
    /// Must be addressed immediately.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(label)
    }
}

impl FromStr for Severity {
    type Err = HrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(HrError::InvalidEmployee {
                field: "severity".to_string(),
                message: format!("unknown severity '{}': expected low, medium, high or critical", other),
            }),
        }
    }
}

/// A recorded compliance violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    /// The date the violation occurred.
    pub date: NaiveDate,
    /// What happened.
    pub description: String,
    /// How serious it is.
    pub severity: Severity,
}

/// Ordered list of violations for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceLedger {
    violations: Vec<ComplianceViolation>,
}

impl ComplianceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation. A blank description is rejected.
    pub fn add_violation(&mut self, violation: ComplianceViolation) -> HrResult<()> {
        if violation.description.trim().is_empty() {
            return Err(HrError::invalid_employee(
                "violation.description",
                "must not be blank",
            ));
        }
        self.violations.push(violation);
        Ok(())
    }

    /// Removes and returns the violation at `index`.
    pub fn remove_violation(&mut self, index: usize) -> HrResult<ComplianceViolation> {
        if index >= self.violations.len() {
            return Err(HrError::index_out_of_range(
                "violations",
                index,
                self.violations.len(),
            ));
        }
        Ok(self.violations.remove(index))
    }

    /// All violations in the order they were recorded.
    pub fn violations(&self) -> &[ComplianceViolation] {
        &self.violations
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if no violations are recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
