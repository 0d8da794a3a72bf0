//! Plain-text reports.
//!
//! [`Report`] fixes the layout (header, rule, body, rule, footer) and lets
//! each report type supply the header and body.

use chrono::NaiveDateTime;

use crate::models::{AttendanceLedger, ComplianceLedger, Employee, format_duration};

const RULE_WIDTH: usize = 40;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A report rendered in a fixed layout.
pub trait Report {
    /// The title line.
    fn header(&self) -> String;

    /// The main content.
    fn body(&self) -> String;

    /// The closing line. Defaults to the generation timestamp.
    fn footer(&self, generated_at: NaiveDateTime) -> String {
        format!("Report generated at: {}", generated_at.format(TIMESTAMP_FORMAT))
    }

    /// Assembles header, body and footer separated by horizontal rules.
    fn render(&self, generated_at: NaiveDateTime) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        format!(
            "{}\n{}\n{}\n{}\n{}",
            self.header(),
            rule,
            self.body(),
            rule,
            self.footer(generated_at)
        )
    }
}

/// Attendance records and worked time for one employee.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceReport<'a> {
    employee: &'a Employee,
    ledger: &'a AttendanceLedger,
}

impl<'a> AttendanceReport<'a> {
    /// Creates a report over `ledger`.
    pub fn new(employee: &'a Employee, ledger: &'a AttendanceLedger) -> Self {
        Self { employee, ledger }
    }
}

impl Report for AttendanceReport<'_> {
    fn header(&self) -> String {
        format!("Attendance Report for {}", self.employee.name)
    }

    fn body(&self) -> String {
        if self.ledger.is_empty() {
            return "No attendance records found.".to_string();
        }

        let mut lines = vec!["Records:".to_string()];
        for (i, record) in self.ledger.records().iter().enumerate() {
            let clock_out = record
                .clock_out
                .map(|out| out.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| "Still working".to_string());
            lines.push(format!(
                "{}) IN: {} | OUT: {}",
                i + 1,
                record.clock_in.format(TIMESTAMP_FORMAT),
                clock_out
            ));
        }

        let daily = self.ledger.daily_totals();
        if !daily.is_empty() {
            lines.push("Worked per day:".to_string());
            for (date, worked) in daily {
                lines.push(format!("- {}: {}", date, format_duration(worked.num_seconds())));
            }
        }

        lines.push(format!(
            "Total worked time: {}",
            format_duration(self.ledger.total_worked_seconds())
        ));
        lines.join("\n")
    }
}

/// Compliance violations for one employee.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceReport<'a> {
    employee: &'a Employee,
    ledger: &'a ComplianceLedger,
}

impl<'a> ComplianceReport<'a> {
    /// Creates a report over `ledger`.
    pub fn new(employee: &'a Employee, ledger: &'a ComplianceLedger) -> Self {
        Self { employee, ledger }
    }
}

impl Report for ComplianceReport<'_> {
    fn header(&self) -> String {
        format!("Compliance Report for {}", self.employee.name)
    }

    fn body(&self) -> String {
        if self.ledger.is_empty() {
            return "No violations recorded.".to_string();
        }

        let mut lines = vec![format!("Total violations: {}", self.ledger.len())];
        for (i, violation) in self.ledger.violations().iter().enumerate() {
            lines.push(format!(
                "{}) {} | {} (Severity: {})",
                i + 1,
                violation.date,
                violation.description,
                violation.severity
            ));
        }
        lines.join("\n")
    }
}
