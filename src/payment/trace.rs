//! Audit trail types recorded by the payment pipeline.
//!
//! Every stage of a payment calculation (the base strategy and each
//! adjustment) records an [`AuditStep`] so the final amount can be explained
//! line by line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::strategy::PaymentStrategy;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The identifier of the rule that was applied (e.g. "hourly", "tax_deduction").
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The result of running a payment chain, with its audit trail.
///
/// # Example
///
/// ```
/// use hr_records::config::PaymentPolicy;
/// use hr_records::models::{AttendanceLedger, Role};
/// use hr_records::payment::{PaymentChain, PaymentPipeline};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let mut ledger = AttendanceLedger::new();
/// ledger.clock_in(at("2026-01-15 09:00")).unwrap();
/// ledger.clock_out(at("2026-01-15 11:00")).unwrap();
///
/// let pipeline = PaymentPipeline::new(PaymentChain::for_role(Role::Manager), PaymentPolicy::default());
/// let breakdown = pipeline.calculate_with_trace(&ledger, Decimal::new(10, 0)).unwrap();
///
/// assert_eq!(breakdown.gross, Decimal::new(20, 0));
/// assert_eq!(breakdown.net, Decimal::new(204, 1));
/// assert_eq!(breakdown.steps.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// The base strategy that produced the gross amount.
    pub strategy: PaymentStrategy,
    /// Amount produced by the base strategy before any adjustment.
    pub gross: Decimal,
    /// Amount after every adjustment.
    pub net: Decimal,
    /// One step per stage, in application order.
    pub steps: Vec<AuditStep>,
}

impl PaymentBreakdown {
    /// Renders the trail as one line per step followed by the net amount.
    pub fn summary(&self) -> String {
        let mut lines: Vec<String> = self
            .steps
            .iter()
            .map(|step| format!("{}. {}: {}", step.step_number, step.rule_name, step.reasoning))
            .collect();
        lines.push(format!("Net payment: {:.2}", self.net));
        lines.join("\n")
    }
}
