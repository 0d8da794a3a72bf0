//! Base payment strategies.
//!
//! A strategy turns an attendance ledger and an hourly rate into a gross
//! amount. [`PaymentStrategy::Hourly`] pays for closed attendance records;
//! [`PaymentStrategy::Monthly`] pays a fixed number of hours regardless of
//! what the ledger contains.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PaymentPolicy;
use crate::error::{HrError, HrResult};
use crate::models::AttendanceLedger;

use super::trace::AuditStep;

const SECONDS_PER_HOUR: i64 = 3600;

/// The algorithm used to compute gross pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStrategy {
    /// Worked hours from closed attendance records times the rate.
    Hourly,
    /// The policy's fixed monthly hours times the rate.
    Monthly,
}

/// The outcome of a strategy, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    /// The gross amount.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl PaymentStrategy {
    /// Stable identifier used in audit steps.
    pub fn rule_id(&self) -> &'static str {
        match self {
            PaymentStrategy::Hourly => "hourly",
            PaymentStrategy::Monthly => "monthly",
        }
    }

    /// Human-readable name used in audit steps.
    pub fn rule_name(&self) -> &'static str {
        match self {
            PaymentStrategy::Hourly => "Hourly Payment",
            PaymentStrategy::Monthly => "Monthly Payment",
        }
    }

    /// Computes the gross amount.
    ///
    /// # Errors
    ///
    /// - `NoRecords` if the hourly strategy finds no closed records
    /// - `InvalidRate` if the monthly strategy gets a rate outside `(0, max]`
    /// - `NegativePayment` if the result is negative
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_records::config::PaymentPolicy;
    /// use hr_records::models::AttendanceLedger;
    /// use hr_records::payment::PaymentStrategy;
    /// use rust_decimal::Decimal;
    ///
    /// let ledger = AttendanceLedger::new();
    /// let amount = PaymentStrategy::Monthly
    ///     .calculate(&ledger, Decimal::new(10, 0), &PaymentPolicy::default())
    ///     .unwrap();
    /// assert_eq!(amount, Decimal::new(1600, 0));
    /// ```
    pub fn calculate(
        &self,
        ledger: &AttendanceLedger,
        rate: Decimal,
        policy: &PaymentPolicy,
    ) -> HrResult<Decimal> {
        self.evaluate(ledger, rate, policy, 1)
            .map(|result| result.amount)
    }

    /// Computes the gross amount and records it as audit step `step_number`.
    pub fn evaluate(
        &self,
        ledger: &AttendanceLedger,
        rate: Decimal,
        policy: &PaymentPolicy,
        step_number: u32,
    ) -> HrResult<StrategyResult> {
        match self {
            PaymentStrategy::Hourly => hourly(ledger, rate, step_number),
            PaymentStrategy::Monthly => monthly(rate, policy, step_number),
        }
    }
}

fn hourly(ledger: &AttendanceLedger, rate: Decimal, step_number: u32) -> HrResult<StrategyResult> {
    let closed_records = ledger.closed_count();
    if closed_records == 0 {
        return Err(HrError::NoRecords);
    }

    let worked_seconds = ledger.total_worked_seconds();
    let hours = Decimal::from(worked_seconds) / Decimal::from(SECONDS_PER_HOUR);
    let amount = checked_product(PaymentStrategy::Hourly.rule_id(), hours, rate)?;
    ensure_non_negative(PaymentStrategy::Hourly.rule_id(), amount)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: PaymentStrategy::Hourly.rule_id().to_string(),
        rule_name: PaymentStrategy::Hourly.rule_name().to_string(),
        input: serde_json::json!({
            "closed_records": closed_records,
            "worked_seconds": worked_seconds,
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{}h x {} = {}",
            hours.round_dp(2).normalize(),
            rate.normalize(),
            amount.round_dp(2).normalize()
        ),
    };

    Ok(StrategyResult { amount, audit_step })
}

fn monthly(rate: Decimal, policy: &PaymentPolicy, step_number: u32) -> HrResult<StrategyResult> {
    policy.check_rate(rate)?;

    let hours = Decimal::from(policy.monthly_fixed_hours);
    let amount = checked_product(PaymentStrategy::Monthly.rule_id(), hours, rate)?;
    ensure_non_negative(PaymentStrategy::Monthly.rule_id(), amount)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: PaymentStrategy::Monthly.rule_id().to_string(),
        rule_name: PaymentStrategy::Monthly.rule_name().to_string(),
        input: serde_json::json!({
            "fixed_hours": policy.monthly_fixed_hours,
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} fixed hours x {} = {}",
            policy.monthly_fixed_hours,
            rate.normalize(),
            amount.normalize()
        ),
    };

    Ok(StrategyResult { amount, audit_step })
}

/// Multiplies two amounts, failing with [`HrError::PaymentOverflow`] instead of panicking.
pub(crate) fn checked_product(stage: &str, lhs: Decimal, rhs: Decimal) -> HrResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| HrError::PaymentOverflow {
        stage: stage.to_string(),
    })
}

/// Rejects a negative amount produced by `stage`.
pub(crate) fn ensure_non_negative(stage: &str, amount: Decimal) -> HrResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(HrError::NegativePayment {
            stage: stage.to_string(),
            amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn two_hour_ledger() -> AttendanceLedger {
        let mut ledger = AttendanceLedger::new();
        ledger.clock_in(at("2026-01-15 09:00:00")).unwrap();
        ledger.clock_out(at("2026-01-15 11:00:00")).unwrap();
        ledger
    }

    #[test]
    fn test_hourly_two_hours_at_rate_ten() {
        let amount = PaymentStrategy::Hourly
            .calculate(&two_hour_ledger(), dec("10"), &PaymentPolicy::default())
            .unwrap();
        assert_eq!(amount, dec("20"));
    }

    #[test]
    fn test_hourly_empty_ledger_is_no_records() {
        let result = PaymentStrategy::Hourly.calculate(
            &AttendanceLedger::new(),
            dec("10"),
            &PaymentPolicy::default(),
        );
        assert!(matches!(result, Err(HrError::NoRecords)));
    }

    #[test]
    fn test_hourly_only_open_record_is_no_records() {
        let mut ledger = AttendanceLedger::new();
        ledger.clock_in(at("2026-01-15 09:00:00")).unwrap();

        let result = PaymentStrategy::Hourly.calculate(&ledger, dec("10"), &PaymentPolicy::default());
        assert!(matches!(result, Err(HrError::NoRecords)));
    }

    #[test]
    fn test_hourly_partial_hours() {
        let mut ledger = AttendanceLedger::new();
        ledger.clock_in(at("2026-01-15 09:00:00")).unwrap();
        ledger.clock_out(at("2026-01-15 09:45:00")).unwrap();

        let amount = PaymentStrategy::Hourly
            .calculate(&ledger, dec("20"), &PaymentPolicy::default())
            .unwrap();
        assert_eq!(amount, dec("15"));
    }

    #[test]
    fn test_hourly_overflow_is_reported() {
        match PaymentStrategy::Hourly.calculate(&two_hour_ledger(), Decimal::MAX, &PaymentPolicy::default()) {
            Err(HrError::PaymentOverflow { stage }) => assert_eq!(stage, "hourly"),
            other => panic!("Expected PaymentOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_monthly_overflow_is_reported() {
        let mut policy = PaymentPolicy::default();
        policy.max_hourly_rate = Decimal::MAX;

        let err = PaymentStrategy::Monthly
            .calculate(&AttendanceLedger::new(), Decimal::MAX, &policy)
            .unwrap_err();
        assert!(matches!(err, HrError::PaymentOverflow { ref stage } if stage == "monthly"));
    }

    #[test]
    fn test_hourly_negative_rate_is_negative_payment() {
        match PaymentStrategy::Hourly.calculate(&two_hour_ledger(), dec("-10"), &PaymentPolicy::default()) {
            Err(HrError::NegativePayment { stage, amount }) => {
                assert_eq!(stage, "hourly");
                assert_eq!(amount, dec("-20"));
            }
            other => panic!("Expected NegativePayment, got {:?}", other),
        }
    }

    #[test]
    fn test_monthly_pays_fixed_hours() {
        let amount = PaymentStrategy::Monthly
            .calculate(&AttendanceLedger::new(), dec("12.5"), &PaymentPolicy::default())
            .unwrap();
        assert_eq!(amount, dec("2000"));
    }

    #[test]
    fn test_monthly_ignores_ledger_contents() {
        let policy = PaymentPolicy::default();
        let empty = PaymentStrategy::Monthly
            .calculate(&AttendanceLedger::new(), dec("10"), &policy)
            .unwrap();
        let worked = PaymentStrategy::Monthly
            .calculate(&two_hour_ledger(), dec("10"), &policy)
            .unwrap();
        assert_eq!(empty, worked);
    }

    #[test]
    fn test_monthly_rate_bounds() {
        let policy = PaymentPolicy::default();
        let ledger = AttendanceLedger::new();

        for rate in ["0", "-1", "10000.01"] {
            let result = PaymentStrategy::Monthly.calculate(&ledger, dec(rate), &policy);
            assert!(
                matches!(result, Err(HrError::InvalidRate { .. })),
                "rate {} should be rejected",
                rate
            );
        }
        assert_eq!(
            PaymentStrategy::Monthly
                .calculate(&ledger, dec("10000"), &policy)
                .unwrap(),
            dec("1600000")
        );
    }

    #[test]
    fn test_hourly_audit_step() {
        let result = PaymentStrategy::Hourly
            .evaluate(&two_hour_ledger(), dec("10"), &PaymentPolicy::default(), 1)
            .unwrap();

        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.rule_id, "hourly");
        assert_eq!(result.audit_step.input["worked_seconds"], 7200);
        assert_eq!(result.audit_step.output["hours"].as_str().unwrap(), "2");
        assert_eq!(result.audit_step.reasoning, "2h x 10 = 20");
    }

    #[test]
    fn test_ensure_non_negative_accepts_zero() {
        assert!(ensure_non_negative("test", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("test", dec("-0.01")).is_err());
    }
}
