//! Adjustments applied on top of a base strategy.
//!
//! Each adjustment takes the amount produced by the previous stage and
//! multiplies it by one fixed factor from the [`PaymentPolicy`]. Variant
//! declaration order is application order: the manager bonus is applied
//! before the tax deduction, so tax is charged on the bonus-inclusive amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PaymentPolicy;
use crate::error::HrResult;

use super::strategy::{checked_product, ensure_non_negative};
use super::trace::AuditStep;

/// A fixed multiplier applied after the base strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentAdjustment {
    /// Manager bonus (default x1.20).
    ManagerBonus,
    /// Tax deduction (default x0.85).
    TaxDeduction,
}

/// The outcome of an adjustment, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct AdjustmentResult {
    /// The adjusted amount.
    pub amount: Decimal,
    /// The audit step recording this adjustment.
    pub audit_step: AuditStep,
}

impl PaymentAdjustment {
    /// Stable identifier used in audit steps.
    pub fn rule_id(&self) -> &'static str {
        match self {
            PaymentAdjustment::ManagerBonus => "manager_bonus",
            PaymentAdjustment::TaxDeduction => "tax_deduction",
        }
    }

    /// Human-readable name used in audit steps.
    pub fn rule_name(&self) -> &'static str {
        match self {
            PaymentAdjustment::ManagerBonus => "Manager Bonus",
            PaymentAdjustment::TaxDeduction => "Tax Deduction",
        }
    }

    /// The multiplier this adjustment applies under `policy`.
    pub fn multiplier(&self, policy: &PaymentPolicy) -> Decimal {
        match self {
            PaymentAdjustment::ManagerBonus => policy.manager_bonus_multiplier,
            PaymentAdjustment::TaxDeduction => policy.tax_multiplier,
        }
    }

    /// Applies the multiplier to `amount`, rejecting a negative result.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_records::config::PaymentPolicy;
    /// use hr_records::payment::PaymentAdjustment;
    /// use rust_decimal::Decimal;
    ///
    /// let result = PaymentAdjustment::ManagerBonus
    ///     .apply(Decimal::new(20, 0), &PaymentPolicy::default(), 2)
    ///     .unwrap();
    /// assert_eq!(result.amount, Decimal::new(24, 0));
    /// ```
    pub fn apply(
        &self,
        amount: Decimal,
        policy: &PaymentPolicy,
        step_number: u32,
    ) -> HrResult<AdjustmentResult> {
        let multiplier = self.multiplier(policy);
        let adjusted = checked_product(self.rule_id(), amount, multiplier)?;
        ensure_non_negative(self.rule_id(), adjusted)?;

        let audit_step = AuditStep {
            step_number,
            rule_id: self.rule_id().to_string(),
            rule_name: self.rule_name().to_string(),
            input: serde_json::json!({
                "amount": amount.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": adjusted.normalize().to_string(),
                "multiplier": multiplier.normalize().to_string()
            }),
            reasoning: format!(
                "{} x {} = {}",
                amount.round_dp(2).normalize(),
                multiplier.normalize(),
                adjusted.round_dp(2).normalize()
            ),
        };

        Ok(AdjustmentResult {
            amount: adjusted,
            audit_step,
        })
    }
}
