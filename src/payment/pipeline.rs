//! The payment pipeline: a base strategy followed by ordered adjustments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PaymentPolicy;
use crate::error::HrResult;
use crate::models::{AttendanceLedger, Role};

use super::adjustment::PaymentAdjustment;
use super::strategy::PaymentStrategy;
use super::trace::PaymentBreakdown;

/// A base strategy plus the adjustments applied after it.
///
/// Adjustments are kept sorted in application order and each appears at
/// most once, however they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawChain")]
pub struct PaymentChain {
    base: PaymentStrategy,
    adjustments: Vec<PaymentAdjustment>,
}

/// Wire form of a chain; deserialized chains are rebuilt through
/// [`PaymentChain::with`] so order and uniqueness hold.
#[derive(Deserialize)]
struct RawChain {
    base: PaymentStrategy,
    #[serde(default)]
    adjustments: Vec<PaymentAdjustment>,
}

impl From<RawChain> for PaymentChain {
    fn from(raw: RawChain) -> Self {
        raw.adjustments
            .into_iter()
            .fold(PaymentChain::new(raw.base), PaymentChain::with)
    }
}

impl PaymentChain {
    /// A chain with no adjustments.
    pub fn new(base: PaymentStrategy) -> Self {
        Self {
            base,
            adjustments: Vec::new(),
        }
    }

    /// Adds an adjustment in its fixed position. Adding one twice has no effect.
    pub fn with(mut self, adjustment: PaymentAdjustment) -> Self {
        if let Err(position) = self.adjustments.binary_search(&adjustment) {
            self.adjustments.insert(position, adjustment);
        }
        self
    }

    /// The chain used for an employee of the given role.
    ///
    /// Always hourly; managers get the bonus; everyone is taxed last.
    /// The monthly strategy is never selected here.
    pub fn for_role(role: Role) -> Self {
        let chain = PaymentChain::new(PaymentStrategy::Hourly);
        let chain = match role {
            Role::Manager => chain.with(PaymentAdjustment::ManagerBonus),
            Role::Regular | Role::Intern => chain,
        };
        chain.with(PaymentAdjustment::TaxDeduction)
    }

    /// The base strategy.
    pub fn base(&self) -> PaymentStrategy {
        self.base
    }

    /// Adjustments in application order.
    pub fn adjustments(&self) -> &[PaymentAdjustment] {
        &self.adjustments
    }
}

/// Runs a configured [`PaymentChain`] over attendance data.
///
/// The pipeline holds nothing but the chain and the policy constants; the
/// chain only changes through [`PaymentPipeline::set_strategy`].
#[derive(Debug, Clone)]
pub struct PaymentPipeline {
    chain: PaymentChain,
    policy: PaymentPolicy,
}

impl PaymentPipeline {
    /// Creates a pipeline running `chain` under `policy`.
    pub fn new(chain: PaymentChain, policy: PaymentPolicy) -> Self {
        Self { chain, policy }
    }

    /// Replaces the configured chain.
    pub fn set_strategy(&mut self, chain: PaymentChain) {
        self.chain = chain;
    }

    /// The configured chain.
    pub fn chain(&self) -> &PaymentChain {
        &self.chain
    }

    /// Computes the final amount for `ledger` at `rate`.
    pub fn calculate(&self, ledger: &AttendanceLedger, rate: Decimal) -> HrResult<Decimal> {
        self.calculate_with_trace(ledger, rate)
            .map(|breakdown| breakdown.net)
    }

    /// Computes the final amount and records one audit step per stage.
    ///
    /// The first failing stage's error is returned unchanged.
    pub fn calculate_with_trace(
        &self,
        ledger: &AttendanceLedger,
        rate: Decimal,
    ) -> HrResult<PaymentBreakdown> {
        let mut step_number: u32 = 1;
        let base = self.chain.base;

        let base_result = base.evaluate(ledger, rate, &self.policy, step_number)?;
        debug!(
            rule = base.rule_id(),
            amount = %base_result.amount,
            "Applied base strategy"
        );
        let gross = base_result.amount;
        let mut amount = gross;
        let mut steps = vec![base_result.audit_step];
        step_number += 1;

        for adjustment in &self.chain.adjustments {
            let result = adjustment.apply(amount, &self.policy, step_number)?;
            debug!(
                rule = adjustment.rule_id(),
                before = %amount,
                after = %result.amount,
                "Applied payment adjustment"
            );
            amount = result.amount;
            steps.push(result.audit_step);
            step_number += 1;
        }

        Ok(PaymentBreakdown {
            strategy: base,
            gross,
            net: amount,
            steps,
        })
    }
}
