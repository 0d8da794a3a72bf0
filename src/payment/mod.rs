//! Payment calculation for the HR record manager.
//!
//! A payment is computed by a base [`PaymentStrategy`] (hourly or monthly)
//! and then passed through an ordered list of [`PaymentAdjustment`]s
//! (manager bonus, tax deduction). [`PaymentChain::for_role`] picks the
//! chain for an employee and [`PaymentPipeline`] runs it, recording an
//! [`AuditStep`] per stage.

mod adjustment;
mod pipeline;
mod strategy;
mod trace;

pub use adjustment::{AdjustmentResult, PaymentAdjustment};
pub use pipeline::{PaymentChain, PaymentPipeline};
pub use strategy::{PaymentStrategy, StrategyResult};
pub use trace::{AuditStep, PaymentBreakdown};
