//! Configuration types for the HR record manager.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default so a partial file (or no file at all) still yields a usable
//! configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{HrError, HrResult};

/// Organisation-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    /// Name of the root unit of the organisation hierarchy.
    pub name: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "Company".to_string(),
        }
    }
}

/// Payment policy constants used by the strategies and adjustments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentPolicy {
    /// Hours paid by the monthly strategy, independent of attendance.
    pub monthly_fixed_hours: u32,
    /// Inclusive upper bound on any hourly rate.
    pub max_hourly_rate: Decimal,
    /// Multiplier applied by the manager bonus adjustment.
    pub manager_bonus_multiplier: Decimal,
    /// Multiplier applied by the tax deduction adjustment.
    pub tax_multiplier: Decimal,
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        Self {
            monthly_fixed_hours: 160,
            max_hourly_rate: Decimal::new(10000, 0),
            manager_bonus_multiplier: Decimal::new(120, 2),
            tax_multiplier: Decimal::new(85, 2),
        }
    }
}

impl PaymentPolicy {
    /// Returns true if `rate` lies in `(0, max_hourly_rate]`.
    pub fn accepts_rate(&self, rate: Decimal) -> bool {
        rate > Decimal::ZERO && rate <= self.max_hourly_rate
    }

    /// Rejects a rate outside `(0, max_hourly_rate]` with [`HrError::InvalidRate`].
    pub fn check_rate(&self, rate: Decimal) -> HrResult<()> {
        if self.accepts_rate(rate) {
            Ok(())
        } else {
            Err(HrError::InvalidRate {
                rate,
                max: self.max_hourly_rate,
            })
        }
    }
}

/// The complete configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HrConfig {
    /// Organisation settings.
    pub organization: OrganizationConfig,
    /// Payment policy.
    pub payment: PaymentPolicy,
}

impl HrConfig {
    /// Checks that every value is usable by the payment pipeline.
    pub fn validate(&self) -> HrResult<()> {
        if self.organization.name.trim().is_empty() {
            return Err(invalid("organization.name", "must not be blank"));
        }

        let payment = &self.payment;
        if payment.monthly_fixed_hours == 0 {
            return Err(invalid("payment.monthly_fixed_hours", "must be positive"));
        }
        if payment.max_hourly_rate <= Decimal::ZERO {
            return Err(invalid("payment.max_hourly_rate", "must be positive"));
        }
        if payment.manager_bonus_multiplier <= Decimal::ZERO {
            return Err(invalid(
                "payment.manager_bonus_multiplier",
                "must be positive",
            ));
        }
        if payment.tax_multiplier <= Decimal::ZERO {
            return Err(invalid("payment.tax_multiplier", "must be positive"));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> HrError {
    HrError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_policy_constants() {
        let policy = PaymentPolicy::default();
        assert_eq!(policy.monthly_fixed_hours, 160);
        assert_eq!(policy.max_hourly_rate, dec("10000"));
        assert_eq!(policy.manager_bonus_multiplier, dec("1.20"));
        assert_eq!(policy.tax_multiplier, dec("0.85"));
    }

    #[test]
    fn test_accepts_rate_bounds() {
        let policy = PaymentPolicy::default();
        assert!(!policy.accepts_rate(dec("0")));
        assert!(!policy.accepts_rate(dec("-5")));
        assert!(policy.accepts_rate(dec("0.01")));
        assert!(policy.accepts_rate(dec("10000")));
        assert!(!policy.accepts_rate(dec("10000.01")));
    }

    #[test]
    fn test_check_rate_reports_bound() {
        let policy = PaymentPolicy::default();
        match policy.check_rate(dec("0")) {
            Err(HrError::InvalidRate { rate, max }) => {
                assert_eq!(rate, dec("0"));
                assert_eq!(max, dec("10000"));
            }
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(HrConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_multiplier() {
        let mut config = HrConfig::default();
        config.payment.tax_multiplier = Decimal::ZERO;

        match config.validate() {
            Err(HrError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "payment.tax_multiplier");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_blank_organization_name() {
        let mut config = HrConfig::default();
        config.organization.name = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(HrError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "payment:\n  tax_multiplier: \"0.70\"\n";
        let config: HrConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.payment.tax_multiplier, dec("0.70"));
        assert_eq!(config.payment.monthly_fixed_hours, 160);
        assert_eq!(config.organization, OrganizationConfig::default());
    }
}
