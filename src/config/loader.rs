//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the HR
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{HrError, HrResult};

use super::types::HrConfig;

/// Loads and validates the HR configuration.
///
/// # File Structure
///
/// ```text
/// organization:
///   name: "Acme Corp"
/// payment:
///   monthly_fixed_hours: 160
///   max_hourly_rate: "10000"
///   manager_bonus_multiplier: "1.20"
///   tax_multiplier: "0.85"
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_records::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config/hr.yaml")?;
/// println!("Organisation: {}", config.organization.name);
/// # Ok::<(), hr_records::error::HrError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns the validated configuration, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is unusable (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> HrResult<HrConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::from_yaml_str(&content).map_err(|err| match err {
            HrError::ConfigParseError { message, .. } => HrError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, organization = %config.organization.name, "Loaded configuration");
        Ok(config)
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> HrResult<HrConfig> {
        let config: HrConfig =
            serde_yaml::from_str(content).map_err(|e| HrError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> HrResult<HrConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(HrConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/hr.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_sample_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.organization.name, "Acme Corp");
        assert_eq!(config.payment.monthly_fixed_hours, 160);
        assert_eq!(config.payment.max_hourly_rate, dec("10000"));
        assert_eq!(config.payment.manager_bonus_multiplier, dec("1.20"));
        assert_eq!(config.payment.tax_multiplier, dec("0.85"));
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/hr.yaml") {
            Err(HrError::ConfigNotFound { path }) => {
                assert!(path.contains("hr.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        match ConfigLoader::from_yaml_str("payment: [unclosed") {
            Err(HrError::ConfigParseError { path, .. }) => {
                assert_eq!(path, "<inline>");
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value_is_rejected_after_parsing() {
        let yaml = "payment:\n  monthly_fixed_hours: 0\n";
        assert!(matches!(
            ConfigLoader::from_yaml_str(yaml),
            Err(HrError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = ConfigLoader::load_or_default::<&str>(None).unwrap();
        assert_eq!(config, HrConfig::default());
    }
}
