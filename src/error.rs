//! Error types for the HR record manager.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the core can report. Nothing in the core retries on
//! its own; each variant carries enough context (field, value, bound) for
//! the presentation layer to explain what went wrong.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of an [`HrError`].
///
/// The presentation layer uses this to decide how to phrase a failure
/// without matching on every individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input data (blank name, non-positive age or rate, ...).
    Validation,
    /// Clock-in/clock-out protocol violation.
    State,
    /// Registry or ledger index out of bounds.
    Index,
    /// The registry's parallel sequences disagree in length.
    Sync,
    /// Payment arithmetic could not produce a valid result.
    Calculation,
    /// Configuration could not be found, parsed or accepted.
    Config,
}

/// The main error type for the HR record manager.
///
/// # Example
///
/// ```
/// use hr_records::error::{ErrorKind, HrError};
///
/// let error = HrError::IndexOutOfRange {
///     collection: "employees".to_string(),
///     index: 3,
///     len: 2,
/// };
/// assert_eq!(error.to_string(), "Index 3 out of range for employees (length 2)");
/// assert_eq!(error.kind(), ErrorKind::Index);
/// ```
#[derive(Debug, Error)]
pub enum HrError {
    /// An employee field was missing or malformed.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The numeric employee type code did not name a known role.
    #[error("Invalid employee type code {code}: expected 1 (Regular), 2 (Manager) or 3 (Intern)")]
    InvalidEmployeeType {
        /// The rejected code.
        code: u8,
    },

    /// An hourly rate fell outside the accepted range.
    #[error("Invalid hourly rate {rate}: must be greater than 0 and at most {max}")]
    InvalidRate {
        /// The rejected rate.
        rate: Decimal,
        /// The inclusive upper bound.
        max: Decimal,
    },

    /// The clock-in/clock-out protocol was violated.
    #[error("Clock state error: {message}")]
    ClockState {
        /// A description of the violation.
        message: String,
    },

    /// A timestamp was earlier than the one it must follow.
    #[error("Invalid time: {attempted} precedes {earliest}")]
    InvalidTime {
        /// The earliest acceptable timestamp.
        earliest: NaiveDateTime,
        /// The timestamp that was rejected.
        attempted: NaiveDateTime,
    },

    /// A date range or calendar value was inconsistent.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// A description of the problem.
        message: String,
    },

    /// A ledger had no closed attendance records to pay for.
    #[error("No closed attendance records to calculate payment from")]
    NoRecords,

    /// A payment stage produced a negative amount.
    #[error("Negative payment produced by {stage}: {amount}")]
    NegativePayment {
        /// The rule id of the stage that produced the amount.
        stage: String,
        /// The offending amount.
        amount: Decimal,
    },

    /// A payment stage produced an amount too large to represent.
    #[error("Payment overflowed in {stage}")]
    PaymentOverflow {
        /// The rule id of the stage that overflowed.
        stage: String,
    },

    /// An index was outside `[0, len)` for the named collection.
    #[error("Index {index} out of range for {collection} (length {len})")]
    IndexOutOfRange {
        /// The collection that was indexed.
        collection: String,
        /// The rejected index.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },

    /// The registry's parallel sequences no longer line up.
    #[error(
        "Registry out of sync during {operation}: employees={employees}, attendance={attendance}, compliance={compliance}"
    )]
    RegistrySync {
        /// The operation that detected the inconsistency.
        operation: String,
        /// Length of the employee sequence.
        employees: usize,
        /// Length of the attendance sequence.
        attendance: usize,
        /// Length of the compliance sequence.
        compliance: usize,
    },

    /// A performance level code was not 1, 2 or 3.
    #[error("Invalid performance level {code}: expected 1 (Good), 2 (Average) or 3 (Bad)")]
    InvalidPerformanceLevel {
        /// The rejected code.
        code: u8,
    },

    /// The benefit is already granted to the employee.
    #[error("Benefit already granted: {benefit}")]
    BenefitAlreadyExists {
        /// The duplicated benefit.
        benefit: String,
    },

    /// The benefit is not granted to the employee.
    #[error("Benefit not found: {benefit}")]
    BenefitNotFound {
        /// The missing benefit.
        benefit: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was rejected.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

impl HrError {
    /// Returns the broad category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HrError::InvalidEmployee { .. }
            | HrError::InvalidEmployeeType { .. }
            | HrError::InvalidRate { .. }
            | HrError::InvalidTime { .. }
            | HrError::InvalidDate { .. }
            | HrError::InvalidPerformanceLevel { .. }
            | HrError::BenefitAlreadyExists { .. }
            | HrError::BenefitNotFound { .. } => ErrorKind::Validation,
            HrError::ClockState { .. } => ErrorKind::State,
            HrError::IndexOutOfRange { .. } => ErrorKind::Index,
            HrError::RegistrySync { .. } => ErrorKind::Sync,
            HrError::NoRecords
            | HrError::NegativePayment { .. }
            | HrError::PaymentOverflow { .. } => ErrorKind::Calculation,
            HrError::ConfigNotFound { .. }
            | HrError::ConfigParseError { .. }
            | HrError::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn invalid_employee(field: &str, message: impl Into<String>) -> Self {
        HrError::InvalidEmployee {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn index_out_of_range(collection: &str, index: usize, len: usize) -> Self {
        HrError::IndexOutOfRange {
            collection: collection.to_string(),
            index,
            len,
        }
    }
}

/// A type alias for Results that return HrError.
pub type HrResult<T> = Result<T, HrError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = HrError::invalid_employee("name", "must not be blank");
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'name': must not be blank"
        );
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_invalid_rate_displays_rate_and_bound() {
        let error = HrError::InvalidRate {
            rate: Decimal::from_str("10000.01").unwrap(),
            max: Decimal::from(10000),
        };
        assert_eq!(
            error.to_string(),
            "Invalid hourly rate 10000.01: must be greater than 0 and at most 10000"
        );
    }

    #[test]
    fn test_invalid_time_displays_both_timestamps() {
        let earliest =
            NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let attempted =
            NaiveDateTime::parse_from_str("2026-01-15 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let error = HrError::InvalidTime {
            earliest,
            attempted,
        };
        assert_eq!(
            error.to_string(),
            "Invalid time: 2026-01-15 08:00:00 precedes 2026-01-15 09:00:00"
        );
    }

    #[test]
    fn test_registry_sync_displays_all_lengths() {
        let error = HrError::RegistrySync {
            operation: "remove".to_string(),
            employees: 1,
            attendance: 2,
            compliance: 2,
        };
        assert_eq!(
            error.to_string(),
            "Registry out of sync during remove: employees=1, attendance=2, compliance=2"
        );
        assert_eq!(error.kind(), ErrorKind::Sync);
    }

    #[test]
    fn test_kinds_cover_taxonomy() {
        assert_eq!(
            HrError::ClockState {
                message: "already clocked in".to_string()
            }
            .kind(),
            ErrorKind::State
        );
        assert_eq!(HrError::NoRecords.kind(), ErrorKind::Calculation);
        assert_eq!(
            HrError::NegativePayment {
                stage: "hourly".to_string(),
                amount: Decimal::from(-1),
            }
            .kind(),
            ErrorKind::Calculation
        );
        assert_eq!(
            HrError::PaymentOverflow {
                stage: "manager_bonus".to_string(),
            }
            .kind(),
            ErrorKind::Calculation
        );
        assert_eq!(
            HrError::index_out_of_range("employees", 0, 0).kind(),
            ErrorKind::Index
        );
        assert_eq!(
            HrError::ConfigNotFound {
                path: "/missing".to_string()
            }
            .kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = HrError::ConfigNotFound {
            path: "/missing/hr.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/hr.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<HrError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_no_records() -> HrResult<()> {
            Err(HrError::NoRecords)
        }

        fn propagates_error() -> HrResult<()> {
            returns_no_records()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(HrError::NoRecords)));
    }
}
