//! Core data models for the HR record manager.
//!
//! This module contains all the domain models used throughout the crate.

mod attendance;
mod builder;
mod compliance;
mod development;
mod employee;

pub use attendance::{AttendanceLedger, AttendanceRecord, format_duration};
pub use builder::{EmployeeBuilder, EmployeeFactory, NewHire};
pub use compliance::{ComplianceLedger, ComplianceViolation, Severity};
pub use development::{LeaveRequest, PerformanceLevel, TrainingSession};
pub use employee::{Employee, Role};
