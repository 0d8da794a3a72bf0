//! Human resources record manager.
//!
//! Keeps employee records with per-employee attendance and compliance
//! ledgers, computes payments through a configurable pipeline of a base
//! strategy followed by ordered adjustments, and notifies listeners of
//! hourly-rate changes.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod org;
pub mod payment;
pub mod registry;
pub mod reports;
pub mod service;

pub use error::{ErrorKind, HrError, HrResult};
