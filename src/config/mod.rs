//! Configuration loading for the HR record manager.
//!
//! This module loads the organisation settings and payment policy from a
//! YAML file, falling back to built-in defaults for anything not given.
//!
//! # Example
//!
//! ```no_run
//! use hr_records::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hr.yaml").unwrap();
//! println!("Tax multiplier: {}", config.payment.tax_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HrConfig, OrganizationConfig, PaymentPolicy};
