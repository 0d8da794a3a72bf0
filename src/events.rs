//! Rate-change notifications.
//!
//! Listeners subscribe to hourly-rate changes and are invoked synchronously,
//! in registration order, after the new rate has been committed.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::Employee;

/// Describes a committed hourly-rate change.
#[derive(Debug, Clone, Copy)]
pub struct RateChange<'a> {
    /// The employee after the change.
    pub employee: &'a Employee,
    /// The rate before the change.
    pub previous_rate: Decimal,
}

impl RateChange<'_> {
    /// The rate after the change.
    pub fn new_rate(&self) -> Decimal {
        self.employee.hourly_rate()
    }

    /// The notice payroll staff should see for this change.
    pub fn payroll_notice(&self) -> String {
        format!(
            "PAYROLL NOTICE: hourly rate for '{}' changed from {:.2} to {:.2}. Please update payroll records.",
            self.employee.name,
            self.previous_rate,
            self.new_rate()
        )
    }
}

/// A callback invoked for every committed rate change.
pub type RateListener = Box<dyn FnMut(&RateChange<'_>)>;

/// Ordered list of rate-change listeners.
#[derive(Default)]
pub struct RateListeners {
    listeners: Vec<RateListener>,
}

impl RateListeners {
    /// Appends a listener; it runs after every listener registered before it.
    pub fn subscribe(&mut self, listener: RateListener) {
        self.listeners.push(listener);
    }

    /// Invokes every listener in registration order.
    pub fn notify(&mut self, change: &RateChange<'_>) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}

impl fmt::Debug for RateListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
