//! Attendance ledger model.
//!
//! This module defines the [`AttendanceRecord`] and [`AttendanceLedger`]
//! types. A ledger is append-only: records are only ever pushed at the end,
//! and only the most recent record may still be open.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// A single clock-in/clock-out pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// When the employee clocked in.
    pub clock_in: NaiveDateTime,
    /// When the employee clocked out, if they have.
    pub clock_out: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// Returns true while the record has no clock-out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns the worked duration for a closed record.
    pub fn duration(&self) -> Option<Duration> {
        self.clock_out.map(|out| out - self.clock_in)
    }
}

/// Ordered clock-in/clock-out history for one employee.
///
/// # Example
///
/// ```
/// use hr_records::models::AttendanceLedger;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
///
/// let mut ledger = AttendanceLedger::new();
/// ledger.clock_in(at("2026-01-15 09:00")).unwrap();
/// ledger.clock_out(at("2026-01-15 11:00")).unwrap();
/// assert_eq!(ledger.total_worked_seconds(), 7200);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLedger {
    records: Vec<AttendanceRecord>,
}

impl AttendanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new record at `at`.
    ///
    /// Fails with [`HrError::ClockState`] if the current record is still open,
    /// and with [`HrError::InvalidTime`] if `at` precedes the previous clock-out.
    pub fn clock_in(&mut self, at: NaiveDateTime) -> HrResult<()> {
        if let Some(last) = self.records.last() {
            match last.clock_out {
                None => {
                    return Err(HrError::ClockState {
                        message: format!(
                            "already clocked in since {}; clock out first",
                            last.clock_in
                        ),
                    });
                }
                Some(previous_out) if at < previous_out => {
                    return Err(HrError::InvalidTime {
                        earliest: previous_out,
                        attempted: at,
                    });
                }
                Some(_) => {}
            }
        }

        self.records.push(AttendanceRecord {
            clock_in: at,
            clock_out: None,
        });
        Ok(())
    }

    /// Closes the current record at `at`.
    ///
    /// Fails with [`HrError::ClockState`] if there is no open record, and with
    /// [`HrError::InvalidTime`] if `at` precedes the matching clock-in.
    pub fn clock_out(&mut self, at: NaiveDateTime) -> HrResult<()> {
        let current = match self.records.last_mut() {
            Some(record) if record.is_open() => record,
            _ => {
                return Err(HrError::ClockState {
                    message: "not clocked in; clock in before clocking out".to_string(),
                });
            }
        };

        if at < current.clock_in {
            return Err(HrError::InvalidTime {
                earliest: current.clock_in,
                attempted: at,
            });
        }

        current.clock_out = Some(at);
        Ok(())
    }

    /// Sums worked seconds over closed records. Open records count as zero.
    pub fn total_worked_seconds(&self) -> i64 {
        self.records
            .iter()
            .filter_map(AttendanceRecord::duration)
            .map(|worked| worked.num_seconds())
            .sum()
    }

    /// Number of records that have both endpoints.
    pub fn closed_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_open()).count()
    }

    /// Returns true if the most recent record is open.
    pub fn is_clocked_in(&self) -> bool {
        self.records.last().is_some_and(AttendanceRecord::is_open)
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Worked time per clock-in date, closed records only, in date order.
    pub fn daily_totals(&self) -> Vec<(NaiveDate, Duration)> {
        let mut totals: Vec<(NaiveDate, Duration)> = Vec::new();

        for record in &self.records {
            let Some(worked) = record.duration() else {
                continue;
            };
            let date = record.clock_in.date();
            match totals.iter_mut().find(|(d, _)| *d == date) {
                Some((_, total)) => *total += worked,
                None => totals.push((date, worked)),
            }
        }

        totals.sort_by_key(|(date, _)| *date);
        totals
    }
}

/// Renders a second count as "Xh Ymin".
pub fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{}h {}min", hours, minutes)
}
