//! Training, performance and leave records kept on each employee.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// A scheduled training session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// The day of the session.
    pub date: NaiveDate,
    /// The start time of the session.
    pub time: NaiveTime,
    /// What the session covers.
    pub description: String,
}

/// Outcome of a performance evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    /// Code 1.
    Good,
    /// Code 2.
    Average,
    /// Code 3.
    Bad,
}

impl PerformanceLevel {
    /// Maps the menu code (1 Good, 2 Average, 3 Bad) to a level.
    pub fn from_code(code: u8) -> HrResult<Self> {
        match code {
            1 => Ok(PerformanceLevel::Good),
            2 => Ok(PerformanceLevel::Average),
            3 => Ok(PerformanceLevel::Bad),
            _ => Err(HrError::InvalidPerformanceLevel { code }),
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Average => "Average",
            PerformanceLevel::Bad => "Bad",
        };
        f.write_str(label)
    }
}

/// A request for time off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLeaveRequest")]
pub struct LeaveRequest {
    /// First day of leave.
    pub start: NaiveDate,
    /// Last day of leave.
    pub end: NaiveDate,
    /// Why the leave is requested.
    pub reason: String,
}

#[derive(Deserialize)]
struct RawLeaveRequest {
    start: NaiveDate,
    end: NaiveDate,
    reason: String,
}

impl TryFrom<RawLeaveRequest> for LeaveRequest {
    type Error = HrError;

    fn try_from(raw: RawLeaveRequest) -> HrResult<Self> {
        LeaveRequest::new(raw.start, raw.end, raw.reason)
    }
}

impl LeaveRequest {
    /// Creates a leave request, rejecting an end date before the start.
    pub fn new(start: NaiveDate, end: NaiveDate, reason: impl Into<String>) -> HrResult<Self> {
        if end < start {
            return Err(HrError::InvalidDate {
                message: format!("leave ends {} before it starts {}", end, start),
            });
        }
        Ok(Self {
            start,
            end,
            reason: reason.into(),
        })
    }

    /// Inclusive number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
