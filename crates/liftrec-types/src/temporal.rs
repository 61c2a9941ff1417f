use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};

/// Chronological position of a result file.
///
/// `month` and `day` are `0` for year-granularity files (`YYYY.csv`), so
/// an annual file sorts before every dated file of the same year.
///
/// Ordering: `year` → `month` → `day` (total order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SourceDate {
    /// A year-granularity position.
    pub const fn year(year: i32) -> Self {
        Self {
            year,
            month: 0,
            day: 0,
        }
    }

    /// An exact calendar date. Rejects dates the calendar does not have.
    pub fn ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(TypeError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Whether the file named an explicit month and day.
    pub fn has_day_precision(&self) -> bool {
        self.month != 0 && self.day != 0
    }

    /// Calendar date this position stands for; absent parts become the
    /// first month/day of the period.
    pub fn anchor(&self) -> NaiveDate {
        let month = self.month.max(1);
        let day = self.day.max(1);
        NaiveDate::from_ymd_opt(self.year, month, day)
            .or_else(|| NaiveDate::from_ymd_opt(self.year, month, 1))
            .or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Age of a record set at `self` and broken at `later`.
    ///
    /// Day-precision origins are measured in days between anchors;
    /// year-only origins in whole calendar years.
    pub fn age_until(&self, later: &SourceDate) -> RecordAge {
        if self.has_day_precision() {
            RecordAge::Days(self.days_until(later))
        } else {
            RecordAge::Years(later.year - self.year)
        }
    }

    /// Days between the two anchors. Used as the common ranking unit.
    pub fn days_until(&self, later: &SourceDate) -> i64 {
        (later.anchor() - self.anchor()).num_days()
    }
}

impl fmt::Debug for SourceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceDate({self})")
    }
}

impl fmt::Display for SourceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_day_precision() {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:04}", self.year)
        }
    }
}

/// How long a displaced record had stood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAge {
    Days(i64),
    Years(i32),
}

impl fmt::Display for RecordAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(1) => write!(f, "1 day"),
            Self::Days(n) => write!(f, "{n} days"),
            Self::Years(1) => write!(f, "1 year"),
            Self::Years(n) => write!(f, "{n} years"),
        }
    }
}
