//! Cycle prediction from logged period start dates.
//!
//! History is assumed chronological by start and non-overlapping; nothing
//! here checks that. Interval lengths are whole days between consecutive
//! starts, averaged and rounded half away from zero exactly once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CYCLE_DAYS;
use crate::error::{CoreError, Result};
use crate::time::{add_days, days_between};

/// One logged period, `start <= end`. Only `new` builds one, so there is
/// no `Deserialize`; the wire format validates through `new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    start: NaiveDate,
    end: NaiveDate,
}

impl CycleRecord {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count: a period that starts and ends the same day lasts 1.
    pub fn length_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub next_date: NaiveDate,
    pub average_interval_days: i64,
}

/// Mean whole-day gap between consecutive starts, rounded half away from
/// zero. Fewer than two records yields `DEFAULT_CYCLE_DAYS`.
pub fn average_interval_days(history: &[CycleRecord]) -> i64 {
    if history.len() < 2 {
        return DEFAULT_CYCLE_DAYS;
    }
    let total: i64 = history
        .windows(2)
        .map(|pair| days_between(pair[0].start, pair[1].start))
        .sum();
    let gaps = (history.len() - 1) as f64;
    (total as f64 / gaps).round() as i64
}

/// Project the next period start.
///
/// `open_start` is a period start not yet closed with an end date; when
/// present it anchors the projection instead of the last record.
/// Returns `None` only when there is nothing to anchor on.
pub fn predict_next(
    history: &[CycleRecord],
    open_start: Option<NaiveDate>,
) -> Option<PredictionResult> {
    let last_start = open_start.or_else(|| history.last().map(|r| r.start))?;
    let average_interval_days = average_interval_days(history);
    Some(PredictionResult {
        next_date: add_days(last_start, average_interval_days),
        average_interval_days,
    })
}
