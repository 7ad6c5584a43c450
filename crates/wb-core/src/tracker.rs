//! Period tracker state: one toggle date at a time, closed periods pushed
//! onto history, plus per-day symptom logs.

use chrono::NaiveDate;

use crate::cycle::{CycleRecord, PredictionResult, predict_next};
use crate::daylog::DailyLog;
use crate::error::Result;

/// What a call to [`CycleTracker::toggle`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started(NaiveDate),
    Closed(CycleRecord),
    Restarted(NaiveDate),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleTracker {
    history: Vec<CycleRecord>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    logs: Vec<DailyLog>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts. `end` without `start` is dropped.
    pub fn from_parts(
        history: Vec<CycleRecord>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        logs: Vec<DailyLog>,
    ) -> Self {
        Self {
            history,
            start,
            end: start.and(end),
            logs,
        }
    }

    /// Advance the start/end toggle with `date`:
    /// no start sets it; an open start with a later date closes the period
    /// and records it; anything else restarts from `date`.
    pub fn toggle(&mut self, date: NaiveDate) -> Result<ToggleOutcome> {
        match (self.start, self.end) {
            (None, _) => {
                self.start = Some(date);
                Ok(ToggleOutcome::Started(date))
            }
            (Some(start), None) if date > start => {
                let record = CycleRecord::new(start, date)?;
                self.end = Some(date);
                self.history.push(record);
                Ok(ToggleOutcome::Closed(record))
            }
            _ => {
                self.start = Some(date);
                self.end = None;
                Ok(ToggleOutcome::Restarted(date))
            }
        }
    }

    /// Append an already-closed period, e.g. entered after the fact.
    pub fn log_period(&mut self, start: NaiveDate, end: NaiveDate) -> Result<CycleRecord> {
        let record = CycleRecord::new(start, end)?;
        self.history.push(record);
        Ok(record)
    }

    pub fn history(&self) -> &[CycleRecord] {
        &self.history
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// The current start, only while no end has been set.
    pub fn open_start(&self) -> Option<NaiveDate> {
        match self.end {
            None => self.start,
            Some(_) => None,
        }
    }

    pub fn predict(&self) -> Option<PredictionResult> {
        predict_next(&self.history, self.open_start())
    }

    /// Inclusive length of the current period once it has an end.
    pub fn last_period_length(&self) -> Option<i64> {
        let (start, end) = (self.start?, self.end?);
        CycleRecord::new(start, end).ok().map(|r| r.length_days())
    }

    /// Whether `date` falls inside the current period or any logged one.
    /// An open period covers only its start day.
    pub fn is_in_period(&self, date: NaiveDate) -> bool {
        let current = match (self.start, self.end) {
            (Some(start), None) => date == start,
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        };
        current || self.history.iter().any(|r| r.contains(date))
    }

    // --- Daily logs ---

    /// Insert or replace the log for `log.date`.
    pub fn log_day(&mut self, log: DailyLog) {
        if let Some(existing) = self.logs.iter_mut().find(|l| l.date == log.date) {
            *existing = log;
        } else {
            self.logs.push(log);
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.iter().find(|l| l.date == date)
    }

    pub fn logs(&self) -> &[DailyLog] {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daylog::{Mood, Symptom};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_toggle_start_then_close() {
        let mut t = CycleTracker::new();
        assert_eq!(t.toggle(d(2024, 1, 1)).unwrap(), ToggleOutcome::Started(d(2024, 1, 1)));
        assert_eq!(t.open_start(), Some(d(2024, 1, 1)));

        let out = t.toggle(d(2024, 1, 5)).unwrap();
        assert!(matches!(out, ToggleOutcome::Closed(r) if r.length_days() == 5));
        assert_eq!(t.history().len(), 1);
        assert_eq!(t.open_start(), None);
        assert_eq!(t.last_period_length(), Some(5));
    }

    #[test]
    fn test_toggle_same_or_earlier_day_restarts() {
        let mut t = CycleTracker::new();
        t.toggle(d(2024, 1, 5)).unwrap();
        let out = t.toggle(d(2024, 1, 5)).unwrap();
        assert_eq!(out, ToggleOutcome::Restarted(d(2024, 1, 5)));
        let out = t.toggle(d(2024, 1, 3)).unwrap();
        assert_eq!(out, ToggleOutcome::Restarted(d(2024, 1, 3)));
        assert!(t.history().is_empty());
    }

    #[test]
    fn test_toggle_after_close_restarts() {
        let mut t = CycleTracker::new();
        t.toggle(d(2024, 1, 1)).unwrap();
        t.toggle(d(2024, 1, 5)).unwrap();
        let out = t.toggle(d(2024, 1, 29)).unwrap();
        assert_eq!(out, ToggleOutcome::Restarted(d(2024, 1, 29)));
        assert_eq!(t.open_start(), Some(d(2024, 1, 29)));
        assert_eq!(t.end(), None);
        assert_eq!(t.history().len(), 1);
    }

    #[test]
    fn test_predict_uses_open_start() {
        let mut t = CycleTracker::new();
        t.toggle(d(2024, 1, 1)).unwrap();
        t.toggle(d(2024, 1, 5)).unwrap();
        t.toggle(d(2024, 1, 29)).unwrap();
        let p = t.predict().unwrap();
        assert_eq!(p.next_date, d(2024, 2, 26));
        assert_eq!(p.average_interval_days, 28);
    }

    #[test]
    fn test_predict_empty() {
        assert!(CycleTracker::new().predict().is_none());
    }

    #[test]
    fn test_is_in_period() {
        let mut t = CycleTracker::new();
        t.log_period(d(2024, 1, 1), d(2024, 1, 5)).unwrap();
        t.toggle(d(2024, 1, 29)).unwrap();

        assert!(t.is_in_period(d(2024, 1, 3)));
        assert!(t.is_in_period(d(2024, 1, 29)));
        assert!(!t.is_in_period(d(2024, 1, 30)));
        assert!(!t.is_in_period(d(2024, 1, 10)));
    }

    #[test]
    fn test_log_period_rejects_inverted() {
        let mut t = CycleTracker::new();
        assert!(t.log_period(d(2024, 1, 5), d(2024, 1, 1)).is_err());
        assert!(t.history().is_empty());
    }

    #[test]
    fn test_from_parts_drops_orphan_end() {
        let t = CycleTracker::from_parts(vec![], None, Some(d(2024, 1, 1)), vec![]);
        assert_eq!(t.end(), None);
    }

    #[test]
    fn test_log_day_replaces_same_date() {
        let mut t = CycleTracker::new();
        let mut first = DailyLog::new(d(2024, 1, 2));
        first.toggle_symptom(Symptom::Cramps);
        t.log_day(first);

        let mut second = DailyLog::new(d(2024, 1, 2));
        second.mood = Mood::new(5).unwrap();
        t.log_day(second);

        assert_eq!(t.logs().len(), 1);
        let log = t.day(d(2024, 1, 2)).unwrap();
        assert!(log.symptoms.is_empty());
        assert_eq!(log.mood.value(), 5);
    }
}
