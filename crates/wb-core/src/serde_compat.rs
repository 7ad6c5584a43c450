//! JSON serde for the journal export format.
//!
//! camelCase field names, dates as `YYYY-MM-DD`. Collections missing from
//! an import default to empty, and the version string is recorded but not
//! enforced.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::cycle::CycleRecord;
use crate::daylog::{DailyLog, Mood, Symptom};
use crate::emotion::{EmotionEntry, EmotionJournal};
use crate::journal::Journal;
use crate::time::now_iso8601;
use crate::tracker::CycleTracker;

pub const CURRENT_VERSION: &str = "1.0";

// --- Wire format types ---

#[derive(Serialize, Deserialize, Debug)]
pub struct WireExport {
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    pub journal: WireJournal,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct WireJournal {
    #[serde(default)]
    pub cycles: Vec<WireCycle>,
    #[serde(rename = "periodStart", default)]
    pub period_start: Option<NaiveDate>,
    #[serde(rename = "periodEnd", default)]
    pub period_end: Option<NaiveDate>,
    #[serde(rename = "dailyLogs", default)]
    pub daily_logs: Vec<WireDailyLog>,
    #[serde(default)]
    pub emotions: Vec<EmotionEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireCycle {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireDailyLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default)]
    pub notes: String,
}

// --- Conversion ---

impl WireExport {
    /// Convert to a domain journal. Fails on a cycle whose start is after
    /// its end.
    pub fn into_journal(self) -> Result<Journal, serde_json::Error> {
        let wire = self.journal;
        let history = wire
            .cycles
            .into_iter()
            .map(|c| CycleRecord::new(c.start, c.end))
            .collect::<Result<Vec<_>, _>>()
            .map_err(serde_json::Error::custom)?;
        let logs = wire
            .daily_logs
            .into_iter()
            .map(|l| DailyLog {
                date: l.date,
                symptoms: l.symptoms,
                mood: l.mood,
                notes: l.notes,
            })
            .collect();

        Ok(Journal {
            tracker: CycleTracker::from_parts(history, wire.period_start, wire.period_end, logs),
            emotions: EmotionJournal::from_entries(wire.emotions),
        })
    }

    pub fn from_journal(journal: &Journal) -> Self {
        let tracker = &journal.tracker;
        WireExport {
            version: CURRENT_VERSION.to_string(),
            timestamp: now_iso8601(),
            journal: WireJournal {
                cycles: tracker
                    .history()
                    .iter()
                    .map(|r| WireCycle {
                        start: r.start(),
                        end: r.end(),
                    })
                    .collect(),
                period_start: tracker.start(),
                period_end: tracker.end(),
                daily_logs: tracker
                    .logs()
                    .iter()
                    .map(|l| WireDailyLog {
                        date: l.date,
                        symptoms: l.symptoms.clone(),
                        mood: l.mood,
                        notes: l.notes.clone(),
                    })
                    .collect(),
                emotions: journal.emotions.entries().to_vec(),
            },
        }
    }
}

/// Deserialize a JSON export into a [`Journal`].
pub fn import_json(json: &str) -> Result<Journal, serde_json::Error> {
    let wire: WireExport = serde_json::from_str(json)?;
    wire.into_journal()
}

/// Serialize a [`Journal`] to the JSON export format.
pub fn export_json(journal: &Journal) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&WireExport::from_journal(journal))
}
