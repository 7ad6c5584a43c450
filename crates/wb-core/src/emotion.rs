//! Emotion journal: at most one entry per calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Neutral,
    Excited,
    Anxious,
    Tired,
    Calm,
    Stressed,
}

/// Coarse grouping used when colouring a calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Tense,
    Low,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Neutral,
        Emotion::Excited,
        Emotion::Anxious,
        Emotion::Tired,
        Emotion::Calm,
        Emotion::Stressed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Neutral => "neutral",
            Emotion::Excited => "excited",
            Emotion::Anxious => "anxious",
            Emotion::Tired => "tired",
            Emotion::Calm => "calm",
            Emotion::Stressed => "stressed",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Emotion::Happy | Emotion::Excited | Emotion::Calm => Tone::Positive,
            Emotion::Neutral => Tone::Neutral,
            Emotion::Anxious | Emotion::Stressed => Tone::Tense,
            Emotion::Tired | Emotion::Sad => Tone::Low,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == key)
            .ok_or_else(|| CoreError::UnknownEmotion(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub date: NaiveDate,
    pub emotion: Emotion,
    pub note: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmotionJournal {
    entries: Vec<EmotionEntry>,
}

impl EmotionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<EmotionEntry>) -> Self {
        let mut journal = Self::new();
        for entry in entries {
            journal.insert(entry);
        }
        journal
    }

    /// Record how the day felt. Any earlier entry for the same date is
    /// dropped and the new one goes to the end.
    pub fn record(&mut self, date: NaiveDate, emotion: Emotion, note: &str) -> &EmotionEntry {
        self.insert(EmotionEntry {
            date,
            emotion,
            note: note.trim().to_string(),
        })
    }

    fn insert(&mut self, entry: EmotionEntry) -> &EmotionEntry {
        self.entries.retain(|e| e.date != entry.date);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Drop the entry for `date`, returning it if there was one.
    pub fn remove(&mut self, date: NaiveDate) -> Option<EmotionEntry> {
        let idx = self.entries.iter().position(|e| e.date == date)?;
        Some(self.entries.remove(idx))
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&EmotionEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn tone_for(&self, date: NaiveDate) -> Option<Tone> {
        self.entry_for(date).map(|e| e.emotion.tone())
    }

    pub fn entries(&self) -> &[EmotionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(" Happy ".parse::<Emotion>().unwrap(), Emotion::Happy);
        assert_eq!("STRESSED".parse::<Emotion>().unwrap(), Emotion::Stressed);
        assert!(matches!(
            "grumpy".parse::<Emotion>(),
            Err(CoreError::UnknownEmotion(_))
        ));
    }

    #[test]
    fn test_tones() {
        assert_eq!(Emotion::Calm.tone(), Tone::Positive);
        assert_eq!(Emotion::Neutral.tone(), Tone::Neutral);
        assert_eq!(Emotion::Anxious.tone(), Tone::Tense);
        assert_eq!(Emotion::Sad.tone(), Tone::Low);
    }

    #[test]
    fn test_record_trims_note() {
        let mut j = EmotionJournal::new();
        let e = j.record(d(2024, 3, 1), Emotion::Calm, "  long walk  ");
        assert_eq!(e.note, "long walk");
    }

    #[test]
    fn test_one_entry_per_date() {
        let mut j = EmotionJournal::new();
        j.record(d(2024, 3, 1), Emotion::Sad, "");
        j.record(d(2024, 3, 2), Emotion::Happy, "");
        j.record(d(2024, 3, 1), Emotion::Excited, "better");

        assert_eq!(j.len(), 2);
        assert_eq!(j.entry_for(d(2024, 3, 1)).unwrap().emotion, Emotion::Excited);
        // replaced entry moves to the end
        assert_eq!(j.entries()[1].date, d(2024, 3, 1));
        assert_eq!(j.tone_for(d(2024, 3, 1)), Some(Tone::Positive));
        assert_eq!(j.tone_for(d(2024, 3, 9)), None);
    }

    #[test]
    fn test_remove_by_date() {
        let mut j = EmotionJournal::new();
        j.record(d(2024, 3, 1), Emotion::Sad, "rain");
        j.record(d(2024, 3, 2), Emotion::Happy, "");
        j.record(d(2024, 3, 3), Emotion::Calm, "");

        let removed = j.remove(d(2024, 3, 2)).unwrap();
        assert_eq!(removed.emotion, Emotion::Happy);
        assert_eq!(j.len(), 2);
        assert!(j.entry_for(d(2024, 3, 2)).is_none());
        // remaining entries keep their order
        assert_eq!(j.entries()[0].date, d(2024, 3, 1));
        assert_eq!(j.entries()[1].date, d(2024, 3, 3));
    }

    #[test]
    fn test_remove_missing_date() {
        let mut j = EmotionJournal::new();
        j.record(d(2024, 3, 1), Emotion::Sad, "");
        assert!(j.remove(d(2024, 3, 9)).is_none());
        assert_eq!(j.len(), 1);
        assert!(EmotionJournal::new().remove(d(2024, 3, 1)).is_none());
    }

    #[test]
    fn test_from_entries_deduplicates() {
        let entries = vec![
            EmotionEntry { date: d(2024, 1, 1), emotion: Emotion::Sad, note: String::new() },
            EmotionEntry { date: d(2024, 1, 1), emotion: Emotion::Calm, note: String::new() },
        ];
        let j = EmotionJournal::from_entries(entries);
        assert_eq!(j.len(), 1);
        assert_eq!(j.entries()[0].emotion, Emotion::Calm);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Emotion::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");
    }
}
