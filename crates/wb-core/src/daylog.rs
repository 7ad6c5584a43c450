use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MOOD, MOOD_MAX, MOOD_MIN};
use crate::error::{CoreError, Result};

/// Symptoms that can be ticked for a day. Ids are stable (1-6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Cramps,
    Headache,
    Bloating,
    Fatigue,
    MoodSwings,
    Cravings,
}

impl Symptom {
    pub const ALL: [Symptom; 6] = [
        Symptom::Cramps,
        Symptom::Headache,
        Symptom::Bloating,
        Symptom::Fatigue,
        Symptom::MoodSwings,
        Symptom::Cravings,
    ];

    pub fn id(self) -> u8 {
        match self {
            Symptom::Cramps => 1,
            Symptom::Headache => 2,
            Symptom::Bloating => 3,
            Symptom::Fatigue => 4,
            Symptom::MoodSwings => 5,
            Symptom::Cravings => 6,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Symptom::Cramps => "Cramps",
            Symptom::Headache => "Headache",
            Symptom::Bloating => "Bloating",
            Symptom::Fatigue => "Fatigue",
            Symptom::MoodSwings => "Mood Swings",
            Symptom::Cravings => "Cravings",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the label in any case, with space, dash or underscore
/// separators ("mood swings", "mood-swings", "MOOD_SWINGS").
impl FromStr for Symptom {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sym| sym.label().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| CoreError::UnknownSymptom(s.to_string()))
    }
}

/// Mood on a 1-5 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mood(u8);

impl Mood {
    pub fn new(value: u8) -> Result<Self> {
        if (MOOD_MIN..=MOOD_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidMood(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self(DEFAULT_MOOD)
    }
}

impl TryFrom<u8> for Mood {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        Mood::new(value)
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> u8 {
        mood.0
    }
}

/// Symptoms, mood and free-form notes for one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub symptoms: Vec<Symptom>,
    pub mood: Mood,
    pub notes: String,
}

impl DailyLog {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            symptoms: Vec::new(),
            mood: Mood::default(),
            notes: String::new(),
        }
    }

    /// Add the symptom if absent, remove it if present.
    pub fn toggle_symptom(&mut self, symptom: Symptom) {
        if let Some(pos) = self.symptoms.iter().position(|s| *s == symptom) {
            self.symptoms.remove(pos);
        } else {
            self.symptoms.push(symptom);
        }
    }

    /// Selected symptom labels joined with ", " in selection order.
    pub fn symptom_names(&self) -> String {
        self.symptoms
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
