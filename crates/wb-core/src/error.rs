use std::fmt;

use chrono::NaiveDate;

/// Validation failures raised while building domain values.
///
/// The response engine and the cycle predictor never produce these;
/// they only come from constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    InvalidRange { start: NaiveDate, end: NaiveDate },
    InvalidMood(u8),
    InvalidDate(String),
    UnknownEmotion(String),
    UnknownSymptom(String),
    UnknownCategory(String),
    InvalidKnowledgeBase(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidRange { start, end } => {
                write!(f, "invalid range: start {start} is after end {end}")
            }
            CoreError::InvalidMood(m) => write!(f, "mood {m} out of range 1-5"),
            CoreError::InvalidDate(s) => write!(f, "invalid date '{s}', expected YYYY-MM-DD"),
            CoreError::UnknownEmotion(s) => write!(f, "unknown emotion: {s}"),
            CoreError::UnknownSymptom(s) => write!(f, "unknown symptom: {s}"),
            CoreError::UnknownCategory(s) => write!(f, "unknown session category: {s}"),
            CoreError::InvalidKnowledgeBase(msg) => write!(f, "invalid knowledge base: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
