//! Wellbeing companion core: a rule-based response engine and a
//! menstrual-cycle predictor, plus the small domain model around them
//! (cycle tracker, day logs, emotion journal, audio session catalog).
//!
//! Response generation is a pure function of the lowercased input and a
//! knowledge table: knowledge-base topics first, then an ordered keyword
//! rule list, then a fixed catch-all. Prediction averages whole-day gaps
//! between consecutive period starts.
//!
//! Zero I/O. Persistence lives behind [`JournalRepository`].

pub mod chat;
pub mod constants;
pub mod cycle;
pub mod daylog;
pub mod emotion;
pub mod error;
pub mod journal;
pub mod knowledge;
pub mod repository;
pub mod response;
pub mod rules;
pub mod serde_compat;
pub mod sessions;
pub mod time;
pub mod tracker;

pub use chat::{ChatSession, ChatTurn};
pub use constants::{DEFAULT_CYCLE_DAYS, GENERIC_FALLBACK, GREETING};
pub use cycle::{CycleRecord, PredictionResult, average_interval_days, predict_next};
pub use daylog::{DailyLog, Mood, Symptom};
pub use emotion::{Emotion, EmotionEntry, EmotionJournal, Tone};
pub use error::CoreError;
pub use journal::Journal;
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use repository::JournalRepository;
pub use response::{MatchSource, Response, generate_response, match_reason, respond};
pub use serde_compat::{CURRENT_VERSION, export_json, import_json};
pub use sessions::{AudioTrack, CATALOG, Category, SessionPlayer, format_time};
pub use time::{parse_date, today};
pub use tracker::{CycleTracker, ToggleOutcome};
