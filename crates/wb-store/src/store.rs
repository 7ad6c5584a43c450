use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use wb_core::time::format_date;
use wb_core::{
    ChatTurn, CycleRecord, CycleTracker, DailyLog, Emotion, EmotionEntry, EmotionJournal,
    Journal, JournalRepository, Mood, Symptom, parse_date,
};

use crate::error::{Result, StoreError};
use crate::schema;

const KEY_PERIOD_START: &str = "period_start";
const KEY_PERIOD_END: &str = "period_end";

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM metadata WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        set_metadata_on(&self.conn, key, value)
    }

    // --- Journal ---

    /// Replace the stored journal with `journal` in one transaction.
    pub fn save_journal(&self, journal: &Journal) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute_batch("DELETE FROM cycles; DELETE FROM daily_logs; DELETE FROM emotions;")?;

        let tracker = &journal.tracker;
        set_optional_date_on(&tx, KEY_PERIOD_START, tracker.start())?;
        set_optional_date_on(&tx, KEY_PERIOD_END, tracker.end())?;

        for record in tracker.history() {
            tx.execute(
                "INSERT INTO cycles (start_date, end_date) VALUES (?1, ?2)",
                params![format_date(record.start()), format_date(record.end())],
            )?;
        }

        for log in tracker.logs() {
            tx.execute(
                "INSERT INTO daily_logs (date, symptoms, mood, notes) VALUES (?1, ?2, ?3, ?4)",
                params![
                    format_date(log.date),
                    encode_symptoms(&log.symptoms),
                    log.mood.value(),
                    log.notes,
                ],
            )?;
        }

        for entry in journal.emotions.entries() {
            tx.execute(
                "INSERT INTO emotions (date, emotion, note) VALUES (?1, ?2, ?3)",
                params![format_date(entry.date), entry.emotion.as_str(), entry.note],
            )?;
        }

        tx.commit()?;
        tracing::debug!(
            cycles = tracker.history().len(),
            logs = tracker.logs().len(),
            emotions = journal.emotions.len(),
            "journal saved"
        );
        Ok(())
    }

    pub fn load_journal(&self) -> Result<Journal> {
        let start = self.load_optional_date(KEY_PERIOD_START)?;
        let end = self.load_optional_date(KEY_PERIOD_END)?;
        let history = self.load_cycles()?;
        let logs = self.load_daily_logs()?;
        let emotions = self.load_emotions()?;

        Ok(Journal {
            tracker: CycleTracker::from_parts(history, start, end, logs),
            emotions: EmotionJournal::from_entries(emotions),
        })
    }

    fn load_optional_date(&self, key: &str) -> Result<Option<NaiveDate>> {
        match self.get_metadata(key)? {
            Some(s) if !s.is_empty() => Ok(Some(parse_date(&s)?)),
            _ => Ok(None),
        }
    }

    fn load_cycles(&self) -> Result<Vec<CycleRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT start_date, end_date FROM cycles ORDER BY rowid")?;
        let rows: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(start, end)| -> Result<CycleRecord> {
                Ok(CycleRecord::new(parse_date(&start)?, parse_date(&end)?)?)
            })
            .collect()
    }

    fn load_daily_logs(&self) -> Result<Vec<DailyLog>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, symptoms, mood, notes FROM daily_logs ORDER BY rowid")?;
        let rows: Vec<(String, String, u8, String)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(date, symptoms, mood, notes)| -> Result<DailyLog> {
                Ok(DailyLog {
                    date: parse_date(&date)?,
                    symptoms: decode_symptoms(&symptoms)?,
                    mood: Mood::new(mood)?,
                    notes,
                })
            })
            .collect()
    }

    fn load_emotions(&self) -> Result<Vec<EmotionEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, emotion, note FROM emotions ORDER BY rowid")?;
        let rows: Vec<(String, String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(date, emotion, note)| -> Result<EmotionEntry> {
                Ok(EmotionEntry {
                    date: parse_date(&date)?,
                    emotion: emotion.parse::<Emotion>()?,
                    note,
                })
            })
            .collect()
    }

    // --- Chat transcript ---

    pub fn append_turn(&self, turn: &ChatTurn) -> Result<()> {
        self.conn.execute(
            "INSERT INTO chat_turns (id, user_text, response_text, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                turn.id.to_string(),
                turn.user_text,
                turn.response_text,
                turn.created_at,
            ],
        )?;
        Ok(())
    }

    /// The last `limit` turns, oldest first.
    pub fn recent_turns(&self, limit: usize) -> Result<Vec<ChatTurn>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_text, response_text, created_at
             FROM chat_turns ORDER BY rowid DESC LIMIT ?1",
        )?;
        let rows: Vec<(String, String, String, String)> = stmt
            .query_map([limit as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut turns = rows
            .into_iter()
            .map(|(id, user_text, response_text, created_at)| -> Result<ChatTurn> {
                Ok(ChatTurn {
                    id: parse_uuid(&id)?,
                    user_text,
                    response_text,
                    created_at,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        turns.reverse();
        Ok(turns)
    }

    pub fn turn_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chat_turns", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn clear_turns(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM chat_turns", [])?)
    }
}

impl JournalRepository for Store {
    type Error = StoreError;

    fn load_journal(&self) -> Result<Journal> {
        Store::load_journal(self)
    }

    fn save_journal(&self, journal: &Journal) -> Result<()> {
        Store::save_journal(self, journal)
    }
}

fn set_metadata_on(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn set_optional_date_on(conn: &Connection, key: &str, date: Option<NaiveDate>) -> Result<()> {
    match date {
        Some(d) => set_metadata_on(conn, key, &format_date(d)),
        None => {
            conn.execute("DELETE FROM metadata WHERE key = ?1", [key])?;
            Ok(())
        }
    }
}

/// Symptom ids joined with commas, in selection order.
fn encode_symptoms(symptoms: &[Symptom]) -> String {
    symptoms
        .iter()
        .map(|s| s.id().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_symptoms(s: &str) -> Result<Vec<Symptom>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .ok()
                .and_then(Symptom::from_id)
                .ok_or_else(|| StoreError::InvalidData(format!("invalid symptom id '{part}'")))
        })
        .collect()
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| StoreError::InvalidData(format!("invalid UUID '{s}': {e}")))
}
