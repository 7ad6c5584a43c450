use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;
use wb_core::time::format_date;
use wb_core::{
    ChatTurn, CoreError, Emotion, Journal, KnowledgeBase, PredictionResult, ToggleOutcome,
    respond,
};
use wb_store::{ProfileStore, StoreError};

use crate::parse_day;

#[derive(Clone)]
pub struct WbServer {
    state: Arc<Mutex<ServerState>>,
    tool_router: ToolRouter<Self>,
}

/// The journal is never cached; each tool reads it from the profile database.
struct ServerState {
    kb: KnowledgeBase,
    store: ProfileStore,
}

impl ServerState {
    fn journal(&self) -> Result<Journal, McpError> {
        self.store.load_journal().map_err(store_error)
    }
}

impl WbServer {
    pub fn new(store: ProfileStore) -> std::result::Result<Self, String> {
        let kb = store
            .knowledge()
            .map_err(|e| format!("failed to load knowledge table: {e}"))?;
        Ok(Self {
            state: Arc::new(Mutex::new(ServerState { kb, store })),
            tool_router: Self::tool_router(),
        })
    }

    fn prediction_json(prediction: Option<PredictionResult>) -> serde_json::Value {
        match prediction {
            Some(p) => serde_json::json!({
                "next_date": format_date(p.next_date),
                "average_interval_days": p.average_interval_days,
            }),
            None => serde_json::json!({
                "next_date": null,
                "average_interval_days": null,
            }),
        }
    }
}

fn json_result(value: &serde_json::Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )])
}

fn store_error(e: StoreError) -> McpError {
    match e {
        StoreError::Core(e) => McpError::invalid_params(e.to_string(), None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

fn day_param(date: Option<&str>) -> Result<chrono::NaiveDate, McpError> {
    parse_day(date.unwrap_or("today")).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

// --- Tool parameter types ---

#[derive(Debug, Deserialize, JsonSchema)]
struct ChatRequest {
    /// The user's message
    text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TopicsRequest {
    /// Optional case-insensitive filter over topic titles and text
    search: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PeriodToggleRequest {
    /// Date as YYYY-MM-DD; defaults to today
    date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmotionLogRequest {
    /// One of: happy, sad, neutral, excited, anxious, tired, calm, stressed
    emotion: String,
    /// Date as YYYY-MM-DD; defaults to today
    date: Option<String>,
    /// Optional free-form note
    note: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct EmotionDeleteRequest {
    /// Date as YYYY-MM-DD
    date: String,
}

#[tool_router]
impl WbServer {
    #[tool(
        description = "Answer a wellness question. Returns a canned advisory reply drawn from the knowledge table or the keyword rules, plus which stage matched. The exchange is recorded in the profile's chat history."
    )]
    async fn wb_chat(
        &self,
        Parameters(req): Parameters<ChatRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = req.text.trim();
        if text.is_empty() {
            return Err(McpError::invalid_params("text must not be empty", None));
        }

        let state = self.state.lock().await;
        let response = respond(text, &state.kb);
        tracing::debug!(source = %response.source, "response matched");

        if let Err(e) = state
            .store
            .store()
            .append_turn(&ChatTurn::new(text, &response.text))
        {
            tracing::error!("failed to record chat turn: {e}");
        }

        Ok(json_result(&serde_json::json!({
            "reply": response.text,
            "source": response.source.to_string(),
        })))
    }

    #[tool(description = "List knowledge-base topics with a short preview of each.")]
    async fn wb_topics(
        &self,
        Parameters(req): Parameters<TopicsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = self.state.lock().await;
        let topics: Vec<_> = state
            .kb
            .search(req.search.as_deref().unwrap_or(""))
            .into_iter()
            .map(|e| serde_json::json!({ "topic": e.topic, "preview": e.preview() }))
            .collect();

        Ok(json_result(&serde_json::json!({ "topics": topics })))
    }

    #[tool(
        description = "Predict the next period start from logged history. next_date is null when nothing has been logged yet."
    )]
    async fn wb_predict(&self) -> Result<CallToolResult, McpError> {
        let state = self.state.lock().await;
        let journal = state.journal()?;
        Ok(json_result(&Self::prediction_json(journal.tracker.predict())))
    }

    #[tool(
        description = "Toggle the period tracker with a date: the first call marks a start, a later date closes the period and records it, anything else restarts from the given date."
    )]
    async fn wb_period_toggle(
        &self,
        Parameters(req): Parameters<PeriodToggleRequest>,
    ) -> Result<CallToolResult, McpError> {
        let date = day_param(req.date.as_deref())?;
        let state = self.state.lock().await;
        let (outcome, prediction) = state
            .store
            .update_journal(|j| {
                let outcome = j.tracker.toggle(date)?;
                Ok::<_, CoreError>((outcome, j.tracker.predict()))
            })
            .map_err(store_error)?;

        let mut result = match outcome {
            ToggleOutcome::Started(d) => serde_json::json!({
                "outcome": "started",
                "date": format_date(d),
            }),
            ToggleOutcome::Restarted(d) => serde_json::json!({
                "outcome": "restarted",
                "date": format_date(d),
            }),
            ToggleOutcome::Closed(r) => serde_json::json!({
                "outcome": "closed",
                "start": format_date(r.start()),
                "end": format_date(r.end()),
                "length_days": r.length_days(),
            }),
        };
        result["prediction"] = Self::prediction_json(prediction);

        Ok(json_result(&result))
    }

    #[tool(
        description = "Record how a day felt in the emotion journal. One entry per date; logging the same date again replaces it."
    )]
    async fn wb_emotion_log(
        &self,
        Parameters(req): Parameters<EmotionLogRequest>,
    ) -> Result<CallToolResult, McpError> {
        let date = day_param(req.date.as_deref())?;
        let emotion: Emotion = req
            .emotion
            .parse()
            .map_err(|e: CoreError| McpError::invalid_params(e.to_string(), None))?;
        let note = req.note.as_deref().unwrap_or("");

        let state = self.state.lock().await;
        let (entry, entries) = state
            .store
            .update_journal(|j| {
                let entry = j.emotions.record(date, emotion, note).clone();
                Ok::<_, CoreError>((entry, j.emotions.len()))
            })
            .map_err(store_error)?;

        Ok(json_result(&serde_json::json!({
            "date": format_date(entry.date),
            "emotion": entry.emotion,
            "tone": entry.emotion.tone(),
            "note": entry.note,
            "entries": entries,
        })))
    }

    #[tool(
        description = "Delete the emotion journal entry for a date. deleted is false when that date had no entry."
    )]
    async fn wb_emotion_delete(
        &self,
        Parameters(req): Parameters<EmotionDeleteRequest>,
    ) -> Result<CallToolResult, McpError> {
        let date = day_param(Some(&req.date))?;

        let state = self.state.lock().await;
        let (removed, entries) = state
            .store
            .update_journal(|j| {
                let removed = j.emotions.remove(date);
                Ok::<_, CoreError>((removed, j.emotions.len()))
            })
            .map_err(store_error)?;

        Ok(json_result(&serde_json::json!({
            "date": format_date(date),
            "deleted": removed.is_some(),
            "emotion": removed.map(|e| e.emotion),
            "entries": entries,
        })))
    }

    #[tool(description = "Profile statistics: logged cycles, day logs, emotions and chat turns.")]
    async fn wb_stats(&self) -> Result<CallToolResult, McpError> {
        let state = self.state.lock().await;
        let turns = state
            .store
            .store()
            .turn_count()
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let journal = state.journal()?;
        let tracker = &journal.tracker;

        Ok(json_result(&serde_json::json!({
            "profile": state.store.profile(),
            "cycles": tracker.history().len(),
            "open_period": tracker.open_start().map(format_date),
            "daily_logs": tracker.logs().len(),
            "emotions": journal.emotions.len(),
            "turns": turns,
        })))
    }
}

#[tool_handler]
impl ServerHandler for WbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Wellbeing companion for one profile.\n\n\
                 - wb_chat answers general wellness questions with canned guidance. \
                   It is not medical advice; suggest a professional for anything serious.\n\
                 - wb_period_toggle / wb_predict track period starts and project the next one \
                   from the average gap between starts (28 days until two starts are known).\n\
                 - wb_emotion_log keeps one mood entry per day; wb_emotion_delete removes one.\n\
                 - Dates are YYYY-MM-DD and default to today."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
