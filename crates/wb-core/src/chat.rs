use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::GREETING;
use crate::knowledge::KnowledgeBase;
use crate::response::{MatchSource, respond};
use crate::time::now_iso8601;

/// One user message and the reply it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub user_text: String,
    pub response_text: String,
    pub created_at: String,
}

impl ChatTurn {
    pub fn new(user_text: &str, response_text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_text: user_text.to_string(),
            response_text: response_text.to_string(),
            created_at: now_iso8601(),
        }
    }
}

/// A conversation: knowledge base plus the turns exchanged so far.
///
/// The engine itself is stateless; the session is what owns the transcript.
#[derive(Clone, Debug)]
pub struct ChatSession {
    kb: KnowledgeBase,
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb,
            turns: Vec::new(),
        }
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Answer `text`. Blank input (after trimming) is ignored.
    pub fn send(&mut self, text: &str) -> Option<&ChatTurn> {
        self.send_traced(text).map(|(turn, _)| turn)
    }

    /// Like [`send`](Self::send), also returning which stage answered.
    pub fn send_traced(&mut self, text: &str) -> Option<(&ChatTurn, MatchSource)> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let response = respond(text, &self.kb);
        self.turns.push(ChatTurn::new(text, &response.text));
        self.turns.last().map(|turn| (turn, response.source))
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }
}
