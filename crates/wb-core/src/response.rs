//! Text response engine: free text in, one canned advisory string out.
//!
//! Two passes over the lowercased input:
//! 1. knowledge base, in table order, first topic substring wins;
//! 2. the fallback rule table, in declaration order, first predicate wins.
//!
//! If neither answers, the generic catch-all is returned. The engine holds
//! no state between calls, so identical inputs give identical output.

use std::fmt;

use crate::constants::GENERIC_FALLBACK;
use crate::knowledge::KnowledgeBase;
use crate::rules;

/// Which stage produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSource {
    /// Knowledge-base topic matched directly.
    Knowledge(String),
    /// Named fallback rule fired.
    Rule(&'static str),
    CatchAll,
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSource::Knowledge(topic) => write!(f, "knowledge:{topic}"),
            MatchSource::Rule(name) => write!(f, "rule:{name}"),
            MatchSource::CatchAll => f.write_str("catch-all"),
        }
    }
}

/// A reply together with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub source: MatchSource,
}

/// Resolve `user_text` against `kb` and report how it was answered.
pub fn respond(user_text: &str, kb: &KnowledgeBase) -> Response {
    let lowered = user_text.to_lowercase();

    // A matched topic ends the search even when its content is empty.
    if let Some(entry) = kb.first_topic_in(&lowered) {
        if entry.content.is_empty() {
            return catch_all();
        }
        return Response {
            text: entry.content.clone(),
            source: MatchSource::Knowledge(entry.topic.clone()),
        };
    }

    if let Some(rule) = rules::first_matching(&lowered) {
        let text = rule.reply.render(kb);
        if !text.is_empty() {
            return Response {
                text: text.to_string(),
                source: MatchSource::Rule(rule.name),
            };
        }
    }

    catch_all()
}

fn catch_all() -> Response {
    Response {
        text: GENERIC_FALLBACK.to_string(),
        source: MatchSource::CatchAll,
    }
}

/// Map free text to a single non-empty advisory string.
pub fn generate_response(user_text: &str, kb: &KnowledgeBase) -> String {
    respond(user_text, kb).text
}

/// Only the stage that would answer `user_text`.
pub fn match_reason(user_text: &str, kb: &KnowledgeBase) -> MatchSource {
    respond(user_text, kb).source
}
