//! Optional `knowledge.toml` overriding the built-in knowledge table.
//!
//! ```toml
//! [[entry]]
//! topic = "Sleep"
//! content = "Aim for 7-9 hours..."
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use wb_core::{KnowledgeBase, KnowledgeEntry};

use crate::error::{Result, StoreError};

pub const KNOWLEDGE_FILE: &str = "knowledge.toml";

#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    entry: Vec<KnowledgeEntry>,
}

/// Parse a knowledge table from TOML. Entry order is preserved.
pub fn parse_knowledge(content: &str) -> Result<KnowledgeBase> {
    let file: KnowledgeFile = toml::from_str(content)
        .map_err(|e| StoreError::InvalidData(format!("invalid {KNOWLEDGE_FILE}: {e}")))?;
    Ok(KnowledgeBase::new(file.entry)?)
}

/// Load the knowledge table at `path`, or the built-in one when the file
/// does not exist.
pub fn load_knowledge(path: &Path) -> Result<KnowledgeBase> {
    if !path.exists() {
        return Ok(KnowledgeBase::standard());
    }
    let content = fs::read_to_string(path).map_err(|e| {
        StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
    })?;
    let kb = parse_knowledge(&content)?;
    tracing::info!(path = %path.display(), entries = kb.len(), "loaded knowledge table");
    Ok(kb)
}
