use std::path::{Path, PathBuf};
use std::{env, fs};

use wb_core::{Journal, KnowledgeBase};

use crate::config::{KNOWLEDGE_FILE, load_knowledge};
use crate::error::{Result, StoreError};
use crate::store::Store;

pub const DEFAULT_PROFILE: &str = "default";

/// Default base directory for all wellbeing storage.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".wellbeing")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Sanitize a profile name for use as a filename. Blank names map to
/// [`DEFAULT_PROFILE`].
pub fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_PROFILE.to_string();
    }
    trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// One database per profile under a shared base directory.
///
/// Layout:
/// ```text
/// ~/.wellbeing/
/// ├── knowledge.toml      (optional)
/// └── profiles/
///     ├── default.db
///     └── <profile>.db
/// ```
pub struct ProfileStore {
    store: Store,
    profile: String,
    base: Option<PathBuf>,
}

impl ProfileStore {
    /// Open the profile's store, creating directories as needed.
    /// `base_dir` overrides `~/.wellbeing` (tests, `WB_DATA_DIR`).
    pub fn open(profile: Option<&str>, base_dir: Option<&Path>) -> Result<Self> {
        let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
        let profiles_dir = base.join("profiles");

        fs::create_dir_all(&profiles_dir).map_err(|e| {
            StoreError::InvalidData(format!("failed to create {}: {e}", profiles_dir.display()))
        })?;

        let profile = sanitize_name(profile.unwrap_or(DEFAULT_PROFILE));
        let path = profiles_dir.join(format!("{profile}.db"));
        tracing::debug!(path = %path.display(), "opening profile store");
        let store = Store::open(&path)?;

        Ok(Self {
            store,
            profile,
            base: Some(base),
        })
    }

    /// In-memory store with the built-in knowledge table (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            store: Store::open_in_memory()?,
            profile: "test".to_string(),
            base: None,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// `<base>/knowledge.toml` if present, otherwise the built-in table.
    pub fn knowledge(&self) -> Result<KnowledgeBase> {
        match &self.base {
            Some(base) => load_knowledge(&base.join(KNOWLEDGE_FILE)),
            None => Ok(KnowledgeBase::standard()),
        }
    }

    pub fn load_journal(&self) -> Result<Journal> {
        self.store.load_journal()
    }

    pub fn save_journal(&self, journal: &Journal) -> Result<()> {
        self.store.save_journal(journal)
    }

    /// Load, apply `f`, and save only if `f` succeeds.
    pub fn update_journal<T, E>(
        &self,
        f: impl FnOnce(&mut Journal) -> std::result::Result<T, E>,
    ) -> Result<T>
    where
        E: Into<StoreError>,
    {
        let mut journal = self.store.load_journal()?;
        let out = f(&mut journal).map_err(Into::<StoreError>::into)?;
        self.store.save_journal(&journal)?;
        Ok(out)
    }
}
