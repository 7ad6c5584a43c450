use std::fs;
use std::path::Path;

use wb_core::{export_json, import_json};

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Replace this store's journal with the contents of a JSON export file.
    pub fn import_json_file(&self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        self.import_json_str(&json)?;
        tracing::info!(path = %path.display(), "imported journal");
        Ok(())
    }

    /// Replace this store's journal with a JSON export string.
    pub fn import_json_str(&self, json: &str) -> Result<()> {
        let journal =
            import_json(json).map_err(|e| StoreError::InvalidData(format!("invalid JSON: {e}")))?;
        self.save_journal(&journal)
    }

    /// Export the stored journal to a JSON file.
    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json_string()?;
        fs::write(path, json).map_err(|e| {
            StoreError::InvalidData(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Export the stored journal as a JSON string.
    pub fn export_json_string(&self) -> Result<String> {
        let journal = self.load_journal()?;
        export_json(&journal)
            .map_err(|e| StoreError::InvalidData(format!("JSON export failed: {e}")))
    }
}
