pub mod config;
pub mod error;
pub mod json_bridge;
pub mod profile;
pub mod schema;
pub mod store;

pub use config::{KNOWLEDGE_FILE, load_knowledge, parse_knowledge};
pub use error::{Result, StoreError};
pub use profile::{DEFAULT_PROFILE, ProfileStore, default_base_dir, sanitize_name};
pub use store::Store;
