//! Configuration module
//!
//! Loads and validates the JSON configuration file. Required fields are
//! `db_username`, `db_password`, `databases`, `backup_directory` and
//! `timezone`; everything else has a default. Webhook templates are looked
//! up by notification kind (`success`, `error`, `upload`).

mod loader;
mod types;

pub use loader::{load_config, ConfigError, Result};
pub use types::{Config, NotificationKind};

/// Expand tilde (~) in path to home directory
pub fn expand_tilde(path: &std::path::Path) -> std::path::PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
