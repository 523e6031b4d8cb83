use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Notification kinds with registrable webhook templates.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Upload,
}

impl NotificationKind {
    /// Status placeholder value for webhook templates.
    pub fn status_label(&self) -> &'static str {
        match self {
            NotificationKind::Success => "SUCCESS",
            NotificationKind::Error => "ERROR",
            NotificationKind::Upload => "UPLOAD",
        }
    }
}

/// Root configuration structure, loaded once per run from a JSON file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Database server host
    #[serde(default = "default_db_host")]
    pub db_host: String,

    /// Database server port
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    pub db_username: String,
    pub db_password: String,

    /// Databases to back up, processed in this order
    pub databases: Vec<String>,

    /// Directory where dumps and archives are written
    pub backup_directory: PathBuf,

    /// IANA timezone name used for filenames and notification timestamps
    pub timezone: String,

    /// mysqldump options
    #[serde(default = "default_true")]
    pub single_transaction: bool,
    #[serde(default)]
    pub lock_tables: bool,
    #[serde(default)]
    pub add_drop_database: bool,
    #[serde(default)]
    pub add_drop_table: bool,

    /// Accepted for compatibility; the archiver uses the gzip default and
    /// never reads this value.
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Archive size ceiling in MB; 0 disables the check
    #[serde(default = "default_max_file_size_in_mb")]
    pub max_file_size_in_mb: u64,

    /// Retention threshold per database; 0 disables pruning
    #[serde(default)]
    pub auto_clean_after_x_files: usize,

    /// Webhook notification settings
    #[serde(default)]
    pub enable_webhook: bool,
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub webhook_templates: HashMap<NotificationKind, PathBuf>,

    /// Directory for log files
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,

    /// Timeout for dump subprocess calls
    #[serde(default = "default_dump_timeout")]
    pub dump_timeout_seconds: u64,
}

// Default value functions

fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    3306
}
fn default_true() -> bool {
    true
}
fn default_compression_level() -> u32 {
    6
}
fn default_max_file_size_in_mb() -> u64 {
    1000
}
fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}
fn default_dump_timeout() -> u64 {
    3600
}

#[cfg(test)]
impl Config {
    /// Minimal valid configuration for unit tests.
    pub fn for_tests() -> Self {
        Self {
            db_host: default_db_host(),
            db_port: default_db_port(),
            db_username: "backup".to_string(),
            db_password: "secret".to_string(),
            databases: vec!["appdb".to_string()],
            backup_directory: PathBuf::from("/tmp/backups"),
            timezone: "UTC".to_string(),
            single_transaction: true,
            lock_tables: false,
            add_drop_database: false,
            add_drop_table: false,
            compression_level: default_compression_level(),
            max_file_size_in_mb: default_max_file_size_in_mb(),
            auto_clean_after_x_files: 0,
            enable_webhook: false,
            webhook_url: String::new(),
            webhook_templates: HashMap::new(),
            log_directory: default_log_directory(),
            dump_timeout_seconds: default_dump_timeout(),
        }
    }
}
