//! Database Backup Manager Library
//!
//! This library provides scheduled MySQL/MariaDB backup orchestration:
//! dumping, compression, retention and webhook notifications.

pub mod config;
pub mod managers;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, Config, NotificationKind};
pub use managers::backup::{BackupManager, BackupOutcome, RunSummary};
pub use managers::logging::{init_console_logging, init_logging, LogGuard};
pub use managers::notification::{NotificationEvent, Notify, WebhookNotifier};
