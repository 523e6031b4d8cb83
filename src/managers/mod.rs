pub mod backup;
pub mod logging;
pub mod notification;

pub use backup::{BackupManager, BackupOutcome, RunSummary};
pub use notification::{NotificationEvent, Notify, WebhookNotifier};
