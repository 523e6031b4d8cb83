//! Backup manager - orchestrates the per-database pipeline
//!
//! For each configured database: size query (best-effort), dump, verify,
//! notify, compress, size-check, prune, notify. Failures are isolated per
//! database; one database failing never aborts the run.

use crate::config::Config;
use crate::managers::notification::{Notify, NotificationEvent, WebhookNotifier};
use crate::utils::size::{bytes_to_mb, format_size};
use crate::utils::{archive, retention, timestamp};
use crate::utils::mysql::{DumpClient, MysqlClient};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Terminal state of one database's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    Success,
    DumpFailed,
    CompressionFailed,
    SizeExceeded,
    UnexpectedError,
}

/// Per-database state, owned by the manager for the duration of one
/// database's processing.
#[derive(Debug)]
pub struct BackupAttempt {
    pub database: String,
    pub dump_path: Option<PathBuf>,
    pub archive_path: Option<PathBuf>,
    pub db_size: String,
    pub outcome: BackupOutcome,
}

impl BackupAttempt {
    fn new(database: &str) -> Self {
        Self {
            database: database.to_string(),
            dump_path: None,
            archive_path: None,
            db_size: "Unknown".to_string(),
            outcome: BackupOutcome::UnexpectedError,
        }
    }
}

/// Ordered per-database results of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    results: Vec<(String, bool)>,
}

impl RunSummary {
    fn record(&mut self, database: &str, success: bool) {
        self.results.push((database.to_string(), success));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, bool)> {
        self.results.iter()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, ok)| *ok).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|(_, ok)| *ok)
    }
}

pub struct BackupManager {
    config: Config,
    timezone: Tz,
    client: Box<dyn DumpClient>,
    notifier: Box<dyn Notify>,
}

impl BackupManager {
    /// Create a manager with the real mysqldump client and webhook notifier.
    pub fn new(config: Config) -> Self {
        let notifier = WebhookNotifier::from_config(&config);
        Self::with_collaborators(config, Box::new(MysqlClient::new()), Box::new(notifier))
    }

    /// Create a manager with injected collaborators (used by tests).
    pub fn with_collaborators(
        config: Config,
        client: Box<dyn DumpClient>,
        notifier: Box<dyn Notify>,
    ) -> Self {
        let timezone = timestamp::resolve_timezone(&config.timezone);
        Self {
            config,
            timezone,
            client,
            notifier,
        }
    }

    fn notify(&self, event: NotificationEvent) {
        // Delivery failures are logged by the notifier and never escalate.
        self.notifier.notify(&event);
    }

    /// Full run: pre-flight checks, all databases, summary. Returns the
    /// process exit code (0 only if every database succeeded).
    pub fn run(&self) -> i32 {
        info!("{}", "=".repeat(60));
        info!("Database Backup System Starting");
        info!("{}", "=".repeat(60));

        match self.client.check_available() {
            Ok(version) => info!("mysqldump is available: {}", version),
            Err(e) => {
                error!("{:#}", e);
                error!("mysqldump not found. Exiting.");
                return 1;
            }
        }

        if let Err(e) = self.ensure_backup_directory() {
            let message = format!(
                "Cannot create or access backup directory: {}",
                self.config.backup_directory.display()
            );
            error!("{}: {:#}", message, e);
            self.notify(NotificationEvent::error(
                "ALL",
                &self.config.backup_directory,
                &message,
            ));
            error!("Backup process aborted due to directory error.");
            return 1;
        }

        let summary = self.run_all();

        info!("{}", "=".repeat(60));
        info!(
            "Backup Summary: {}/{} successful",
            summary.succeeded(),
            summary.total()
        );
        for (database, success) in summary.iter() {
            let status = if *success { "SUCCESS" } else { "FAILED" };
            info!("  {}: {}", database, status);
        }
        info!("Database Backup System Finished");

        if summary.all_succeeded() {
            0
        } else {
            1
        }
    }

    /// Back up every configured database, in configuration order.
    pub fn run_all(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        info!(
            "Starting backup for {} database(s)",
            self.config.databases.len()
        );

        for database in &self.config.databases {
            info!("Processing database: {}", database);

            let success = match self.process_database(database) {
                Ok(attempt) => attempt.outcome == BackupOutcome::Success,
                Err(e) => {
                    error!("Unexpected error backing up {}: {:#}", database, e);
                    self.notify(NotificationEvent::error(
                        database,
                        &self.config.backup_directory,
                        &format!("{:#}", e),
                    ));
                    false
                }
            };

            summary.record(database, success);
        }

        summary
    }

    /// One database's pipeline. Handled stage failures come back as an
    /// attempt with the matching outcome, their notification already sent;
    /// an Err is an unexpected failure the caller reports.
    fn process_database(&self, database: &str) -> Result<BackupAttempt> {
        let mut attempt = BackupAttempt::new(database);

        // Size query is best-effort and never aborts the pipeline.
        attempt.db_size = match self.client.database_size(&self.config, database) {
            Ok(bytes) => format_size(bytes),
            Err(e) => {
                warn!("Failed to query size of '{}': {:#}", database, e);
                "Unknown".to_string()
            }
        };
        info!("Database size: {}", attempt.db_size);

        let dump_path = match self.dump_database(database) {
            Ok(path) => path,
            Err(e) => {
                error!("mysqldump failed for {}: {:#}", database, e);
                attempt.outcome = BackupOutcome::DumpFailed;
                self.notify(
                    NotificationEvent::error(
                        database,
                        &self.config.backup_directory,
                        "mysqldump failed or produced empty backup",
                    )
                    .with_db_size(&attempt.db_size),
                );
                return Ok(attempt);
            }
        };
        attempt.dump_path = Some(dump_path.clone());
        info!("Backup created successfully: {}", dump_path.display());

        let dump_size = fs::metadata(&dump_path)
            .with_context(|| format!("Failed to stat dump file: {}", dump_path.display()))?
            .len();
        self.notify(NotificationEvent::success(
            database,
            &dump_path,
            &attempt.db_size,
            &format_size(dump_size),
        ));

        let archive_path = match archive::compress_file(&dump_path) {
            Ok(path) => path,
            Err(e) => {
                attempt.outcome = BackupOutcome::CompressionFailed;
                cleanup_file(&dump_path);
                self.notify(
                    NotificationEvent::error(
                        database,
                        &dump_path,
                        &format!("Failed to compress backup: {:#}", e),
                    )
                    .with_db_size(&attempt.db_size),
                );
                return Ok(attempt);
            }
        };
        attempt.archive_path = Some(archive_path.clone());

        let archive_size = fs::metadata(&archive_path)
            .with_context(|| format!("Failed to stat archive: {}", archive_path.display()))?
            .len();
        info!("Compressed backup: {}", format_size(archive_size));

        if self.config.max_file_size_in_mb > 0
            && bytes_to_mb(archive_size) > self.config.max_file_size_in_mb as f64
        {
            let message = format!(
                "Backup file size ({}) exceeds maximum allowed size ({}MB)",
                format_size(archive_size),
                self.config.max_file_size_in_mb
            );
            error!("{}", message);

            // Notification references the archive before it is removed.
            self.notify(
                NotificationEvent::error(database, &archive_path, &message)
                    .with_db_size(&attempt.db_size),
            );

            cleanup_file(&archive_path);
            // The raw dump is already gone after successful compression;
            // removing it again is idempotent.
            cleanup_file(&dump_path);

            attempt.outcome = BackupOutcome::SizeExceeded;
            return Ok(attempt);
        }

        self.apply_retention(database)?;

        self.notify(NotificationEvent::upload(
            database,
            &archive_path,
            &attempt.db_size,
            &format_size(archive_size),
        ));

        info!("Successfully backed up and compressed: {}", database);
        attempt.outcome = BackupOutcome::Success;
        Ok(attempt)
    }

    /// Run the dump tool and verify it produced a non-empty file.
    fn dump_database(&self, database: &str) -> Result<PathBuf> {
        let filename = format!(
            "{}-{}.sql",
            database,
            timestamp::file_timestamp(self.timezone)
        );
        let path = self.config.backup_directory.join(filename);

        if let Err(e) = self.client.dump_database(&self.config, database, &path) {
            cleanup_file(&path);
            return Err(e);
        }

        let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            cleanup_file(&path);
            anyhow::bail!(
                "Backup file is empty or was not created: {}",
                path.display()
            );
        }

        Ok(path)
    }

    /// Prune old archives when a retention threshold is configured and the
    /// count for this database has reached it.
    ///
    /// Scan and prune errors propagate, so a backup whose archive was already
    /// written still ends up recorded as failed and skips its Upload
    /// notification. Retention failing means the backup directory is not in
    /// the state the operator configured, which warrants surfacing over a
    /// quiet success.
    fn apply_retention(&self, database: &str) -> Result<()> {
        let keep = self.config.auto_clean_after_x_files;
        if keep == 0 {
            return Ok(());
        }

        let count = retention::backup_count(&self.config.backup_directory, database)?;
        if count >= keep {
            let deleted =
                retention::prune_old_backups(&self.config.backup_directory, database, keep)?;
            if deleted > 0 {
                info!("Cleaned up {} old backup(s) for {}", deleted, database);
            }
        }

        Ok(())
    }

    fn ensure_backup_directory(&self) -> Result<()> {
        let dir = &self.config.backup_directory;
        if dir.exists() {
            if !dir.is_dir() {
                anyhow::bail!("Path exists but is not a directory: {}", dir.display());
            }
            info!("Backup directory exists: {}", dir.display());
            return Ok(());
        }

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        info!("Created backup directory: {}", dir.display());
        Ok(())
    }
}

/// Delete a file if it exists; failures are logged, not propagated.
fn cleanup_file(path: &Path) {
    if !path.exists() {
        return;
    }
    match fs::remove_file(path) {
        Ok(()) => info!("Cleaned up temporary file: {}", path.display()),
        Err(e) => warn!("Failed to cleanup file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationKind;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// What the fake dump tool should do for a given database.
    enum DumpBehavior {
        /// Write these bytes to the dump file.
        Write(Vec<u8>),
        /// Fail as if mysqldump exited nonzero.
        Fail,
        /// Create the dump file but leave it empty.
        WriteEmpty,
        /// Create a directory at the dump path so compression fails.
        WriteDirectory,
    }

    struct FakeDumpClient {
        behaviors: HashMap<String, DumpBehavior>,
        size_fails: bool,
    }

    impl FakeDumpClient {
        fn new(behaviors: Vec<(&str, DumpBehavior)>) -> Self {
            Self {
                behaviors: behaviors
                    .into_iter()
                    .map(|(db, b)| (db.to_string(), b))
                    .collect(),
                size_fails: false,
            }
        }

        fn with_size_failure(mut self) -> Self {
            self.size_fails = true;
            self
        }
    }

    impl DumpClient for FakeDumpClient {
        fn check_available(&self) -> Result<String> {
            Ok("mysqldump 8.0 (fake)".to_string())
        }

        fn dump_database(&self, _config: &Config, database: &str, dest: &Path) -> Result<()> {
            match self.behaviors.get(database) {
                Some(DumpBehavior::Write(bytes)) => {
                    fs::write(dest, bytes)?;
                    Ok(())
                }
                Some(DumpBehavior::Fail) => {
                    anyhow::bail!("Command failed with exit code Some(2): Access denied")
                }
                Some(DumpBehavior::WriteEmpty) => {
                    fs::write(dest, b"")?;
                    Ok(())
                }
                Some(DumpBehavior::WriteDirectory) => {
                    fs::create_dir(dest)?;
                    Ok(())
                }
                None => anyhow::bail!("no behavior configured for {}", database),
            }
        }

        fn database_size(&self, _config: &Config, _database: &str) -> Result<u64> {
            if self.size_fails {
                anyhow::bail!("mysql not reachable")
            }
            Ok(1_572_864)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<NotificationEvent>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<NotificationEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Notify for RecordingNotifier {
        fn notify(&self, event: &NotificationEvent) -> bool {
            self.events.lock().unwrap().push(event.clone());
            true
        }
    }

    fn test_config(backup_dir: &Path) -> Config {
        let mut config = Config::for_tests();
        config.backup_directory = backup_dir.to_path_buf();
        config
    }

    /// Build a manager over fakes, returning the notifier handle for
    /// assertions. The notifier is shared via a leaked reference because the
    /// manager owns its collaborators.
    fn manager_with(
        config: Config,
        client: FakeDumpClient,
    ) -> (BackupManager, &'static RecordingNotifier) {
        let notifier: &'static RecordingNotifier = Box::leak(Box::default());
        let manager = BackupManager::with_collaborators(
            config,
            Box::new(client),
            Box::new(NotifierRef(notifier)),
        );
        (manager, notifier)
    }

    struct NotifierRef(&'static RecordingNotifier);

    impl Notify for NotifierRef {
        fn notify(&self, event: &NotificationEvent) -> bool {
            self.0.notify(event)
        }
    }

    fn kinds(events: &[NotificationEvent]) -> Vec<NotificationKind> {
        events.iter().map(|e| e.kind).collect()
    }

    /// 3MB of bytes gzip cannot usefully compress, so the archive stays
    /// above a 1MB ceiling.
    fn incompressible(len: usize) -> Vec<u8> {
        let mut state: u64 = 0x243f6a8885a308d3;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 33) as u8
            })
            .collect()
    }

    #[test]
    fn test_run_all_mixed_outcomes_and_notifications() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(dir.path());
        config.databases = vec!["first".to_string(), "second".to_string()];

        let client = FakeDumpClient::new(vec![
            ("first", DumpBehavior::Write(b"-- dump\nSELECT 1;\n".to_vec())),
            ("second", DumpBehavior::Fail),
        ]);
        let (manager, notifier) = manager_with(config, client);

        let summary = manager.run_all();

        let results: Vec<_> = summary.iter().cloned().collect();
        assert_eq!(
            results,
            vec![("first".to_string(), true), ("second".to_string(), false)]
        );
        assert!(!summary.all_succeeded());

        // Exactly three notifications: success and upload for the first
        // database, one error for the second.
        let events = notifier.events();
        assert_eq!(
            kinds(&events),
            vec![
                NotificationKind::Success,
                NotificationKind::Upload,
                NotificationKind::Error
            ]
        );
        assert_eq!(events[0].database, "first");
        assert_eq!(events[1].database, "first");
        assert_eq!(events[2].database, "second");
    }

    #[test]
    fn test_successful_pipeline_leaves_only_archive() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let client = FakeDumpClient::new(vec![(
            "appdb",
            DumpBehavior::Write(b"CREATE TABLE t (id INT);".to_vec()),
        )]);
        let (manager, notifier) = manager_with(config, client);

        let summary = manager.run_all();
        assert!(summary.all_succeeded());

        let files: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("appdb-"));
        assert!(files[0].ends_with(".sql.tar.gz"));

        // Upload event references the archive
        let events = notifier.events();
        let upload = events
            .iter()
            .find(|e| e.kind == NotificationKind::Upload)
            .unwrap();
        assert!(upload
            .filepath
            .as_ref()
            .unwrap()
            .to_string_lossy()
            .ends_with(".sql.tar.gz"));
    }

    #[test]
    fn test_dump_failure_error_references_backup_directory() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::Fail)]);
        let (manager, notifier) = manager_with(config, client);

        let summary = manager.run_all();
        assert!(!summary.all_succeeded());

        let events = notifier.events();
        assert_eq!(kinds(&events), vec![NotificationKind::Error]);
        assert_eq!(events[0].filepath.as_deref(), Some(dir.path()));
        assert_eq!(
            events[0].error_message.as_deref(),
            Some("mysqldump failed or produced empty backup")
        );
        assert_eq!(events[0].db_size.as_deref(), Some("1.50 MB"));

        // No stray dump files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_dump_is_a_dump_failure() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::WriteEmpty)]);
        let (manager, notifier) = manager_with(config, client);

        let summary = manager.run_all();

        assert!(!summary.all_succeeded());
        assert_eq!(kinds(&notifier.events()), vec![NotificationKind::Error]);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_compression_failure_notifies_error() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::WriteDirectory)]);
        let (manager, notifier) = manager_with(config, client);

        let summary = manager.run_all();
        assert!(!summary.all_succeeded());

        let events = notifier.events();
        // Success fires after the (apparently valid) dump, then the error
        assert_eq!(
            kinds(&events),
            vec![NotificationKind::Success, NotificationKind::Error]
        );
        assert!(events[1]
            .error_message
            .as_deref()
            .unwrap()
            .contains("Failed to compress backup"));
    }

    #[test]
    fn test_size_ceiling_deletes_archive_and_notifies_once() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(dir.path());
        config.max_file_size_in_mb = 1;

        let client =
            FakeDumpClient::new(vec![("appdb", DumpBehavior::Write(incompressible(3 << 20)))]);
        let (manager, notifier) = manager_with(config, client);

        let summary = manager.run_all();
        assert!(!summary.all_succeeded());

        let events = notifier.events();
        let errors: Vec<_> = events
            .iter()
            .filter(|e| e.kind == NotificationKind::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        let archive_path = errors[0].filepath.as_ref().unwrap();
        assert!(archive_path.to_string_lossy().ends_with(".sql.tar.gz"));
        assert!(errors[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("exceeds maximum allowed size (1MB)"));

        // No upload notification and nothing left on disk
        assert!(!events.iter().any(|e| e.kind == NotificationKind::Upload));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_size_ceiling_disabled_when_zero() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(dir.path());
        config.max_file_size_in_mb = 0;

        let client =
            FakeDumpClient::new(vec![("appdb", DumpBehavior::Write(incompressible(3 << 20)))]);
        let (manager, _notifier) = manager_with(config, client);

        assert!(manager.run_all().all_succeeded());
    }

    #[test]
    fn test_retention_prunes_after_compress() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(dir.path());
        config.auto_clean_after_x_files = 3;

        // Three pre-existing archives, oldest first
        for (i, secs_ago) in [(1, 3000_u64), (2, 2000), (3, 1000)] {
            let path = dir.path().join(format!("appdb-old{}.sql.tar.gz", i));
            fs::write(&path, "old").unwrap();
            let mtime = std::time::SystemTime::now() - std::time::Duration::from_secs(secs_ago);
            fs::File::options()
                .write(true)
                .open(&path)
                .unwrap()
                .set_modified(mtime)
                .unwrap();
        }

        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::Write(b"SELECT 1;".to_vec()))]);
        let (manager, _notifier) = manager_with(config, client);

        assert!(manager.run_all().all_succeeded());

        // New archive took the count to 4; pruning trims back to 3 and the
        // oldest is the one that went.
        assert_eq!(retention::backup_count(dir.path(), "appdb").unwrap(), 3);
        assert!(!dir.path().join("appdb-old1.sql.tar.gz").exists());
        assert!(dir.path().join("appdb-old3.sql.tar.gz").exists());
    }

    #[test]
    fn test_retention_disabled_when_zero() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());

        for i in 0..5 {
            fs::write(dir.path().join(format!("appdb-old{}.sql.tar.gz", i)), "old").unwrap();
        }

        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::Write(b"SELECT 1;".to_vec()))]);
        let (manager, _notifier) = manager_with(config, client);

        assert!(manager.run_all().all_succeeded());
        assert_eq!(retention::backup_count(dir.path(), "appdb").unwrap(), 6);
    }

    #[test]
    fn test_retention_scan_error_propagates() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir.path().join("vanished"));
        config.auto_clean_after_x_files = 2;

        let client = FakeDumpClient::new(vec![]);
        let (manager, _notifier) = manager_with(config, client);

        // A failed directory scan surfaces instead of passing as success
        assert!(manager.apply_retention("appdb").is_err());
    }

    #[test]
    fn test_size_query_failure_uses_unknown_placeholder() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let client = FakeDumpClient::new(vec![(
            "appdb",
            DumpBehavior::Write(b"SELECT 1;".to_vec()),
        )])
        .with_size_failure();
        let (manager, notifier) = manager_with(config, client);

        assert!(manager.run_all().all_succeeded());

        let events = notifier.events();
        assert_eq!(events[0].db_size.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_run_creates_missing_backup_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("backups/mysql");
        let config = test_config(&nested);
        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::Write(b"SELECT 1;".to_vec()))]);
        let (manager, _notifier) = manager_with(config, client);

        assert_eq!(manager.run(), 0);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_run_aborts_when_directory_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let config = test_config(&blocker);
        let client = FakeDumpClient::new(vec![("appdb", DumpBehavior::Write(b"SELECT 1;".to_vec()))]);
        let (manager, notifier) = manager_with(config, client);

        assert_eq!(manager.run(), 1);

        // One best-effort error notification for target "ALL", no backups
        let events = notifier.events();
        assert_eq!(kinds(&events), vec![NotificationKind::Error]);
        assert_eq!(events[0].database, "ALL");
    }

    #[test]
    fn test_run_exit_code_reflects_summary() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(dir.path());
        config.databases = vec!["good".to_string(), "bad".to_string()];
        let client = FakeDumpClient::new(vec![
            ("good", DumpBehavior::Write(b"SELECT 1;".to_vec())),
            ("bad", DumpBehavior::Fail),
        ]);
        let (manager, _notifier) = manager_with(config, client);

        assert_eq!(manager.run(), 1);
    }

    #[test]
    fn test_run_summary_accounting() {
        let mut summary = RunSummary::default();
        summary.record("a", true);
        summary.record("b", false);
        summary.record("c", true);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert!(!summary.all_succeeded());
    }
}
