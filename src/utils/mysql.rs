//! mysqldump/mysql subprocess client

use crate::config::Config;
use crate::utils::command;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for the cheap pre-flight and size-query calls.
const QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Access to the external dump and query tools.
///
/// The orchestrator talks to MySQL only through this trait so the pipeline
/// can be exercised in tests without a server or the client binaries.
pub trait DumpClient: Send + Sync {
    /// Verify the dump utility is installed and responds to `--version`.
    fn check_available(&self) -> Result<String>;

    /// Dump a database's schema and data into `dest` as SQL text.
    fn dump_database(&self, config: &Config, database: &str, dest: &Path) -> Result<()>;

    /// On-disk size of a database in bytes, from information_schema.
    fn database_size(&self, config: &Config, database: &str) -> Result<u64>;
}

/// Real implementation invoking the `mysqldump` and `mysql` binaries.
#[derive(Debug, Clone, Default)]
pub struct MysqlClient;

impl MysqlClient {
    pub fn new() -> Self {
        Self
    }
}

/// Build the mysqldump argument list for a database from config options.
pub fn build_dump_args(config: &Config, database: &str) -> Vec<String> {
    let mut args = vec![
        "-h".to_string(),
        config.db_host.clone(),
        "-P".to_string(),
        config.db_port.to_string(),
        "-u".to_string(),
        config.db_username.clone(),
        format!("-p{}", config.db_password),
        "--quick".to_string(),
    ];

    if config.single_transaction {
        args.push("--single-transaction".to_string());
    }

    if config.lock_tables {
        args.push("--lock-tables".to_string());
    } else {
        args.push("--lock-tables=false".to_string());
    }

    if config.add_drop_database {
        args.push("--add-drop-database".to_string());
    }

    if config.add_drop_table {
        args.push("--add-drop-table".to_string());
    }

    args.push(database.to_string());
    args
}

impl DumpClient for MysqlClient {
    fn check_available(&self) -> Result<String> {
        which::which("mysqldump")
            .context("mysqldump not found in PATH. Please install the MySQL/MariaDB client.")?;

        let version = command::run_command_stdout("mysqldump", &["--version"], Some(QUERY_TIMEOUT))?;
        Ok(version.trim().to_string())
    }

    fn dump_database(&self, config: &Config, database: &str, dest: &Path) -> Result<()> {
        let args = build_dump_args(config, database);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let dest_file = File::create(dest)
            .with_context(|| format!("Failed to create dump file: {}", dest.display()))?;

        info!("Starting mysqldump for database: {}", database);
        command::run_command_to_file(
            "mysqldump",
            &args,
            dest_file,
            Some(Duration::from_secs(config.dump_timeout_seconds)),
        )?;

        debug!("mysqldump finished for {}", database);
        Ok(())
    }

    fn database_size(&self, config: &Config, database: &str) -> Result<u64> {
        let query = format!(
            "SELECT COALESCE(SUM(data_length + index_length), 0) \
             FROM information_schema.tables WHERE table_schema = '{}'",
            database
        );

        let args = [
            "-h",
            &config.db_host,
            "-P",
            &config.db_port.to_string(),
            "-u",
            &config.db_username,
            &format!("-p{}", config.db_password),
            "-N",
            "-B",
            "-e",
            &query,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let stdout = command::run_command_stdout("mysql", &args, Some(QUERY_TIMEOUT))?;
        let line = stdout.trim();

        // information_schema sums come back as a decimal; accept either form.
        let bytes = line
            .parse::<f64>()
            .with_context(|| format!("Unexpected size query output: '{}'", line))?;

        Ok(bytes as u64)
    }
}
