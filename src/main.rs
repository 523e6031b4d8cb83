mod config;
mod managers;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use managers::backup::BackupManager;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "db-backup-manager")]
#[command(about = "Scheduled MySQL/MariaDB backups with webhook notifications", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Back up all configured databases
    Run,

    /// Validate configuration file
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Failed to load configuration from {}: {}",
                cli.config.display(),
                e
            );
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Validate => {
            println!("✓ Configuration is valid: {}", cli.config.display());
            println!("  Host: {}:{}", config.db_host, config.db_port);
            println!("  Databases: {}", config.databases.join(", "));
            println!(
                "  Backup directory: {}",
                config.backup_directory.display()
            );
            println!("  Timezone: {}", config.timezone);
            if config.enable_webhook {
                println!("  Webhook notifications: enabled");
            } else {
                println!("  Webhook notifications: disabled");
            }
            Ok(())
        }

        Commands::Run => {
            // Setup logging with daily file rotation (must keep guard alive)
            let _log_guard = match managers::logging::init_logging(&config.log_directory) {
                Ok(guard) => Some(guard),
                Err(e) => {
                    managers::logging::init_console_logging();
                    tracing::warn!("File logging unavailable, console only: {:#}", e);
                    None
                }
            };

            let backup_manager = BackupManager::new(config);
            std::process::exit(backup_manager.run());
        }
    }
}
