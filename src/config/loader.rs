use super::types::Config;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load and validate configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let mut config: Config = serde_json::from_str(&contents)?;
    validate_config(&config)?;

    config.backup_directory = super::expand_tilde(&config.backup_directory);
    config.log_directory = super::expand_tilde(&config.log_directory);

    Ok(config)
}

/// Validate the configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.db_username.is_empty() {
        return Err(ConfigError::ValidationError(
            "db_username must not be empty".to_string(),
        ));
    }

    if config.databases.is_empty() {
        return Err(ConfigError::ValidationError(
            "No databases configured for backup".to_string(),
        ));
    }

    if config.databases.iter().any(|db| db.is_empty()) {
        return Err(ConfigError::ValidationError(
            "Database names must not be empty".to_string(),
        ));
    }

    if config.backup_directory.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "backup_directory must not be empty".to_string(),
        ));
    }

    if config.timezone.is_empty() {
        return Err(ConfigError::ValidationError(
            "timezone must not be empty".to_string(),
        ));
    }

    Ok(())
}
