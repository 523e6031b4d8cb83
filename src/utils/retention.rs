//! Archive retention: counting and oldest-first pruning

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// List archives for a database: `<database>-*.sql.tar.gz` in `dir`,
/// non-recursive, paired with their modification time.
fn list_archives(dir: &Path, database: &str) -> Result<Vec<(PathBuf, SystemTime)>> {
    let prefix = format!("{}-", database);
    let mut archives = Vec::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read backup directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(&prefix) || !name.ends_with(".sql.tar.gz") {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        archives.push((entry.path(), modified));
    }

    Ok(archives)
}

/// Count existing archives for a database in the backup directory.
pub fn backup_count(dir: &Path, database: &str) -> Result<usize> {
    Ok(list_archives(dir, database)?.len())
}

/// Delete the oldest archives for a database so that at most `keep` remain.
///
/// Returns the number of files actually deleted. `keep == 0` disables
/// pruning. A failed deletion is logged, does not count toward the total,
/// and does not stop the remaining deletions. Ties on modification time are
/// broken by directory enumeration order.
pub fn prune_old_backups(dir: &Path, database: &str, keep: usize) -> Result<usize> {
    if keep == 0 {
        return Ok(0);
    }

    let mut archives = list_archives(dir, database)?;
    if archives.len() <= keep {
        debug!(
            "No pruning needed for '{}': {} archive(s), keeping {}",
            database,
            archives.len(),
            keep
        );
        return Ok(0);
    }

    archives.sort_by_key(|(_, modified)| *modified);

    let excess = archives.len() - keep;
    let mut deleted = 0;

    for (path, _) in archives.into_iter().take(excess) {
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted old backup: {}", path.display());
                deleted += 1;
            }
            Err(e) => {
                warn!("Failed to delete old backup {}: {}", path.display(), e);
            }
        }
    }

    Ok(deleted)
}
