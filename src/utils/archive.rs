//! Single-file tar.gz archiving for SQL dumps

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Builder;
use tracing::{error, info};

/// Compress a single file into `<source>.tar.gz`.
///
/// The archive contains exactly one entry named after the source's base name,
/// with no directory structure. On success the source file is deleted and the
/// archive path returned. On failure the source is left intact and any
/// partially-written archive is removed.
pub fn compress_file(source: &Path) -> Result<PathBuf> {
    let archive_path = targz_path(source);

    match write_archive(source, &archive_path) {
        Ok(()) => {
            info!(
                "Compressed {} to {}",
                source.display(),
                archive_path.display()
            );
            if let Err(e) = fs::remove_file(source) {
                error!(
                    "Failed to remove source file {} after compression: {}",
                    source.display(),
                    e
                );
            }
            Ok(archive_path)
        }
        Err(e) => {
            error!("Failed to compress {}: {:#}", source.display(), e);
            if archive_path.exists() {
                let _ = fs::remove_file(&archive_path);
            }
            Err(e)
        }
    }
}

/// Archive path for a source file: `<source>.tar.gz`.
pub fn targz_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".tar.gz");
    PathBuf::from(name)
}

fn write_archive(source: &Path, archive_path: &Path) -> Result<()> {
    let entry_name = source
        .file_name()
        .with_context(|| format!("Source has no file name: {}", source.display()))?
        .to_os_string();

    let mut source_file = File::open(source)
        .with_context(|| format!("Failed to open source file: {}", source.display()))?;

    let archive_file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive file: {}", archive_path.display()))?;

    let enc = GzEncoder::new(archive_file, Compression::default());
    let mut tar_builder = Builder::new(enc);

    tar_builder
        .append_file(Path::new(&entry_name), &mut source_file)
        .with_context(|| format!("Failed to append {} to archive", source.display()))?;

    let encoder = tar_builder
        .into_inner()
        .context("Failed to finalize tar archive")?;
    encoder.finish().context("Failed to finish gzip encoding")?;

    Ok(())
}
