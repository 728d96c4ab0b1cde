use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use super::types::{LogRecord, RollbackRecord};

/// Error types for operation-log I/O
#[derive(Debug, thiserror::Error)]
pub enum OplogError {
    #[error("Failed to create log folder {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Write the operation log for a completed rename batch and return its path.
pub fn write_rename_log(records: &[LogRecord], log_dir: &Path) -> Result<PathBuf, OplogError> {
    write_log(records, log_dir, "eprename-log", &["old", "new"])
}

/// Write the rollback log for a completed undo pass and return its path.
pub fn write_rollback_log(
    records: &[RollbackRecord],
    log_dir: &Path,
) -> Result<PathBuf, OplogError> {
    write_log(records, log_dir, "eprename-rollback", &["moved_from", "moved_to"])
}

fn write_log<T: Serialize>(
    records: &[T],
    log_dir: &Path,
    prefix: &str,
    header: &[&str],
) -> Result<PathBuf, OplogError> {
    fs::create_dir_all(log_dir).map_err(|source| OplogError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let path = unique_log_path(log_dir, prefix);
    write_records(&path, records, header)?;

    info!("Operation log written to: {:?}", path);

    Ok(path)
}

/// Timestamped log name under `log_dir`. Two batches within the same second
/// get a millisecond suffix on the second file.
fn unique_log_path(log_dir: &Path, prefix: &str) -> PathBuf {
    let now = Local::now();
    let stamp = now.format("%Y%m%d-%H%M%S");
    let path = log_dir.join(format!("{}-{}.csv", prefix, stamp));

    if !path.exists() {
        return path;
    }

    warn!("Log file already exists: {:?}", path);
    log_dir.join(format!(
        "{}-{}-{}.csv",
        prefix,
        stamp,
        now.timestamp_subsec_millis()
    ))
}

fn write_records<T: Serialize>(
    path: &Path,
    records: &[T],
    header: &[&str],
) -> Result<(), OplogError> {
    let write_error = |source: csv::Error| OplogError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_error)?;

    // Manual header row so even an empty batch produces a well-formed log
    writer.write_record(header).map_err(write_error)?;
    for record in records {
        writer.serialize(record).map_err(write_error)?;
    }
    writer.flush().map_err(|e| write_error(e.into()))?;

    Ok(())
}
