//! Reverses a rename batch from its operation log.
//!
//! Undo is a best-effort reconstruction, not a transactional inverse: for
//! every `(old, new)` record the engine moves whichever side still exists
//! back to `old`, skipping records whose files have since moved or been
//! deleted. Each pass emits its own rollback log.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::oplog::{self, LogRecord, OplogError, RollbackRecord};

/// Outcome of an undo pass
#[derive(Debug, Clone)]
pub struct UndoReport {
    /// Records the pass looked at
    pub attempted: usize,
    /// Files moved back to their original path
    pub restored: usize,
    /// Records skipped because neither side exists or the move failed
    pub skipped: usize,
    /// Where the rollback log landed
    pub rollback_log_path: PathBuf,
}

/// Reverse the moves recorded in an operation log, writing a rollback log
/// of everything that was put back.
pub fn undo_from_log(log_path: &Path, log_dir: &Path) -> Result<UndoReport, OplogError> {
    info!("Loading operation log from: {:?}", log_path);
    let records = oplog::read_log(log_path)?;

    let mut restored = Vec::new();
    let mut skipped = 0usize;

    for record in &records {
        match restore_record(record) {
            Ok(Some(rollback)) => restored.push(rollback),
            Ok(None) => {
                debug!("Nothing left to restore for {:?}", record.old);
                skipped += 1;
            }
            Err(e) => {
                warn!("Failed to restore {:?}: {}", record.old, e);
                skipped += 1;
            }
        }
    }

    let rollback_log_path = oplog::write_rollback_log(&restored, log_dir)?;

    Ok(UndoReport {
        attempted: records.len(),
        restored: restored.len(),
        skipped,
        rollback_log_path,
    })
}

/// Move one record's file back to its pre-rename path. `Ok(None)` means
/// neither side of the record exists any more.
fn restore_record(record: &LogRecord) -> io::Result<Option<RollbackRecord>> {
    let source = match pick_source(record)? {
        Some(source) => source,
        None => return Ok(None),
    };

    let target = if record.old.is_absolute() {
        record.old.clone()
    } else {
        std::path::absolute(&record.old)?
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::rename(&source, &target)?;
    info!("Restored {:?} -> {:?}", source, target);

    Ok(Some(RollbackRecord {
        moved_from: source,
        moved_to: target,
    }))
}

/// The post-rename path is the preferred move source; the pre-rename path
/// is the fallback when the renamed file has since disappeared.
fn pick_source(record: &LogRecord) -> io::Result<Option<PathBuf>> {
    for candidate in [&record.new, &record.old] {
        if candidate.as_os_str().is_empty() || !candidate.exists() {
            continue;
        }
        let source = if candidate.is_absolute() {
            candidate.clone()
        } else {
            std::path::absolute(candidate)?
        };
        return Ok(Some(source));
    }

    Ok(None)
}
