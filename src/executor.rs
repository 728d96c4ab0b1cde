//! Applies a preview to the real filesystem.
//!
//! One bad move never aborts the batch: per-entry failures are logged and
//! skipped, and every successful move lands in a durable operation log so
//! a partial batch stays undoable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::oplog::{self, LogRecord, OplogError};
use crate::preview::PreviewEntry;

/// Season marker in a rendered target name
static SEASON_IN_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"[sS]([0-9]{1,2})").unwrap());

/// Knobs for a real rename pass
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Group renamed files into per-season `SNN` folders
    pub season_folders: bool,
    /// Season used for grouping when the target name carries no marker
    pub fallback_season: u32,
    /// Suffix inserted before the extension when the destination exists
    pub conflict_suffix: String,
    /// Folder that receives the operation log
    pub log_dir: PathBuf,
}

/// Outcome of a rename pass
#[derive(Debug, Clone)]
pub struct RenameReport {
    /// Entries the pass looked at
    pub attempted: usize,
    /// Files actually moved
    pub moved: usize,
    /// Entries skipped, counting both no-ops and per-file failures
    pub skipped: usize,
    /// Where the operation log landed
    pub log_path: PathBuf,
}

/// Apply the preview's moves and write the operation log.
pub fn execute_renames(
    entries: &[PreviewEntry],
    options: &ExecuteOptions,
) -> Result<RenameReport, OplogError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for entry in entries {
        match move_entry(entry, options) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {
                debug!("Nothing to do for {:?}", entry.source_path);
                skipped += 1;
            }
            Err(e) => {
                warn!("Failed to rename {:?}: {}", entry.source_path, e);
                skipped += 1;
            }
        }
    }

    let log_path = oplog::write_rename_log(&records, &options.log_dir)?;

    Ok(RenameReport {
        attempted: entries.len(),
        moved: records.len(),
        skipped,
        log_path,
    })
}

/// Move one file. `Ok(None)` means the entry resolved to its own current
/// path and nothing was touched.
fn move_entry(entry: &PreviewEntry, options: &ExecuteOptions) -> io::Result<Option<LogRecord>> {
    let target = resolve_target(entry, options)?;

    if target == entry.source_path {
        return Ok(None);
    }

    let target = disambiguate(target, &options.conflict_suffix);
    fs::rename(&entry.source_path, &target)?;
    debug!("Renamed {:?} -> {:?}", entry.source_path, target);

    Ok(Some(LogRecord {
        old: entry.source_path.clone(),
        new: target,
    }))
}

/// Destination directory for one entry. Season grouping puts the file in
/// an `SNN` folder under the original file's directory, taking the season
/// from the rendered name when it carries one.
fn resolve_target(entry: &PreviewEntry, options: &ExecuteOptions) -> io::Result<PathBuf> {
    if options.season_folders {
        let season = SEASON_IN_NAME
            .captures(&entry.target_name)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(options.fallback_season);

        let source_dir = entry
            .source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let season_dir = source_dir.join(format!("S{:02}", season));
        fs::create_dir_all(&season_dir)?;
        return Ok(season_dir.join(&entry.target_name));
    }

    if let Some(parent) = entry.target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(entry.target_path.clone())
}

/// Find a free path by inserting the conflict suffix, then the suffix plus
/// an increasing counter, before the extension.
fn disambiguate(target: PathBuf, suffix: &str) -> PathBuf {
    if !target.exists() {
        return target;
    }

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let parent = target.parent().map(Path::to_path_buf).unwrap_or_default();
    let (stem, ext) = split_extension(&file_name);

    let mut candidate = parent.join(format!("{}{}{}", stem, suffix, ext));
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = parent.join(format!("{}{}{}{}", stem, suffix, counter, ext));
        counter += 1;
    }

    candidate
}

/// Split `name.ext` into (`name`, `.ext`). A lone leading dot is part of
/// the name, not an extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(pos) => name.split_at(pos),
    }
}
