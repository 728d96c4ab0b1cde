use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::natural::{natural_key, NaturalKey};

/// Extensions accepted as video files, matched case-insensitively
pub const VIDEO_EXTENSIONS: [&str; 8] = ["mp4", "mkv", "avi", "mov", "flv", "wmv", "ts", "m4v"];

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Folder does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a folder: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read folder: {0}")]
    IoError(#[from] std::io::Error),
}

/// Collect every video file under the given root folders, deduplicated by
/// absolute path and returned in natural name order.
pub fn scan_folders(folders: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, ScannerError> {
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for folder in folders {
        debug!(path = ?folder, recursive, "Scanning folder");

        if !folder.exists() {
            return Err(ScannerError::PathNotFound(folder.clone()));
        }
        if !folder.is_dir() {
            return Err(ScannerError::NotADirectory(folder.clone()));
        }

        let root = std::path::absolute(folder)?;
        if recursive {
            scan_recursive(&root, &mut seen)?;
        } else {
            scan_flat(&root, &mut seen)?;
        }
    }

    let mut files: Vec<PathBuf> = seen.into_iter().collect();
    files.sort_by_cached_key(|path| file_sort_key(path));

    debug!(count = files.len(), "Scan complete");

    Ok(files)
}

fn scan_flat(root: &Path, seen: &mut HashSet<PathBuf>) -> Result<(), ScannerError> {
    let read_dir = fs::read_dir(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(root.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        if path.is_file() && is_video_file(&path) {
            seen.insert(path);
        }
    }

    Ok(())
}

fn scan_recursive(root: &Path, seen: &mut HashSet<PathBuf>) -> Result<(), ScannerError> {
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // An unreadable root fails the scan just like the flat
                // path; one unreadable subtree deeper down does not
                if e.path() == Some(root)
                    && e.io_error().map(|io| io.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                {
                    return Err(ScannerError::PermissionDenied(root.to_path_buf()));
                }
                warn!("Skipping unreadable entry under {:?}: {}", root, e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_video_file(entry.path()) {
            seen.insert(entry.path().to_path_buf());
        }
    }

    Ok(())
}

/// Extension check against the allow-list, case-insensitive.
pub fn is_video_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let lowered = ext.to_lowercase();
            VIDEO_EXTENSIONS.iter().any(|v| *v == lowered)
        }
        None => false,
    }
}

fn file_sort_key(path: &Path) -> NaturalKey {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    natural_key(&name)
}
