use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::LogRecord;
use super::writer::OplogError;

/// Read an operation log back. The header row is skipped; blank or short
/// rows are dropped rather than failing the whole file.
pub fn read_log(path: &Path) -> Result<Vec<LogRecord>, OplogError> {
    let read_error = |source: csv::Error| OplogError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(read_error)?;

        let old = match row.get(0) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => {
                debug!("Skipping log row without a source path");
                continue;
            }
        };
        let new = row.get(1).map(PathBuf::from).unwrap_or_default();

        records.push(LogRecord { old, new });
    }

    debug!(count = records.len(), "Loaded operation log");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oplog::write_rename_log;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_log_round_trip() {
        let dir = tempdir().unwrap();
        let records = vec![
            LogRecord {
                old: PathBuf::from("/videos/raw1.mkv"),
                new: PathBuf::from("/videos/Show.S01E001.mkv"),
            },
            LogRecord {
                old: PathBuf::from("/videos/Show, The.mkv"),
                new: PathBuf::from("/videos/Show.S01E002.mkv"),
            },
        ];

        let path = write_rename_log(&records, dir.path()).unwrap();
        let loaded = read_log(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "old,new\n").unwrap();

        let loaded = read_log(&path).unwrap();

        assert!(loaded.is_empty());
    }

    #[test]
    fn test_short_rows_are_skipped_or_padded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, "old,new\n/videos/a.mkv\n,\n/videos/b.mkv,/videos/c.mkv\n").unwrap();

        let loaded = read_log(&path).unwrap();

        // A row with only a source keeps an empty destination; a row with
        // no source is dropped entirely
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].old, PathBuf::from("/videos/a.mkv"));
        assert_eq!(loaded[0].new, PathBuf::new());
        assert_eq!(loaded[1].old, PathBuf::from("/videos/b.mkv"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_log(Path::new("/nonexistent/log.csv"));
        assert!(matches!(result, Err(OplogError::Read { .. })));
    }
}
