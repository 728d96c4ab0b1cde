use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One completed move from a rename batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Absolute path before the rename
    pub old: PathBuf,
    /// Absolute path after the rename
    pub new: PathBuf,
}

/// One completed restoration from an undo pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackRecord {
    /// Path the file was moved away from
    pub moved_from: PathBuf,
    /// Path the file was restored to
    pub moved_to: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_record_round_trips_through_serde() {
        let record = LogRecord {
            old: PathBuf::from("/videos/a.mkv"),
            new: PathBuf::from("/videos/Show.S01E001.mkv"),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: LogRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
    }
}
