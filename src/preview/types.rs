use std::path::PathBuf;

use crate::config::SortMethod;
use crate::parser::{parse_episode_info, EpisodeInfo};

/// A scanned file together with whatever the parser recovered from its name
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Full path to the source file
    pub path: PathBuf,
    /// File name component, lossily decoded
    pub file_name: String,
    /// Season, episode and title recovered from the name
    pub info: EpisodeInfo,
}

impl ParsedFile {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let info = parse_episode_info(&file_name);

        Self {
            path,
            file_name,
            info,
        }
    }
}

/// How episode numbers are assigned across a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingStrategy {
    /// Enough files carry a parsed episode number to trust the parse
    ParsedNumbers,
    /// Enough file names are bare numbers to treat them as the ordering
    NumericSequence,
    /// Neither signal is strong; files are numbered by sorted position
    SequentialFallback,
}

impl NumberingStrategy {
    pub fn description(&self) -> &'static str {
        match self {
            NumberingStrategy::ParsedNumbers => "parsed episode numbers",
            NumberingStrategy::NumericSequence => "numeric file name sequence",
            NumberingStrategy::SequentialFallback => "sequential order",
        }
    }
}

/// One planned rename
#[derive(Debug, Clone)]
pub struct PreviewEntry {
    /// Full path to the source file
    pub source_path: PathBuf,
    /// Full path the file would move to
    pub target_path: PathBuf,
    /// Current file name
    pub source_name: String,
    /// Proposed file name
    pub target_name: String,
    /// Another entry in the batch resolves to the same target
    pub conflict: bool,
    /// Proposed name equals the current name
    pub unchanged: bool,
}

/// A complete plan for one batch, produced without touching the filesystem
#[derive(Debug, Clone)]
pub struct Preview {
    /// Strategy the batch settled on
    pub strategy: NumberingStrategy,
    /// Planned renames in display order
    pub entries: Vec<PreviewEntry>,
}

impl Preview {
    pub fn conflict_count(&self) -> usize {
        self.entries.iter().filter(|e| e.conflict).count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.entries.iter().filter(|e| e.unchanged).count()
    }

    pub fn rename_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.unchanged).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Knobs that shape a preview
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Series title substituted into the template; blank falls back to
    /// a placeholder title
    pub title: String,
    /// Season override; `None` lets parsed values through
    pub season: Option<u32>,
    /// Minimum digit width for the episode number
    pub pad: usize,
    /// Signed shift applied to every assigned episode number
    pub offset: i64,
    /// Naming template
    pub template: String,
    /// Ordering applied before numbering
    pub sort_method: SortMethod,
    /// Append the parsed per-episode title when one exists
    pub include_episode_title: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            season: Some(1),
            pad: 3,
            offset: 0,
            template: "{title}.S{season:02}E{episode:03}.{ext}".to_string(),
            sort_method: SortMethod::Name,
            include_episode_title: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_file_new() {
        let file = ParsedFile::new(PathBuf::from("/videos/Show.S02E05.mkv"));

        assert_eq!(file.file_name, "Show.S02E05.mkv");
        assert_eq!(file.info.season, Some(2));
        assert_eq!(file.info.episode, Some(5));
    }

    #[test]
    fn test_strategy_descriptions() {
        assert_eq!(
            NumberingStrategy::ParsedNumbers.description(),
            "parsed episode numbers"
        );
        assert_eq!(
            NumberingStrategy::NumericSequence.description(),
            "numeric file name sequence"
        );
        assert_eq!(
            NumberingStrategy::SequentialFallback.description(),
            "sequential order"
        );
    }

    #[test]
    fn test_preview_counts() {
        let entry = |conflict: bool, unchanged: bool| PreviewEntry {
            source_path: PathBuf::from("/v/a.mkv"),
            target_path: PathBuf::from("/v/b.mkv"),
            source_name: "a.mkv".to_string(),
            target_name: "b.mkv".to_string(),
            conflict,
            unchanged,
        };

        let preview = Preview {
            strategy: NumberingStrategy::SequentialFallback,
            entries: vec![entry(false, false), entry(true, false), entry(false, true)],
        };

        assert_eq!(preview.len(), 3);
        assert!(!preview.is_empty());
        assert_eq!(preview.conflict_count(), 1);
        assert_eq!(preview.unchanged_count(), 1);
        assert_eq!(preview.rename_count(), 2);
    }
}
