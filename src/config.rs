//! Persisted settings.
//!
//! Settings live in a single JSON file. Every field carries a default, so
//! partial or missing files load cleanly and an unreadable file is replaced
//! with defaults rather than blocking the run.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Upper bound on the remembered-folder history.
pub const MAX_RECENT_FOLDERS: usize = 10;

/// Ordering applied to the scanned batch before numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    /// Natural order of the full file name
    #[default]
    Name,
    /// Parsed episode number first, natural name order as tie-break
    Guess,
    /// Alias of name ordering, kept for saved-settings compatibility
    Numeric,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to write settings to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn default_season() -> String {
    "1".to_string()
}

fn default_pad() -> usize {
    3
}

fn default_template() -> String {
    "{title}.S{season:02}E{episode:03}.{ext}".to_string()
}

fn default_conflict_suffix() -> String {
    "_dup".to_string()
}

fn default_true() -> bool {
    true
}

/// Everything the tool remembers between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Series title substituted into the naming template
    #[serde(default)]
    pub title: String,
    /// Season override as entered; blank or non-numeric means
    /// "use parsed values"
    #[serde(default = "default_season")]
    pub season: String,
    /// Minimum digit width for the episode number
    #[serde(default = "default_pad")]
    pub pad: usize,
    /// Signed shift applied to every assigned episode number
    #[serde(default)]
    pub offset: i64,
    /// Naming template
    #[serde(default = "default_template")]
    pub template: String,
    /// Suffix inserted before the extension when a target already exists
    #[serde(default = "default_conflict_suffix")]
    pub conflict_suffix: String,
    /// Descend into subdirectories when scanning
    #[serde(default)]
    pub recursive: bool,
    /// Move renamed files into per-season `SNN` folders
    #[serde(default)]
    pub move_season_folder: bool,
    /// Append the parsed per-episode title when one exists
    #[serde(default = "default_true")]
    pub include_episode_title: bool,
    /// Preview only; no filesystem changes
    #[serde(default = "default_true")]
    pub dry_run: bool,
    /// Ordering applied before numbering
    #[serde(default)]
    pub sort_method: SortMethod,
    /// Folders from previous runs, most recent first
    #[serde(default)]
    pub recent_folders: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: String::new(),
            season: default_season(),
            pad: default_pad(),
            offset: 0,
            template: default_template(),
            conflict_suffix: default_conflict_suffix(),
            recursive: false,
            move_season_folder: false,
            include_episode_title: true,
            dry_run: true,
            sort_method: SortMethod::Name,
            recent_folders: Vec::new(),
        }
    }
}

impl Settings {
    /// Parsed season override. `None` lets per-file parsed seasons through.
    pub fn season_value(&self) -> Option<u32> {
        self.season.trim().parse().ok()
    }

    /// Record the folders of a successful scan, most recent first.
    /// Folders that no longer exist are dropped and the list is capped
    /// at [`MAX_RECENT_FOLDERS`].
    pub fn remember_folders(&mut self, folders: &[PathBuf]) {
        for folder in folders.iter().rev() {
            self.recent_folders.retain(|known| known != folder);
            self.recent_folders.insert(0, folder.clone());
        }
        self.recent_folders.retain(|folder| folder.exists());
        self.recent_folders.truncate(MAX_RECENT_FOLDERS);
    }
}

/// Default location of the settings file.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("eprename").join("config.json"))
        .unwrap_or_else(|| PathBuf::from("eprename-config.json"))
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable. The defaults are written back so the next run starts from
/// a valid file.
pub fn load(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                debug!("No settings file at {:?}, using defaults", path);
            } else {
                warn!("Failed to load settings from {:?}: {}, using defaults", path, e);
            }
            let settings = Settings::default();
            if let Err(e) = save(&settings, path) {
                warn!("Failed to write default settings: {}", e);
            }
            settings
        }
    }
}

fn read_settings(path: &Path) -> std::io::Result<Settings> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Save settings to disk.
pub fn save(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Write to temporary file first (atomic write)
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path).map_err(|source| ConfigError::Io {
            path: temp_path.clone(),
            source,
        })?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, settings)?;
    }

    fs::rename(&temp_path, path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Saved settings to {:?}", path);
    Ok(())
}
