use crate::config::{Settings, SortMethod};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "eprename")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename video files to a uniform episode naming scheme")]
pub struct Args {
    /// Folders to scan for video files; when omitted, the most recently
    /// used folders from the settings file are scanned again
    pub folders: Vec<PathBuf>,

    /// Series title used in the new file names
    #[arg(short, long)]
    pub title: Option<String>,

    /// Season number, overriding any season parsed from the file names
    #[arg(short, long)]
    pub season: Option<String>,

    /// Minimum number of digits in the episode number
    #[arg(short, long)]
    pub pad: Option<usize>,

    /// Offset added to every episode number
    #[arg(short, long, allow_hyphen_values = true)]
    pub offset: Option<i64>,

    /// Naming template, e.g. "{title}.S{season:02}E{episode:03}.{ext}"
    #[arg(long)]
    pub template: Option<String>,

    /// Suffix appended when a target name is already taken
    #[arg(long, value_name = "SUFFIX")]
    pub conflict_suffix: Option<String>,

    /// Scan folders recursively
    #[arg(short, long, overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Scan only the top level of each folder
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Move renamed files into SXX season folders
    #[arg(long, overrides_with = "no_season_folders")]
    pub season_folders: bool,

    /// Keep renamed files next to their sources
    #[arg(long, overrides_with = "season_folders")]
    pub no_season_folders: bool,

    /// Append the parsed episode title to the new name
    #[arg(long, overrides_with = "no_episode_titles")]
    pub episode_titles: bool,

    /// Drop the parsed episode title from the new name
    #[arg(long, overrides_with = "episode_titles")]
    pub no_episode_titles: bool,

    /// File ordering applied before numbering
    #[arg(long, value_enum)]
    pub sort: Option<SortMethod>,

    /// Preview changes without renaming anything
    #[arg(short, long, overrides_with = "execute")]
    pub dry: bool,

    /// Apply the planned renames
    #[arg(short = 'x', long, overrides_with = "dry")]
    pub execute: bool,

    /// Undo a previous rename batch using its operation log
    #[arg(short, long, value_name = "LOG_FILE")]
    pub undo: Option<PathBuf>,

    /// Directory where operation logs are written
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to the settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Tri-state from a paired on/off flag: None when neither was given
    fn flag_pair(on: bool, off: bool) -> Option<bool> {
        if on {
            Some(true)
        } else if off {
            Some(false)
        } else {
            None
        }
    }

    pub fn recursive_override(&self) -> Option<bool> {
        Self::flag_pair(self.recursive, self.no_recursive)
    }

    pub fn season_folders_override(&self) -> Option<bool> {
        Self::flag_pair(self.season_folders, self.no_season_folders)
    }

    pub fn episode_titles_override(&self) -> Option<bool> {
        Self::flag_pair(self.episode_titles, self.no_episode_titles)
    }

    pub fn dry_run_override(&self) -> Option<bool> {
        Self::flag_pair(self.dry, self.execute)
    }

    /// Fold command line overrides into the persisted settings.
    ///
    /// Settings saved at the end of a run then carry the values this
    /// invocation actually used.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(title) = &self.title {
            settings.title = title.clone();
        }
        if let Some(season) = &self.season {
            settings.season = season.clone();
        }
        if let Some(pad) = self.pad {
            settings.pad = pad;
        }
        if let Some(offset) = self.offset {
            settings.offset = offset;
        }
        if let Some(template) = &self.template {
            settings.template = template.clone();
        }
        if let Some(suffix) = &self.conflict_suffix {
            settings.conflict_suffix = suffix.clone();
        }
        if let Some(recursive) = self.recursive_override() {
            settings.recursive = recursive;
        }
        if let Some(season_folders) = self.season_folders_override() {
            settings.move_season_folder = season_folders;
        }
        if let Some(episode_titles) = self.episode_titles_override() {
            settings.include_episode_title = episode_titles;
        }
        if let Some(sort) = self.sort {
            settings.sort_method = sort;
        }
        if let Some(dry_run) = self.dry_run_override() {
            settings.dry_run = dry_run;
        }
    }
}
