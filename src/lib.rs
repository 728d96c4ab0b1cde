pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod natural;
pub mod oplog;
pub mod output;
pub mod parser;
pub mod preview;
pub mod progress;
pub mod scanner;
pub mod tasks;
pub mod template;
pub mod undo;

pub use config::{Settings, SortMethod};
pub use error::{AppError, ExitCode};
pub use executor::{execute_renames, ExecuteOptions, RenameReport};
pub use parser::{parse_episode_info, EpisodeInfo};
pub use preview::{
    build_preview, choose_strategy, NumberingStrategy, Preview, PreviewEntry, PreviewOptions,
};
pub use scanner::{is_video_file, scan_folders, ScannerError};
pub use undo::{undo_from_log, UndoReport};
