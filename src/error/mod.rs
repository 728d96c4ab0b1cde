mod codes;

pub use codes::ExitCode;

use std::path::PathBuf;

use thiserror::Error;

use crate::oplog::OplogError;
use crate::scanner::ScannerError;
use crate::tasks::TaskError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Folder not found: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("Path is not a folder: {path}")]
    NotAFolder { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("No folders to scan")]
    NoFolders,

    #[error("Operation log error: {0}")]
    Log(#[from] OplogError),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::FolderNotFound { .. } => ExitCode::FolderNotFound,
            AppError::NotAFolder { .. } => ExitCode::FolderNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::NoFolders => ExitCode::GeneralError,
            AppError::Log(_) => ExitCode::LogError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::FolderNotFound { path } => {
                format!(
                    "The specified folder does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotAFolder { path } => {
                format!(
                    "The specified path is not a folder:\n  {}\n\n\
                     Please provide a folder to scan.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::NoFolders => String::from(
                "No folders were given and no recent folders are remembered.\n\n\
                 Pass at least one folder on the command line.",
            ),

            AppError::Log(source) => {
                format!(
                    "Operation log failure:\n  {}\n\n\
                     A rename batch cannot be undone without an intact log.\n\
                     Check that the log location is writable and the file is valid.",
                    source
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::FolderNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotAFolder { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        AppError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = AppError::FolderNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::FolderNotFound);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PermissionError);

        assert_eq!(AppError::NoFolders.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_log_errors_get_their_own_code() {
        let err = AppError::Log(OplogError::CreateDir {
            path: PathBuf::from("/logs"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });

        assert_eq!(err.exit_code(), ExitCode::LogError);
        assert!(err.detailed_message().contains("cannot be undone"));
    }

    #[test]
    fn test_detailed_message_includes_path() {
        let err = AppError::FolderNotFound {
            path: PathBuf::from("/missing/folder"),
        };

        let msg = err.detailed_message();
        assert!(msg.contains("/missing/folder"));
        assert!(msg.contains("verify the path"));
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::FolderNotFound);
    }
}
