//! Progress output for user-facing status updates.
//!
//! In verbose mode, output is suppressed since tracing handles everything.
//! In normal mode, output is shown with colors when the terminal supports
//! them.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        let colors_enabled = should_use_colors();
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled,
        }
    }

    /// Create a progress reporter that stays quiet at any nonzero
    /// verbosity, where tracing output covers the same ground
    pub fn for_verbosity(verbosity: u8) -> Self {
        let colors_enabled = should_use_colors();
        Self {
            writer: Box::new(io::stderr()),
            silent: verbosity > 0,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Report the start of a folder scan
    pub fn scan_start(&mut self, folder_count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Scanning {} folder(s)...", folder_count).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Scanning {} folder(s)...", folder_count);
        }
    }

    /// Report scan results
    pub fn scan_complete(&mut self, file_count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} video file(s) found", file_count).green()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Scan complete. {} video file(s) found.",
                file_count
            );
        }
    }

    /// Report a finished rename pass
    pub fn rename_complete(&mut self, moved: usize, skipped: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} file(s) renamed, {} skipped", moved, skipped).green()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Rename complete. {} file(s) renamed, {} skipped.",
                moved, skipped
            );
        }
    }

    /// Report a preview-only pass
    pub fn dry_run_complete(&mut self, count: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Dry run complete. {} file(s) would be renamed.", count).dimmed()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Dry run complete. {} file(s) would be renamed.",
                count
            );
        }
    }

    /// Report the start of an undo pass
    pub fn undo_start(&mut self, log_name: &str) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Undoing renames from {}", log_name).bold()
            );
        } else {
            let _ = writeln!(self.writer, "Undoing renames from {}", log_name);
        }
    }

    /// Report a finished undo pass
    pub fn undo_complete(&mut self, restored: usize, skipped: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} file(s) restored, {} skipped", restored, skipped).green()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Undo complete. {} file(s) restored, {} skipped.",
                restored, skipped
            );
        }
    }

    /// Report an operation log location
    pub fn log_written(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Operation log saved to: {}", path.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Operation log saved to: {}", path.display());
        }
    }

    /// Report a non-fatal problem
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }
}
