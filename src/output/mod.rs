use crate::executor::RenameReport;
use crate::preview::Preview;
use crate::undo::UndoReport;
use std::io::{self, Write};

/// Display a rename preview in a formatted output
pub fn display_preview(preview: &Preview, dry_run: bool, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              PREVIEW")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Strategy: {}", preview.strategy.description())?;
    writeln!(writer, "Files:    {}", preview.len())?;
    writeln!(writer)?;

    if preview.is_empty() {
        writeln!(writer, "No video files to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, entry) in preview.entries.iter().enumerate() {
        writeln!(writer, "  {}. {}", i + 1, entry.source_name)?;

        if entry.unchanged {
            writeln!(writer, "     -> {} [unchanged]", entry.target_name)?;
        } else {
            writeln!(writer, "     -> {}", entry.target_name)?;
        }

        if entry.conflict {
            writeln!(writer, "     [!] Conflicts with another target name")?;
        }

        writeln!(writer)?;
    }

    // Summary
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} files would be renamed", preview.rename_count())?;

    let unchanged_count = preview.unchanged_count();
    if unchanged_count > 0 {
        writeln!(writer, "  {} files already match their target", unchanged_count)?;
    }

    let conflict_count = preview.conflict_count();
    if conflict_count > 0 {
        writeln!(writer, "  {} targets conflict", conflict_count)?;
    }

    if dry_run {
        writeln!(writer)?;
        writeln!(writer, "Run with --execute to apply these changes.")?;
    }

    Ok(())
}

/// Display the outcome of an executed rename pass
pub fn display_rename_result(report: &RenameReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Renamed {} of {} files.",
        report.moved, report.attempted
    )?;

    if report.skipped > 0 {
        writeln!(writer, "  {} files were skipped.", report.skipped)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Operation log: {}", report.log_path.display())?;
    writeln!(
        writer,
        "Undo with: eprename --undo \"{}\"",
        report.log_path.display()
    )?;

    Ok(())
}

/// Display the outcome of an undo pass
pub fn display_undo_result(report: &UndoReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "Restored {} of {} files.",
        report.restored, report.attempted
    )?;

    if report.skipped > 0 {
        writeln!(writer, "  {} records were skipped.", report.skipped)?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Rollback log: {}",
        report.rollback_log_path.display()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{NumberingStrategy, PreviewEntry};
    use std::path::PathBuf;

    fn create_test_preview() -> Preview {
        Preview {
            strategy: NumberingStrategy::ParsedNumbers,
            entries: vec![
                PreviewEntry {
                    source_path: PathBuf::from("/videos/show ep1.mkv"),
                    target_path: PathBuf::from("/videos/Show.S01E001.mkv"),
                    source_name: "show ep1.mkv".to_string(),
                    target_name: "Show.S01E001.mkv".to_string(),
                    conflict: false,
                    unchanged: false,
                },
                PreviewEntry {
                    source_path: PathBuf::from("/videos/Show.S01E002.mkv"),
                    target_path: PathBuf::from("/videos/Show.S01E002.mkv"),
                    source_name: "Show.S01E002.mkv".to_string(),
                    target_name: "Show.S01E002.mkv".to_string(),
                    conflict: false,
                    unchanged: true,
                },
                PreviewEntry {
                    source_path: PathBuf::from("/videos/show 3 v2.mkv"),
                    target_path: PathBuf::from("/videos/Show.S01E003.mkv"),
                    source_name: "show 3 v2.mkv".to_string(),
                    target_name: "Show.S01E003.mkv".to_string(),
                    conflict: true,
                    unchanged: false,
                },
            ],
        }
    }

    #[test]
    fn test_display_preview() {
        let preview = create_test_preview();
        let mut output = Vec::new();

        display_preview(&preview, true, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("PREVIEW"));
        assert!(output_str.contains("parsed episode numbers"));
        assert!(output_str.contains("show ep1.mkv"));
        assert!(output_str.contains("-> Show.S01E001.mkv"));
        assert!(output_str.contains("[unchanged]"));
        assert!(output_str.contains("Conflicts with another target name"));
        assert!(output_str.contains("2 files would be renamed"));
        assert!(output_str.contains("1 files already match their target"));
        assert!(output_str.contains("1 targets conflict"));
        assert!(output_str.contains("Run with --execute"));
    }

    #[test]
    fn test_display_preview_execute_mode_drops_hint() {
        let preview = create_test_preview();
        let mut output = Vec::new();

        display_preview(&preview, false, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("PREVIEW"));
        assert!(!output_str.contains("Run with --execute"));
    }

    #[test]
    fn test_display_preview_empty() {
        let preview = Preview {
            strategy: NumberingStrategy::SequentialFallback,
            entries: Vec::new(),
        };
        let mut output = Vec::new();

        display_preview(&preview, true, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("PREVIEW"));
        assert!(output_str.contains("No video files to rename"));
    }

    #[test]
    fn test_display_rename_result() {
        let report = RenameReport {
            attempted: 5,
            moved: 4,
            skipped: 1,
            log_path: PathBuf::from("/videos/logs/eprename-log-20260812-101500.csv"),
        };
        let mut output = Vec::new();

        display_rename_result(&report, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("Renamed 4 of 5 files"));
        assert!(output_str.contains("1 files were skipped"));
        assert!(output_str.contains("eprename-log-20260812-101500.csv"));
        assert!(output_str.contains("--undo"));
    }

    #[test]
    fn test_display_undo_result() {
        let report = UndoReport {
            attempted: 3,
            restored: 3,
            skipped: 0,
            rollback_log_path: PathBuf::from("/videos/logs/eprename-rollback-20260812-101800.csv"),
        };
        let mut output = Vec::new();

        display_undo_result(&report, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("Restored 3 of 3 files"));
        assert!(!output_str.contains("records were skipped"));
        assert!(output_str.contains("eprename-rollback-20260812-101800.csv"));
    }
}
