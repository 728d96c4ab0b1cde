use clap::Parser;
use eprename::cli::Args;
use eprename::config::{self, Settings};
use eprename::error::AppError;
use eprename::executor::{execute_renames, ExecuteOptions};
use eprename::logging;
use eprename::output::{display_preview, display_rename_result, display_undo_result};
use eprename::preview::{build_preview, PreviewOptions};
use eprename::progress::Progress;
use eprename::scanner::scan_folders;
use eprename::tasks::{TaskOutcome, TaskPool};
use eprename::undo::undo_from_log;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let mut settings = config::load(&config_path);
    args.apply_to(&mut settings);

    let mut progress = Progress::for_verbosity(args.verbose);
    let pool = TaskPool::new()?;
    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("logs"));

    if let Some(log_path) = &args.undo {
        return run_undo(
            log_path.clone(),
            log_dir,
            &settings,
            &config_path,
            &pool,
            &mut progress,
        );
    }

    run_rename(&args, &mut settings, &config_path, log_dir, &pool, &mut progress)
}

/// Undo mode: replay a previous operation log in reverse.
fn run_undo(
    log_path: PathBuf,
    log_dir: PathBuf,
    settings: &Settings,
    config_path: &Path,
    pool: &TaskPool,
    progress: &mut Progress,
) -> Result<(), AppError> {
    let log_name = log_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| log_path.display().to_string());
    progress.undo_start(&log_name);

    pool.submit(move || TaskOutcome::Undo(undo_from_log(&log_path, &log_dir)));
    let report = loop {
        match pool.recv()? {
            TaskOutcome::Undo(result) => break result?,
            outcome => debug!("Dropping stale task outcome: {:?}", outcome),
        }
    };

    display_undo_result(&report, &mut std::io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
    progress.undo_complete(report.restored, report.skipped);

    save_settings(settings, config_path);

    Ok(())
}

/// Rename mode: scan, preview, and optionally execute.
fn run_rename(
    args: &Args,
    settings: &mut Settings,
    config_path: &Path,
    log_dir: PathBuf,
    pool: &TaskPool,
    progress: &mut Progress,
) -> Result<(), AppError> {
    let folders = resolve_folders(args, settings)?;

    // Step 1: Scan folders on a worker
    progress.scan_start(folders.len());
    let recursive = settings.recursive;
    let scan_folders_arg = folders.clone();
    pool.submit(move || TaskOutcome::Scan(scan_folders(&scan_folders_arg, recursive)));
    let files = loop {
        match pool.recv()? {
            TaskOutcome::Scan(result) => break result?,
            outcome => debug!("Dropping stale task outcome: {:?}", outcome),
        }
    };
    progress.scan_complete(files.len());

    settings.remember_folders(&folders);

    if files.is_empty() {
        progress.warn("No video files found in the given folders");
        save_settings(settings, config_path);
        return Ok(());
    }

    // Step 2: Build the preview
    let options = PreviewOptions {
        title: settings.title.clone(),
        season: settings.season_value(),
        pad: settings.pad,
        offset: settings.offset,
        template: settings.template.clone(),
        sort_method: settings.sort_method,
        include_episode_title: settings.include_episode_title,
    };
    let preview = build_preview(&files, &options);
    info!(
        "Planned {} renames using {}",
        preview.rename_count(),
        preview.strategy.description()
    );

    display_preview(&preview, settings.dry_run, &mut std::io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    if settings.dry_run {
        progress.dry_run_complete(preview.rename_count());
        save_settings(settings, config_path);
        return Ok(());
    }

    // Step 3: Execute on a worker
    let entries = preview.entries.clone();
    let execute_options = ExecuteOptions {
        season_folders: settings.move_season_folder,
        fallback_season: settings.season_value().unwrap_or(1),
        conflict_suffix: settings.conflict_suffix.clone(),
        log_dir,
    };
    pool.submit(move || TaskOutcome::Rename(execute_renames(&entries, &execute_options)));
    let report = loop {
        match pool.recv()? {
            TaskOutcome::Rename(result) => break result?,
            outcome => debug!("Dropping stale task outcome: {:?}", outcome),
        }
    };

    display_rename_result(&report, &mut std::io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
    progress.rename_complete(report.moved, report.skipped);
    progress.log_written(&report.log_path);

    save_settings(settings, config_path);

    Ok(())
}

/// Folders from the command line, or remembered folders that still exist.
fn resolve_folders(args: &Args, settings: &Settings) -> Result<Vec<PathBuf>, AppError> {
    if !args.folders.is_empty() {
        return Ok(args.folders.clone());
    }

    let remembered: Vec<PathBuf> = settings
        .recent_folders
        .iter()
        .filter(|folder| folder.is_dir())
        .cloned()
        .collect();

    if remembered.is_empty() {
        return Err(AppError::NoFolders);
    }

    info!("Reusing {} remembered folder(s)", remembered.len());
    Ok(remembered)
}

fn save_settings(settings: &Settings, path: &Path) {
    if let Err(e) = config::save(settings, path) {
        warn!("Failed to save settings to {:?}: {}", path, e);
    }
}
