use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn create_episode_files(dir: &Path) {
    for name in ["show ep2.mkv", "show ep1.mkv", "show ep3.mkv"] {
        std::fs::write(dir.join(name), "video").unwrap();
    }
}

/// Command with an isolated settings file so tests never touch the real
/// user configuration.
fn eprename(scratch: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eprename").unwrap();
    cmd.args([
        "--config",
        scratch.join("config.json").to_str().unwrap(),
        "--log-dir",
        scratch.join("logs").to_str().unwrap(),
    ]);
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("eprename")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename video files"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("eprename")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_folders_and_no_history() {
    let scratch = tempdir().unwrap();

    eprename(scratch.path())
        .assert()
        .code(1) // ExitCode::GeneralError (NoFolders)
        .stderr(predicate::str::contains("No folders were given"));
}

#[test]
fn test_nonexistent_folder() {
    let scratch = tempdir().unwrap();

    eprename(scratch.path())
        .arg("/nonexistent/path")
        .assert()
        .code(3) // ExitCode::FolderNotFound
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_file_instead_of_folder() {
    let scratch = tempdir().unwrap();
    let file_path = scratch.path().join("file.txt");
    std::fs::write(&file_path, "content").unwrap();

    eprename(scratch.path())
        .arg(file_path.to_str().unwrap())
        .assert()
        .code(3) // ExitCode::FolderNotFound (NotAFolder maps to the same code)
        .stderr(predicate::str::contains("is not a folder"));
}

#[test]
fn test_default_run_is_dry() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .arg(videos.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("PREVIEW"))
        .stdout(predicate::str::contains("Run with --execute"));

    // Nothing on disk changed
    assert!(videos.join("show ep1.mkv").exists());
    assert!(!videos.join("Series.S01E001.mkv").exists());
    assert!(!scratch.path().join("logs").exists());
}

#[test]
fn test_execute_renames_files_and_writes_log() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .args(["--execute", "--title", "Show", videos.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 3 of 3 files"));

    assert!(videos.join("Show.S01E001.mkv").exists());
    assert!(videos.join("Show.S01E002.mkv").exists());
    assert!(videos.join("Show.S01E003.mkv").exists());
    assert!(!videos.join("show ep1.mkv").exists());

    let logs: Vec<_> = std::fs::read_dir(scratch.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("eprename-log-"));
}

#[test]
fn test_undo_restores_original_names() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .args(["--execute", "--title", "Show", videos.to_str().unwrap()])
        .assert()
        .success();

    let log_path = std::fs::read_dir(scratch.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .next()
        .unwrap();

    eprename(scratch.path())
        .args(["--undo", log_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 3 of 3 files"));

    assert!(videos.join("show ep1.mkv").exists());
    assert!(videos.join("show ep2.mkv").exists());
    assert!(videos.join("show ep3.mkv").exists());
    assert!(!videos.join("Show.S01E001.mkv").exists());
}

#[test]
fn test_undo_cycle_persists_settings() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .args(["--execute", "--title", "Show", videos.to_str().unwrap()])
        .assert()
        .success();

    let log_path = std::fs::read_dir(scratch.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .next()
        .unwrap();

    // Overrides given alongside --undo land in the settings file too
    eprename(scratch.path())
        .args(["--title", "Renamed Show", "--undo", log_path.to_str().unwrap()])
        .assert()
        .success();

    let raw = std::fs::read_to_string(scratch.path().join("config.json")).unwrap();
    assert!(raw.contains("Renamed Show"));
}

#[test]
fn test_season_folders_flag() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .args([
            "--execute",
            "--season-folders",
            "--title",
            "Show",
            "--season",
            "2",
            videos.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(videos.join("S02").join("Show.S02E001.mkv").exists());
    assert!(videos.join("S02").join("Show.S02E003.mkv").exists());
}

#[test]
fn test_settings_file_created_and_reused() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .arg(videos.to_str().unwrap())
        .assert()
        .success();

    let config_path = scratch.path().join("config.json");
    assert!(config_path.exists());
    let raw = std::fs::read_to_string(&config_path).unwrap();
    assert!(raw.contains("recent_folders"));

    // A bare invocation now reuses the remembered folder
    eprename(scratch.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PREVIEW"));
}

#[test]
fn test_verbose_flag() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .args(["--verbose", videos.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_offset_flag() {
    let scratch = tempdir().unwrap();
    let videos = scratch.path().join("videos");
    std::fs::create_dir(&videos).unwrap();
    create_episode_files(&videos);

    eprename(scratch.path())
        .args([
            "--execute",
            "--title",
            "Show",
            "--offset",
            "12",
            videos.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(videos.join("Show.S01E013.mkv").exists());
    assert!(videos.join("Show.S01E015.mkv").exists());
}
