//! Batch rename planning.
//!
//! Turns a scanned file list into a complete dry-run plan: sorts the batch,
//! picks a numbering strategy from what the parser recovered, renders target
//! names through the template and flags conflicts and no-ops. Nothing here
//! touches the filesystem.

mod types;

pub use types::{NumberingStrategy, ParsedFile, Preview, PreviewEntry, PreviewOptions};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::SortMethod;
use crate::natural::natural_key;
use crate::template::{format_template, TemplateContext};

/// Title substituted when none is configured.
const DEFAULT_TITLE: &str = "Series";

/// Characters that cannot appear in a file name on common filesystems.
static ILLEGAL_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]+"#).unwrap());

/// First episode marker in a rendered name, used for width adjustment.
static EPISODE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[eE]([0-9]+)").unwrap());

/// Bare 1-3 digit stem, the numeric-sequence signal.
static PURE_NUMERIC_STEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").unwrap());

/// Build the full rename plan for a batch of files.
pub fn build_preview(files: &[PathBuf], options: &PreviewOptions) -> Preview {
    let mut parsed: Vec<ParsedFile> = files.iter().cloned().map(ParsedFile::new).collect();
    sort_files(&mut parsed, options.sort_method);

    let strategy = choose_strategy(&parsed);
    debug!(
        "Numbering {} files by {}",
        parsed.len(),
        strategy.description()
    );

    let mut entries = apply_strategy(&parsed, strategy, options);
    mark_conflicts(&mut entries);

    Preview { strategy, entries }
}

/// Decide how the batch gets its episode numbers. Parsed episode markers
/// win when at least a third of the batch (and never fewer than two files)
/// carries one; bare numeric file names are the next-best ordering signal;
/// otherwise files are numbered by position.
pub fn choose_strategy(files: &[ParsedFile]) -> NumberingStrategy {
    let threshold = (files.len() / 3).max(2);

    let with_episode = files.iter().filter(|f| f.info.episode.is_some()).count();
    if with_episode >= threshold {
        return NumberingStrategy::ParsedNumbers;
    }

    let pure_numeric = files.iter().filter(|f| is_pure_numeric(f)).count();
    if pure_numeric >= threshold {
        return NumberingStrategy::NumericSequence;
    }

    NumberingStrategy::SequentialFallback
}

fn apply_strategy(
    files: &[ParsedFile],
    strategy: NumberingStrategy,
    options: &PreviewOptions,
) -> Vec<PreviewEntry> {
    match strategy {
        NumberingStrategy::ParsedNumbers => number_by_parsed(files, options),
        NumberingStrategy::NumericSequence => number_by_numeric_names(files, options),
        NumberingStrategy::SequentialFallback => number_sequentially(files, options),
    }
}

/// `name` and `numeric` both order by the natural key of the full file
/// name; `guess` puts files with a parsed episode first, in episode order.
fn sort_files(files: &mut [ParsedFile], method: SortMethod) {
    match method {
        SortMethod::Name | SortMethod::Numeric => {
            files.sort_by_cached_key(|f| natural_key(&f.file_name));
        }
        SortMethod::Guess => {
            files.sort_by_cached_key(|f| {
                (
                    f.info.episode.is_none(),
                    f.info.episode.unwrap_or(0),
                    natural_key(&f.file_name),
                )
            });
        }
    }
}

/// Parsed episode numbers govern. The batch is re-sorted by episode with
/// absent episodes last; a file without one takes its sorted position.
fn number_by_parsed(files: &[ParsedFile], options: &PreviewOptions) -> Vec<PreviewEntry> {
    let mut ordered: Vec<&ParsedFile> = files.iter().collect();
    ordered.sort_by_cached_key(|f| {
        (f.info.episode.unwrap_or(u32::MAX), natural_key(&f.file_name))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, file)| {
            let episode = match file.info.episode {
                Some(ep) => i64::from(ep),
                None => index as i64 + 1,
            } + options.offset;
            render_entry(file, resolve_season(file, options), episode, true, options)
        })
        .collect()
}

/// Bare numeric names are an ordering of their own: they take 1..k by
/// numeric value and the rest of the batch continues the sequence. Parsed
/// fields are not trusted in this mode, so no episode titles are appended.
fn number_by_numeric_names(files: &[ParsedFile], options: &PreviewOptions) -> Vec<PreviewEntry> {
    let (mut ordered, rest): (Vec<&ParsedFile>, Vec<&ParsedFile>) =
        files.iter().partition(|f| is_pure_numeric(f));

    ordered.sort_by_key(|f| stem(&f.file_name).parse::<u32>().unwrap_or(0));
    ordered.extend(rest);

    let season = i64::from(options.season.unwrap_or(1));
    ordered
        .into_iter()
        .enumerate()
        .map(|(index, file)| {
            let episode = index as i64 + 1 + options.offset;
            render_entry(file, season, episode, false, options)
        })
        .collect()
}

/// Last resort: the sorted position is the episode number unless the file
/// parsed one of its own.
fn number_sequentially(files: &[ParsedFile], options: &PreviewOptions) -> Vec<PreviewEntry> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let episode = match file.info.episode {
                Some(ep) => i64::from(ep),
                None => index as i64 + 1,
            } + options.offset;
            render_entry(file, resolve_season(file, options), episode, true, options)
        })
        .collect()
}

/// A configured season wins over a parsed one; 1 when neither exists.
fn resolve_season(file: &ParsedFile, options: &PreviewOptions) -> i64 {
    i64::from(options.season.or(file.info.season).unwrap_or(1))
}

fn render_entry(
    file: &ParsedFile,
    season: i64,
    episode: i64,
    append_title: bool,
    options: &PreviewOptions,
) -> PreviewEntry {
    let title = options.title.trim();
    let title = if title.is_empty() { DEFAULT_TITLE } else { title };

    let context = TemplateContext {
        title,
        season,
        episode,
        ext: extension(&file.file_name),
        orig: &file.file_name,
    };
    let mut target_name = format_template(&options.template, &context);

    if append_title && options.include_episode_title {
        if let Some(episode_title) = file.info.title.as_deref() {
            if let Some(safe) = sanitize_title(episode_title) {
                target_name = insert_before_extension(&target_name, &safe);
            }
        }
    }

    target_name = apply_episode_padding(&target_name, options.pad);

    let parent = file
        .path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let target_path = parent.join(&target_name);
    let unchanged = file.file_name == target_name;

    PreviewEntry {
        source_path: file.path.clone(),
        target_path,
        source_name: file.file_name.clone(),
        target_name,
        conflict: false,
        unchanged,
    }
}

/// Strip characters that cannot land in a file name, then trim leftover
/// separator junk. `None` when nothing survives.
fn sanitize_title(title: &str) -> Option<String> {
    let cleaned = ILLEGAL_NAME_CHARS.replace_all(title, "");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c == ' ');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Insert `.title` immediately before the extension, or append it when the
/// name has none.
fn insert_before_extension(name: &str, title: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}.{title}.{ext}"),
        None => format!("{name}.{title}"),
    }
}

/// Widen the digits of the first `E<number>` marker in a rendered name to
/// at least `pad` digits. Names without a marker pass through untouched.
fn apply_episode_padding(name: &str, pad: usize) -> String {
    let digits = match EPISODE_MARKER.captures(name).and_then(|c| c.get(1)) {
        Some(m) => m,
        None => return name.to_string(),
    };
    if digits.as_str().len() >= pad {
        return name.to_string();
    }

    let mut padded = String::with_capacity(name.len() + pad);
    padded.push_str(&name[..digits.start()]);
    padded.push_str(&"0".repeat(pad - digits.as_str().len()));
    padded.push_str(&name[digits.start()..]);
    padded
}

/// Two entries conflict when they resolve to the same target name, compared
/// case-insensitively, inside the same directory. Both sides get flagged.
fn mark_conflicts(entries: &mut [PreviewEntry]) {
    let mut seen: HashMap<(PathBuf, String), usize> = HashMap::new();
    for entry in entries.iter() {
        *seen.entry(conflict_key(entry)).or_insert(0) += 1;
    }
    for entry in entries.iter_mut() {
        if seen.get(&conflict_key(entry)).copied().unwrap_or(0) > 1 {
            entry.conflict = true;
        }
    }
}

fn conflict_key(entry: &PreviewEntry) -> (PathBuf, String) {
    let parent = entry
        .target_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    (parent, entry.target_name.to_lowercase())
}

fn is_pure_numeric(file: &ParsedFile) -> bool {
    PURE_NUMERIC_STEM.is_match(stem(&file.file_name))
}

fn stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

fn extension(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}
