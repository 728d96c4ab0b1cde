mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

// S01E02 / s1e2 style, optional single separator between the numbers
// Examples: "S03E07", "s03 e07", "S3.E7", "s03_e107"
static SEASON_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[sS]([0-9]{1,2})[ ._-]?[eE]([0-9]{1,3})").unwrap());

// 2x05 shorthand
static CROSS_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]{1,2})[xX]([0-9]{1,3})").unwrap());

// "Season 2 ... Episode 5" with free-form separators, non-greedy span
static SEASON_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)season[ ._-]*?([0-9]{1,2}).*?ep(?:isode)?[ ._-]*?([0-9]{1,3})").unwrap()
});

// CJK season marker: 第2季
static CJK_SEASON: Lazy<Regex> = Lazy::new(|| Regex::new(r"第\s*([0-9]{1,2})\s*季").unwrap());

// CJK episode marker: 第3集 / 第3话 / 第3回
static CJK_EPISODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"第\s*([0-9]{1,3})\s*[集话回]").unwrap());

// "Episode 12" marker, no season
static EPISODE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[eE]pisode[ ._-]*?([0-9]{1,3})").unwrap());

// Last resort: first standalone 1-3 digit token. Known-weak; incidental
// numbers in titles will match.
static STANDALONE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([0-9]{1,3})\b").unwrap());

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\-\s]+").unwrap());

static BRACKETED_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\[.*\]|\(.*\))$").unwrap());

static RESOLUTION_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,4}p$").unwrap());

static AUDIO_CHANNELS_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").unwrap());

// Release-quality and encoding markers that end a trailing title
static STOP_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "2160p", "1080p", "720p", "480p", "web-dl", "web", "webrip", "web-dlrip", "web-dl2",
        "bluray", "brrip", "bdrip", "hdrip", "hdtv", "dvdrip", "x264", "x265", "h264", "h265",
        "hevc", "avc", "aac", "ddp", "ddp5.1", "dd+", "atmos", "10bit", "8bit", "proper",
        "repack", "extended", "unrated",
    ]
    .into_iter()
    .collect()
});

/// Extract season/episode/title from a file name via an ordered rule
/// cascade; the first matching rule wins. The extension is stripped before
/// matching. Never fails; an unmatched name yields all-absent fields.
pub fn parse_episode_info(file_name: &str) -> EpisodeInfo {
    let stem = file_stem(file_name);

    let matchers: [fn(&str) -> Option<EpisodeInfo>; 7] = [
        match_season_episode,
        match_cross_format,
        match_season_word,
        match_cjk_pair,
        match_cjk_episode,
        match_episode_word,
        match_standalone_number,
    ];

    for matcher in matchers {
        if let Some(info) = matcher(stem) {
            return info;
        }
    }

    EpisodeInfo::default()
}

fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

fn match_season_episode(name: &str) -> Option<EpisodeInfo> {
    let caps = SEASON_EPISODE.captures(name)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;

    Some(EpisodeInfo {
        season: Some(season),
        episode: Some(episode),
        title: extract_title_after(name, caps.get(0)?.end()),
    })
}

fn match_cross_format(name: &str) -> Option<EpisodeInfo> {
    let caps = CROSS_FORMAT.captures(name)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;

    Some(EpisodeInfo {
        season: Some(season),
        episode: Some(episode),
        title: extract_title_after(name, caps.get(0)?.end()),
    })
}

fn match_season_word(name: &str) -> Option<EpisodeInfo> {
    let caps = SEASON_WORD.captures(name)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;

    Some(EpisodeInfo {
        season: Some(season),
        episode: Some(episode),
        title: extract_title_after(name, caps.get(0)?.end()),
    })
}

/// CJK season marker, optionally paired with an episode marker elsewhere in
/// the name. A season marker without an episode marker yields season-only.
fn match_cjk_pair(name: &str) -> Option<EpisodeInfo> {
    let season_caps = CJK_SEASON.captures(name)?;
    let season = season_caps.get(1)?.as_str().parse().ok()?;

    match CJK_EPISODE.captures(name) {
        Some(episode_caps) => {
            let episode = episode_caps.get(1)?.as_str().parse().ok()?;
            Some(EpisodeInfo {
                season: Some(season),
                episode: Some(episode),
                title: extract_title_after(name, episode_caps.get(0)?.end()),
            })
        }
        None => Some(EpisodeInfo {
            season: Some(season),
            episode: None,
            title: None,
        }),
    }
}

fn match_cjk_episode(name: &str) -> Option<EpisodeInfo> {
    let caps = CJK_EPISODE.captures(name)?;
    let episode = caps.get(1)?.as_str().parse().ok()?;

    Some(EpisodeInfo {
        season: None,
        episode: Some(episode),
        title: extract_title_after(name, caps.get(0)?.end()),
    })
}

fn match_episode_word(name: &str) -> Option<EpisodeInfo> {
    let caps = EPISODE_WORD.captures(name)?;
    let episode = caps.get(1)?.as_str().parse().ok()?;

    Some(EpisodeInfo {
        season: None,
        episode: Some(episode),
        title: extract_title_after(name, caps.get(0)?.end()),
    })
}

fn match_standalone_number(name: &str) -> Option<EpisodeInfo> {
    let caps = STANDALONE_NUMBER.captures(name)?;
    let episode = caps.get(1)?.as_str().parse().ok()?;

    Some(EpisodeInfo {
        season: None,
        episode: Some(episode),
        title: extract_title_after(name, caps.get(0)?.end()),
    })
}

/// Collect the trailing title from the remainder of a name after a rule
/// match. Tokens are consumed left to right: bracketed tokens are dropped,
/// and the first stop token, resolution-shaped token, or
/// audio-channel-shaped token ends the title. Empty results are absent.
fn extract_title_after(name: &str, pos: usize) -> Option<String> {
    let remainder = name[pos..].trim_matches(|c: char| matches!(c, ' ' | '.' | '_' | '-'));
    if remainder.is_empty() {
        return None;
    }

    let mut kept: Vec<&str> = Vec::new();
    for token in SEPARATOR_RUN.split(remainder) {
        if token.is_empty() {
            continue;
        }
        if BRACKETED_TOKEN.is_match(token) {
            continue;
        }

        let lowered = token.to_lowercase();
        if STOP_TOKENS.contains(lowered.as_str())
            || RESOLUTION_TOKEN.is_match(&lowered)
            || AUDIO_CHANNELS_TOKEN.is_match(&lowered)
        {
            break;
        }

        kept.push(token);
    }

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("."))
    }
}
