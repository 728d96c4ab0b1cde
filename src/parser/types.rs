/// Season, episode, and trailing-title fields recovered from one filename.
///
/// Any field may be absent; an all-absent value is a valid parse outcome,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub title: Option<String>,
}
