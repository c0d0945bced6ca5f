//! Output document rendering.
//!
//! The document is plain string interpolation into a fixed HTML fragment.
//! Track, artist and genre names are inserted as returned by the API, without
//! any escaping.

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{ListeningStats, TrackSummary};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const GENRE_SEARCH_URL: &str = "https://duckduckgo.com/?q=";

/// Raised when the collected stats are incomplete and cannot be rendered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no most played track could be determined")]
    MissingTopTrack,
    #[error("no long-term genre could be determined")]
    MissingLongTermGenre,
    #[error("no recent genre could be determined")]
    MissingRecentGenre,
}

/// Validated input of the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub top_track: TrackSummary,
    pub long_term_genre: String,
    pub recent_genre: String,
}

impl TryFrom<ListeningStats> for Report {
    type Error = ReportError;

    fn try_from(stats: ListeningStats) -> Result<Self, Self::Error> {
        Ok(Report {
            top_track: stats.top_track.ok_or(ReportError::MissingTopTrack)?,
            long_term_genre: stats
                .long_term_genre
                .ok_or(ReportError::MissingLongTermGenre)?,
            recent_genre: stats.recent_genre.ok_or(ReportError::MissingRecentGenre)?,
        })
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Search link for a genre, e.g. `https://duckduckgo.com/?q=indie music`.
pub fn genre_search_link(genre: &str) -> String {
    format!("{GENRE_SEARCH_URL}{genre} music")
}

pub fn render(report: &Report, profile_url: &str, at: DateTime<Utc>) -> String {
    let track = &report.top_track;
    format!(
        r#"
  Currently, I can't get enough of the song <a href="{song_link}">{song_name}</a> by <a href="{artist_link}">{artist_name}</a> on <a href="{profile_url}">Spotify</a>.

  My most listened genre is <a href="{long_term_link}">{long_term_genre}</a>.
  Still, I've been listening to a lot of <a href="{recent_link}">{recent_genre}</a> lately.

  This file is generated automatically.
  <br>
  <sub>Last modified at {timestamp}.</sub>
  "#,
        song_link = track.song_link,
        song_name = track.song_name,
        artist_link = track.artist_link,
        artist_name = track.artist_name,
        profile_url = profile_url,
        long_term_link = genre_search_link(&report.long_term_genre),
        long_term_genre = report.long_term_genre,
        recent_link = genre_search_link(&report.recent_genre),
        recent_genre = report.recent_genre,
        timestamp = format_timestamp(at),
    )
}

/// Overwrites `path` with the document.
pub async fn write_document(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    async_fs::write(path, content).await
}
