use reqwest::Client;

use crate::{
    config::Settings,
    info,
    spotify::{genres, get_json},
    types::{HistoryResponse, ListeningStats, TrackSummary},
    warning,
};

pub const TOP_TRACK_LIMIT: u32 = 1;
pub const HISTORY_LIMIT: u32 = 50;

/// Window of the top tracks ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Retrieves the user's top tracks for a time range.
///
/// Uses `GET /me/top/tracks?time_range={range}&limit={limit}`. The limit is
/// passed through unchanged; the API accepts 1-50.
pub async fn get_top_tracks(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
    time_range: TimeRange,
    limit: u32,
) -> Result<HistoryResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/top/tracks?time_range={time_range}&limit={limit}",
        uri = settings.api_url,
        time_range = time_range.as_str(),
        limit = limit
    );

    get_json(client, &api_url, token).await
}

/// Retrieves the user's recently played tracks via
/// `GET /me/player/recently-played?limit={limit}`.
pub async fn get_recently_played(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
    limit: u32,
) -> Result<HistoryResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/player/recently-played?limit={limit}",
        uri = settings.api_url,
        limit = limit
    );

    get_json(client, &api_url, token).await
}

/// Most played track of the short-term window.
pub async fn most_played_track(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
) -> Option<TrackSummary> {
    match get_top_tracks(client, settings, token, TimeRange::ShortTerm, TOP_TRACK_LIMIT).await {
        Ok(res) => {
            let summary = res
                .items
                .first()
                .and_then(|item| TrackSummary::from_track(item.track()));
            if summary.is_none() {
                warning!("Top tracks response did not contain a usable track.");
            }
            summary
        }
        Err(e) => {
            warning!("Failed to fetch the most played track. Err: {}", e);
            None
        }
    }
}

/// Most frequent genre among the artists of the long-term top tracks.
pub async fn long_term_genre(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
) -> Option<String> {
    match get_top_tracks(client, settings, token, TimeRange::LongTerm, HISTORY_LIMIT).await {
        Ok(res) => {
            let tags = genres::collect_genres(client, settings, token, &res.items).await;
            genres::most_frequent(&tags)
        }
        Err(e) => {
            warning!("Failed to fetch long-term top tracks. Err: {}", e);
            None
        }
    }
}

/// Most frequent genre among the artists of the recently played tracks.
pub async fn recent_genre(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
) -> Option<String> {
    match get_recently_played(client, settings, token, HISTORY_LIMIT).await {
        Ok(res) => {
            let tags = genres::collect_genres(client, settings, token, &res.items).await;
            genres::most_frequent(&tags)
        }
        Err(e) => {
            warning!("Failed to fetch recently played tracks. Err: {}", e);
            None
        }
    }
}

/// Runs the three read calls one after another. A failing call only leaves
/// its own field empty.
pub async fn collect_stats(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
) -> ListeningStats {
    info!("Fetching most played track...");
    let top_track = most_played_track(client, settings, token).await;

    info!("Fetching long-term genres...");
    let long_term_genre = long_term_genre(client, settings, token).await;

    info!("Fetching recent genres...");
    let recent_genre = recent_genre(client, settings, token).await;

    ListeningStats {
        top_track,
        long_term_genre,
        recent_genre,
    }
}
