use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::Settings,
    spotify::get_json,
    types::{ArtistGenres, HistoryItem},
    warning,
};

/// Retrieves the genre tags of an artist via `GET /artists/{id}`.
///
/// An artist without a `genres` field yields an empty list.
pub async fn get_artist_genres(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
    artist_id: &str,
) -> Result<Vec<String>, reqwest::Error> {
    let api_url = format!(
        "{uri}/artists/{id}",
        uri = settings.api_url,
        id = artist_id
    );

    let artist: ArtistGenres = get_json(client, &api_url, token).await?;
    Ok(artist.genres)
}

/// Looks up the first artist of every item and flattens all genre tags,
/// in item order.
///
/// One lookup is made per item, repeated artists included, so an artist
/// weighs as much as it appears in the history. Failed lookups and items
/// without an artist id contribute nothing.
pub async fn collect_genres(
    client: &Client,
    settings: &Settings,
    token: Option<&str>,
    items: &[HistoryItem],
) -> Vec<String> {
    let pb = ProgressBar::new(items.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message("Looking up artist genres");

    let mut genres = Vec::new();
    for item in items {
        pb.inc(1);
        let Some(artist_id) = item.primary_artist_id() else {
            pb.suspend(|| {
                warning!("Skipping \"{}\": no artist id.", item.track().name);
            });
            continue;
        };

        match get_artist_genres(client, settings, token, artist_id).await {
            Ok(tags) => genres.extend(tags),
            Err(e) => pb.suspend(|| {
                warning!("Failed to look up artist {}. Err: {}", artist_id, e);
            }),
        }
    }

    pb.finish_and_clear();
    genres
}

/// Returns the genre with the highest count.
///
/// Ties go to the genre that occurs first in `genres`. An empty slice has
/// no most frequent genre.
pub fn most_frequent(genres: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genre in genres {
        *counts.entry(genre.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for genre in genres {
        let count = counts[genre.as_str()];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((genre.as_str(), count));
        }
    }

    best.map(|(genre, _)| genre.to_string())
}
