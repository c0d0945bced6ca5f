use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tokens kept between runs in the credential cache file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(
        rename = "spotifyAccessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
    #[serde(
        rename = "spotifyRefreshToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<String>,
    /// Any other keys found in the cache file, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned by the token endpoint. Every field is optional since error
/// responses share the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumArtist {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub album: Album,
}

/// One entry of a listening history endpoint.
///
/// `/me/top/tracks` lists track objects directly while
/// `/me/player/recently-played` wraps each one in a play record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryItem {
    Played {
        track: Track,
        played_at: Option<String>,
    },
    Top(Track),
}

impl HistoryItem {
    pub fn track(&self) -> &Track {
        match self {
            HistoryItem::Played { track, .. } => track,
            HistoryItem::Top(track) => track,
        }
    }

    /// Id of the first artist of the track's album.
    pub fn primary_artist_id(&self) -> Option<&str> {
        self.track()
            .album
            .artists
            .first()
            .and_then(|a| a.id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

/// Artist lookup, reduced to the genre tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistGenres {
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSummary {
    pub artist_name: String,
    pub artist_link: String,
    pub song_name: String,
    pub song_link: String,
}

impl TrackSummary {
    /// Builds the summary from a track, taking the artist from the album
    /// the track belongs to.
    pub fn from_track(track: &Track) -> Option<Self> {
        let artist = track.album.artists.first()?;
        Some(Self {
            artist_name: artist.name.clone(),
            artist_link: artist.external_urls.spotify.clone(),
            song_name: track.name.clone(),
            song_link: track.external_urls.spotify.clone(),
        })
    }
}

/// Everything a run managed to collect. Each field is `None` when the
/// corresponding read call failed or returned nothing usable.
#[derive(Debug, Clone, Default)]
pub struct ListeningStats {
    pub top_track: Option<TrackSummary>,
    pub long_term_genre: Option<String>,
    pub recent_genre: Option<String>,
}
