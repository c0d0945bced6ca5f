//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It covers the token
//! exchange and the handful of read endpoints needed to compute the
//! listening statistics.
//!
//! ## Architecture
//!
//! ```text
//! cli::update
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code / refresh token grant)
//!     ├── Stats (top tracks, recently played)
//!     └── Genres (artist lookups, most frequent genre)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Code exchange and token refresh
//! - `GET /me/top/tracks` - Top tracks for a time range
//! - `GET /me/player/recently-played` - Recently played tracks
//! - `GET /artists/{id}` - Artist details, used for the genre tags
//!
//! ## Error Handling
//!
//! Functions return `reqwest::Error` for transport failures, non-success
//! status codes and undecodable bodies. Deciding whether a failure is fatal
//! is left to the caller; the update run logs them and carries on.
//!
//! Requests run strictly one after another. There is no retry and no rate
//! limit handling, only the per-request timeout from
//! [`Settings::http_timeout`](crate::config::Settings).

pub mod auth;
pub mod genres;
pub mod stats;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Settings;

/// Builds the HTTP client shared by every request of a run.
pub fn build_client(settings: &Settings) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = settings.http_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Attaches the bearer token when there is one. Without a token the request
/// goes out unauthenticated and is rejected by the API.
fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Issues an authorized GET and decodes the JSON body.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: Option<&str>,
) -> Result<T, reqwest::Error> {
    let request = client.get(url).header("Accept", "application/json");
    let response = authorize(request, token).send().await?.error_for_status()?;

    response.json::<T>().await
}
