#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use spotstats::config::Settings;

/// What the mock token endpoint received.
#[derive(Debug, Clone)]
pub struct RecordedTokenRequest {
    pub authorization: Option<String>,
    pub form: HashMap<String, String>,
}

/// In-process stand-in for the accounts and Web API hosts.
#[derive(Clone, Default)]
pub struct MockSpotify {
    pub token_requests: Arc<Mutex<Vec<RecordedTokenRequest>>>,
    pub token_response: Value,
    pub top_short_term: Value,
    pub top_long_term: Value,
    pub recently_played: Value,
    /// When set, recently-played answers with this status instead of the body.
    pub recently_played_status: Option<StatusCode>,
    pub artists: HashMap<String, Value>,
    /// When set, read endpoints answer 401 unless this bearer token is sent.
    pub bearer: Option<String>,
}

impl MockSpotify {
    pub fn recorded(&self) -> Vec<RecordedTokenRequest> {
        self.token_requests.lock().unwrap().clone()
    }
}

fn authorized(state: &MockSpotify, headers: &HeaderMap) -> bool {
    match &state.bearer {
        Some(token) => headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {token}"))
            .unwrap_or(false),
        None => true,
    }
}

async fn token(
    State(state): State<MockSpotify>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    state.token_requests.lock().unwrap().push(RecordedTokenRequest {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        form,
    });
    Json(state.token_response.clone())
}

async fn top_tracks(
    State(state): State<MockSpotify>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match query.get("time_range").map(String::as_str) {
        Some("short_term") => Json(state.top_short_term.clone()).into_response(),
        Some("long_term") => Json(state.top_long_term.clone()).into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn recently_played(State(state): State<MockSpotify>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(status) = state.recently_played_status {
        return status.into_response();
    }
    Json(state.recently_played.clone()).into_response()
}

async fn artist(
    State(state): State<MockSpotify>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<String>,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.artists.get(&id) {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves the mock on a random local port and returns its base URL.
pub async fn spawn(state: MockSpotify) -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me/top/tracks", get(top_tracks))
        .route("/v1/me/player/recently-played", get(recently_played))
        .route("/v1/artists/{id}", get(artist))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn settings_for(base_url: &str, dir: &Path) -> Settings {
    Settings {
        client_id: "client".to_string(),
        client_secret: "shh".to_string(),
        api_url: format!("{base_url}/v1"),
        token_url: format!("{base_url}/api/token"),
        cache_file: dir.join("spotify-auth.json"),
        output_file: dir.join("readme.md"),
        ..Settings::default()
    }
}

pub fn track_json(
    name: &str,
    link: &str,
    artist_id: &str,
    artist: &str,
    artist_link: &str,
) -> Value {
    json!({
        "name": name,
        "external_urls": { "spotify": link },
        "album": {
            "artists": [
                { "id": artist_id, "name": artist, "external_urls": { "spotify": artist_link } }
            ]
        }
    })
}

/// Top tracks body, one track per artist id.
pub fn top_tracks_json(artist_ids: &[&str]) -> Value {
    let items: Vec<Value> = artist_ids
        .iter()
        .enumerate()
        .map(|(i, id)| track_json(&format!("song {i}"), "", id, id, ""))
        .collect();
    json!({ "items": items })
}

/// Recently played body, one play record per artist id.
pub fn recently_played_json(artist_ids: &[&str]) -> Value {
    let items: Vec<Value> = artist_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            json!({
                "track": track_json(&format!("song {i}"), "", id, id, ""),
                "played_at": "2024-05-01T10:00:00.000Z"
            })
        })
        .collect();
    json!({ "items": items })
}

pub fn artist_json(genres: &[&str]) -> Value {
    json!({ "id": "ignored", "name": "ignored", "genres": genres })
}
