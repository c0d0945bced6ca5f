//! Configuration management for spotstats.
//!
//! This module handles loading configuration values from environment
//! variables and an optional `.env` file. Values are read once per run into a
//! [`Settings`] value which is then handed to every component, so nothing
//! below the binary touches the process environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command line flags (cache and output paths only)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost/";
pub const DEFAULT_PROFILE_URL: &str = "https://open.spotify.com";
pub const DEFAULT_OUTPUT_FILE: &str = "readme.md";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `spotstats/.env` in the platform-specific local data
/// directory:
/// - Linux: `~/.local/share/spotstats/.env`
/// - macOS: `~/Library/Application Support/spotstats/.env`
/// - Windows: `%LOCALAPPDATA%/spotstats/.env`
///
/// A missing file is fine, the scheduler running the job usually provides
/// the variables directly.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Per-run context shared by all components.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    /// One-time authorization code, only needed before a refresh token exists.
    pub auth_code: Option<String>,
    pub redirect_uri: String,
    pub api_url: String,
    pub token_url: String,
    pub profile_url: String,
    pub cache_file: PathBuf,
    pub output_file: PathBuf,
    /// `None` disables the request timeout.
    pub http_timeout: Option<Duration>,
}

impl Settings {
    /// Builds the settings from the process environment, falling back to
    /// defaults for everything that is not set.
    pub fn from_env() -> Self {
        Self {
            client_id: spotify_client_id(),
            client_secret: spotify_client_secret(),
            auth_code: spotify_code(),
            redirect_uri: spotify_redirect_uri(),
            api_url: spotify_apiurl(),
            token_url: spotify_apitoken_url(),
            profile_url: spotify_profile_url(),
            cache_file: cache_file(),
            output_file: output_file(),
            http_timeout: http_timeout(),
        }
    }

    pub fn with_cache_file(mut self, path: PathBuf) -> Self {
        self.cache_file = path;
        self
    }

    pub fn with_output_file(mut self, path: PathBuf) -> Self {
        self.output_file = path;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            auth_code: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            cache_file: default_cache_file(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            http_timeout: Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
        }
    }
}

/// Returns the Spotify API client ID, `SPOTIFY_CLIENT_ID`.
///
/// An empty value is tolerated here; the token endpoint will reject it and
/// the run continues unauthenticated.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").unwrap_or_default()
}

/// Returns the Spotify API client secret, `SPOTIFY_CLIENT_SECRET`.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default()
}

/// Returns the one-time authorization code, `SPOTIFY_CODE`.
pub fn spotify_code() -> Option<String> {
    env::var("SPOTIFY_CODE").ok().filter(|c| !c.is_empty())
}

/// Returns the redirect URI registered with the authorization code,
/// `SPOTIFY_REDIRECT_URI`.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string())
}

/// Returns the Spotify Web API base URL, `SPOTIFY_API_URL`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify OAuth token exchange URL, `SPOTIFY_API_TOKEN_URL`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the profile link embedded in the output, `SPOTIFY_PROFILE_URL`.
pub fn spotify_profile_url() -> String {
    env::var("SPOTIFY_PROFILE_URL").unwrap_or_else(|_| DEFAULT_PROFILE_URL.to_string())
}

/// Returns the credential cache path, `SPOTSTATS_CACHE_FILE`.
pub fn cache_file() -> PathBuf {
    env::var("SPOTSTATS_CACHE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_cache_file())
}

/// Returns the output document path, `SPOTSTATS_OUTPUT_FILE`.
pub fn output_file() -> PathBuf {
    env::var("SPOTSTATS_OUTPUT_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_FILE))
}

/// Returns the per-request timeout, `SPOTSTATS_HTTP_TIMEOUT` in seconds.
///
/// `0` disables the timeout. Unparsable values fall back to the default.
pub fn http_timeout() -> Option<Duration> {
    let secs = env::var("SPOTSTATS_HTTP_TIMEOUT")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

    (secs > 0).then(|| Duration::from_secs(secs))
}

fn default_cache_file() -> PathBuf {
    data_dir().join("spotify-auth.json")
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotstats");
    path
}
