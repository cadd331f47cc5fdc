//! Configuration management for plmerge.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Everything has a sensible default except
//! the Spotify client id, which is only needed for the login flow.
//!
//! The accessors here are read once at the edges (CLI commands, server start)
//! and the results are handed to [`crate::spotify::SpotifyClient`] and
//! [`crate::merge::MergeOptions`] explicitly.

use std::{env, path::PathBuf};

use crate::merge::{MergeOptions, RecommendationPolicy};

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SCOPE: &str = "playlist-read-private playlist-modify-public playlist-modify-private";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives in:
/// - Linux: `~/.local/share/plmerge/.env`
/// - macOS: `~/Library/Application Support/plmerge/.env`
/// - Windows: `%LOCALAPPDATA%/plmerge/.env`
///
/// A missing file is not an error; variables already set in the process
/// environment take precedence over the file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plmerge/.env");
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address of the local HTTP server, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client id of the registered Spotify application.
///
/// # Errors
///
/// Returns an error if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .map_err(|_| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())
}

/// OAuth redirect URI; must match the one registered with Spotify.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Base URL of the Spotify Web API.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Merge settings from `PLMERGE_RECOMMENDATIONS` and `PLMERGE_PAGE_SIZE`.
///
/// # Errors
///
/// Returns an error if either variable is set to an unparsable value.
pub fn merge_options() -> Result<MergeOptions, String> {
    let mut options = MergeOptions::default();

    if let Ok(policy) = env::var("PLMERGE_RECOMMENDATIONS") {
        options.recommendations = policy.parse::<RecommendationPolicy>()?;
    }

    if let Ok(page_size) = env::var("PLMERGE_PAGE_SIZE") {
        options.page_size = page_size
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("Invalid PLMERGE_PAGE_SIZE '{}': {}", page_size, e))?;
    }

    Ok(options)
}
