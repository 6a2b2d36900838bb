//! Configuration management for the artist collection playlist CLI.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Only the Spotify client id is mandatory; every other
//! value falls back to a default that works with the public Spotify endpoints and
//! the local redirect server.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-library-read playlist-modify-private playlist-modify-public user-follow-read user-read-email";

/// Returns the application's directory inside the platform local data directory.
///
/// - Linux: `~/.local/share/coleccion`
/// - macOS: `~/Library/Application Support/coleccion`
/// - Windows: `%LOCALAPPDATA%/coleccion`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("coleccion");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is not an
/// error since every setting can also come from the process environment.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the address the local OAuth redirect server binds to.
pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID used for the implicit grant.
///
/// # Errors
///
/// Fails when `SPOTIFY_API_AUTH_CLIENT_ID` is unset or empty, since no login is
/// possible without it.
pub fn spotify_client_id() -> Result<String, String> {
    match env::var("SPOTIFY_API_AUTH_CLIENT_ID") {
        Ok(id) if !id.trim().is_empty() => Ok(id),
        _ => Err("SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string()),
    }
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match a redirect URI registered in the Spotify application settings and
/// point at the `/callback` route of [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    env_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space separated scope list requested during login.
pub fn spotify_scope() -> String {
    env_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    env_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
