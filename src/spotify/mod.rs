//! # Spotify Integration Module
//!
//! This module is the integration layer between the CLI and the Spotify Web API.
//! It owns the implicit grant login flow, the HTTP client and the workflow that
//! turns a user's saved tracks into a playlist for a single artist.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer
//!     ↓
//! PlaylistBuilder  ←→  TokenManager (bearer token, logout on 401)
//!     ↓
//! SpotifyApi trait (SpotifyClient over reqwest)
//!     ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Opens the authorization page and waits until the local redirect
//!   server has verified a session.
//! - [`client`] - [`SpotifyClient`], the reqwest implementation of [`SpotifyApi`].
//! - [`library`] - [`LibraryPages`], a lazy and restartable walk over the saved
//!   tracks, following the `next` cursor until it is gone.
//! - [`playlist`] - [`PlaylistBuilder`], artist search and the sequential
//!   scan, create and batch-add workflow.
//!
//! ## API Coverage
//!
//! - `GET /search` - Artist search
//! - `GET /me` - Current user lookup
//! - `GET /me/tracks` - Saved tracks with cursor pagination
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//!
//! ## Error Handling
//!
//! Every call returns [`ApiError`]. A `401` becomes [`ApiError::Unauthorized`],
//! which the workflow turns into a logout. Nothing is retried: requests run one
//! after the other and the first failure ends the workflow.

use async_trait::async_trait;

use crate::{
    error::ApiError,
    types::{Artist, CreatePlaylistRequest, LibraryPage, Playlist, User},
};

pub mod auth;
pub mod client;
pub mod library;
pub mod playlist;

pub use client::SpotifyClient;
pub use library::LibraryPages;
pub use playlist::{BuildProgress, PlaylistBuilder};

/// Number of artists requested per search.
pub const SEARCH_LIMIT: u32 = 20;
/// Saved tracks requested per library page.
pub const LIBRARY_PAGE_SIZE: u32 = 50;
/// Spotify refuses more URIs than this in one add-tracks call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// The Spotify Web API operations the workflow needs.
///
/// Every call receives the bearer token explicitly; implementations never
/// look up or refresh credentials on their own.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn search_artists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, ApiError>;

    async fn current_user(&self, token: &str) -> Result<User, ApiError>;

    /// Fetches the first page when `cursor` is `None`, otherwise the page the
    /// cursor of a previous [`LibraryPage`] points at.
    async fn saved_tracks(
        &self,
        token: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<LibraryPage, ApiError>;

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, ApiError>;

    async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError>;
}
