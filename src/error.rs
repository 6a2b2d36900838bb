use std::{fmt, io::Error};

use crate::types::Playlist;

/// Failures of the durable key-value store.
#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "storage I/O error: {}", e),
            StoreError::SerdeError(e) => write!(f, "storage is corrupt: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Failures of a single Spotify Web API call.
#[derive(Debug)]
pub enum ApiError {
    /// The bearer token was rejected (HTTP 401).
    Unauthorized,
    /// Any other non-2xx response.
    Status { status: u16, reason: String },
    Transport(reqwest::Error),
    Decode(String),
    /// The configured API URL cannot carry a request path.
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Spotify rejected the access token"),
            ApiError::Status { status, reason } => write!(f, "Error {}: {}", status, reason),
            ApiError::Transport(e) => write!(f, "Network error: {}", e),
            ApiError::Decode(e) => write!(f, "Unexpected response from Spotify: {}", e),
            ApiError::InvalidUrl(e) => write!(f, "Invalid Spotify API URL: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcome of the search and playlist workflow, rendered once at the CLI boundary.
#[derive(Debug)]
pub enum BuildError {
    NotAuthenticated,
    SessionExpired,
    NoTracksFound {
        artist: String,
    },
    Api(ApiError),
    /// The playlist exists but not every batch of tracks made it in.
    PartialPlaylist {
        playlist: Playlist,
        added: usize,
        total: usize,
        source: ApiError,
    },
    Store(StoreError),
}

impl BuildError {
    /// Whether the user has to log in again before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            BuildError::NotAuthenticated
                | BuildError::SessionExpired
                | BuildError::PartialPlaylist {
                    source: ApiError::Unauthorized,
                    ..
                }
        )
    }
}

impl From<ApiError> for BuildError {
    fn from(err: ApiError) -> Self {
        BuildError::Api(err)
    }
}

impl From<StoreError> for BuildError {
    fn from(err: StoreError) -> Self {
        BuildError::Store(err)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NotAuthenticated => write!(f, "Not logged in"),
            BuildError::SessionExpired => write!(f, "Session expired, please log in again"),
            BuildError::NoTracksFound { artist } => {
                write!(f, "You have no saved tracks by {}", artist)
            }
            BuildError::Api(e) => write!(f, "{}", e),
            BuildError::PartialPlaylist {
                playlist,
                added,
                total,
                source,
            } => write!(
                f,
                "Playlist \"{}\" is incomplete ({} of {} tracks added): {}",
                playlist.name, added, total, source
            ),
            BuildError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Api(e) => Some(e),
            BuildError::PartialPlaylist { source, .. } => Some(source),
            BuildError::Store(e) => Some(e),
            _ => None,
        }
    }
}
