use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Bearer token plus its absolute expiry in unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: i64,
}

impl Session {
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        !self.token.is_empty() && now_ms < self.expires_at
    }
}

/// Everything needed to send the user to the authorization endpoint.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub authorize_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthorizeRequest<'a> {
    pub client_id: &'a str,
    pub response_type: &'a str,
    pub redirect_uri: &'a str,
    pub state: &'a str,
    pub scope: String,
    pub show_dialog: bool,
}

/// Parameters the provider appends to the redirect URL fragment.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectFragment {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub follower_count: u64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artist_ids: Vec<String>,
}

impl Track {
    pub fn is_by(&self, artist_id: &str) -> bool {
        self.artist_ids.iter().any(|id| id == artist_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

/// One page of the saved-tracks library and the cursor to the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryPage {
    pub tracks: Vec<Track>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPlaylist {
    pub playlist: Playlist,
    pub track_count: usize,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub genres: String,
    pub followers: String,
}

// Wire formats of the Spotify Web API.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<ArtistObject>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl From<ArtistObject> for Artist {
    fn from(a: ArtistObject) -> Self {
        Artist {
            id: a.id,
            name: a.name,
            genres: a.genres,
            follower_count: a.followers.map(|f| f.total).unwrap_or(0),
            image_url: a.images.into_iter().next().map(|i| i.url),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedTrackItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrackItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: String,
}

impl From<SavedTracksResponse> for LibraryPage {
    fn from(res: SavedTracksResponse) -> Self {
        let tracks = res
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .filter_map(|t| {
                Some(Track {
                    id: t.id?,
                    uri: t.uri,
                    name: t.name,
                    artist_ids: t.artists.into_iter().filter_map(|a| a.id).collect(),
                })
            })
            .collect();

        LibraryPage {
            tracks,
            next: res.next,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
}

impl From<PlaylistObject> for Playlist {
    fn from(mut p: PlaylistObject) -> Self {
        Playlist {
            external_url: p.external_urls.remove("spotify"),
            id: p.id,
            name: p.name,
            description: p.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
