use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

use crate::{
    config,
    error::ApiError,
    spotify::SpotifyApi,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, Artist, CreatePlaylistRequest,
        LibraryPage, Playlist, PlaylistObject, SavedTracksResponse, SearchArtistsResponse, User,
    },
};

/// reqwest backed [`SpotifyApi`].
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        SpotifyClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for the API URL from the configuration.
    pub fn from_env() -> Self {
        Self::new(config::spotify_apiurl())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Maps 401 and every other non-2xx status onto [`ApiError`].
fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    Ok(response)
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn search_artists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, ApiError> {
        let limit = limit.to_string();
        let response = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query), ("type", "artist"), ("limit", limit.as_str())])
            .bearer_auth(token)
            .send()
            .await?;

        let res = check_status(response)?
            .json::<SearchArtistsResponse>()
            .await?;

        Ok(res.artists.items.into_iter().map(Artist::from).collect())
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.url("/me"))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(check_status(response)?.json::<User>().await?)
    }

    async fn saved_tracks(
        &self,
        token: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<LibraryPage, ApiError> {
        let request = match cursor {
            // the cursor is the absolute URL of the next page
            Some(next) => self.http.get(next),
            None => self
                .http
                .get(self.url("/me/tracks"))
                .query(&[("limit", limit.to_string())]),
        };

        let response = request.bearer_auth(token).send().await?;
        let res = check_status(response)?
            .json::<SavedTracksResponse>()
            .await?;

        Ok(LibraryPage::from(res))
    }

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, ApiError> {
        let response = self
            .http
            .post(self.endpoint(&["users", user_id, "playlists"])?)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let playlist = check_status(response)?.json::<PlaylistObject>().await?;
        Ok(Playlist::from(playlist))
    }

    async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), ApiError> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http
            .post(self.endpoint(&["playlists", playlist_id, "tracks"])?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        check_status(response)?
            .json::<AddTrackToPlaylistResponse>()
            .await?;
        Ok(())
    }
}
