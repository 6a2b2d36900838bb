use std::fmt;

use crate::{
    error::{ApiError, BuildError},
    management::{KeyValueStore, TokenManager},
    spotify::{
        LIBRARY_PAGE_SIZE, LibraryPages, MAX_TRACKS_PER_REQUEST, SEARCH_LIMIT, SpotifyApi,
        library,
    },
    types::{Artist, BuiltPlaylist, CreatePlaylistRequest, Track},
    utils,
};

/// Milestones of [`PlaylistBuilder::build_playlist_for_artist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildProgress {
    ResolvingUser,
    ScannedPage { scanned: usize, matched: usize },
    CreatingPlaylist { tracks: usize },
    AddedBatch { added: usize, total: usize },
}

impl fmt::Display for BuildProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildProgress::ResolvingUser => write!(f, "Resolving Spotify user..."),
            BuildProgress::ScannedPage { scanned, matched } => write!(
                f,
                "Scanned {} saved tracks, {} by the artist...",
                scanned, matched
            ),
            BuildProgress::CreatingPlaylist { tracks } => {
                write!(f, "Found {} tracks. Creating playlist...", tracks)
            }
            BuildProgress::AddedBatch { added, total } => {
                write!(f, "Added {}/{} tracks...", added, total)
            }
        }
    }
}

type ProgressFn<'a> = Box<dyn FnMut(BuildProgress) + Send + 'a>;

/// Runs artist searches and the playlist workflow with the token of a
/// [`TokenManager`].
///
/// Requests are strictly sequential. A rejected token logs the user out and
/// ends the workflow with [`BuildError::SessionExpired`], or with
/// [`BuildError::PartialPlaylist`] once the playlist was created.
pub struct PlaylistBuilder<'a, A: ?Sized, S> {
    api: &'a A,
    tokens: &'a mut TokenManager<S>,
    page_size: u32,
    progress: Option<ProgressFn<'a>>,
}

impl<'a, A, S> PlaylistBuilder<'a, A, S>
where
    A: SpotifyApi + ?Sized,
    S: KeyValueStore,
{
    pub fn new(api: &'a A, tokens: &'a mut TokenManager<S>) -> Self {
        PlaylistBuilder {
            api,
            tokens,
            page_size: LIBRARY_PAGE_SIZE,
            progress: None,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn on_progress(mut self, progress: impl FnMut(BuildProgress) + Send + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Ranked artists matching `query`. No match is an empty list, not an error.
    pub async fn search_artists(&mut self, query: &str) -> Result<Vec<Artist>, BuildError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let api = self.api;
        let token = self.bearer().await?;
        let result = api.search_artists(&token, query, SEARCH_LIMIT).await;
        self.checked(result).await
    }

    /// Creates a private playlist holding every saved track by `artist`.
    ///
    /// A failure after the playlist was created is reported as
    /// [`BuildError::PartialPlaylist`]; already added batches stay in place.
    pub async fn build_playlist_for_artist(
        &mut self,
        artist: &Artist,
    ) -> Result<BuiltPlaylist, BuildError> {
        let api = self.api;

        self.report(BuildProgress::ResolvingUser);
        let token = self.bearer().await?;
        let user = api.current_user(&token).await;
        let user = self.checked(user).await?;

        let tracks = self.collect_artist_tracks(&artist.id).await?;
        if tracks.is_empty() {
            return Err(BuildError::NoTracksFound {
                artist: artist.name.clone(),
            });
        }

        self.report(BuildProgress::CreatingPlaylist {
            tracks: tracks.len(),
        });
        let request = CreatePlaylistRequest {
            name: utils::playlist_name(&artist.name),
            description: utils::playlist_description(&artist.name, tracks.len()),
            public: false,
        };
        let token = self.bearer().await?;
        let created = api.create_playlist(&token, &user.id, &request).await;
        let playlist = self.checked(created).await?;

        let uris: Vec<String> = tracks.into_iter().map(|t| t.uri).collect();
        let total = uris.len();
        let mut added = 0;

        for batch in uris.chunks(MAX_TRACKS_PER_REQUEST) {
            // the playlist exists now, so an expired token still reports it
            let result = match self.tokens.current_token().map(str::to_string) {
                Some(token) => api.add_tracks(&token, &playlist.id, batch).await,
                None => Err(ApiError::Unauthorized),
            };

            match result {
                Ok(()) => {
                    added += batch.len();
                    self.report(BuildProgress::AddedBatch { added, total });
                }
                Err(source) => {
                    if matches!(source, ApiError::Unauthorized) {
                        let _ = self.tokens.logout().await;
                    }
                    return Err(BuildError::PartialPlaylist {
                        playlist,
                        added,
                        total,
                        source,
                    });
                }
            }
        }

        Ok(BuiltPlaylist {
            playlist,
            track_count: total,
        })
    }

    async fn collect_artist_tracks(&mut self, artist_id: &str) -> Result<Vec<Track>, BuildError> {
        let token = self.bearer().await?;
        let mut pages = LibraryPages::new(self.api, token, self.page_size);
        let mut matched = Vec::new();
        let mut scanned = 0;

        while let Some(page) = pages.next_page().await {
            let page = self.checked(page).await?;
            scanned += page.tracks.len();
            matched.extend(library::tracks_by_artist(page.tracks, artist_id));
            self.report(BuildProgress::ScannedPage {
                scanned,
                matched: matched.len(),
            });
        }

        Ok(matched)
    }

    async fn bearer(&mut self) -> Result<String, BuildError> {
        if let Some(token) = self.tokens.current_token() {
            return Ok(token.to_string());
        }

        let expired = self.tokens.session().is_some();
        let _ = self.tokens.logout().await;
        if expired {
            Err(BuildError::SessionExpired)
        } else {
            Err(BuildError::NotAuthenticated)
        }
    }

    async fn checked<T>(&mut self, result: Result<T, ApiError>) -> Result<T, BuildError> {
        match result {
            Ok(value) => Ok(value),
            Err(ApiError::Unauthorized) => {
                let _ = self.tokens.logout().await;
                Err(BuildError::SessionExpired)
            }
            Err(e) => Err(BuildError::Api(e)),
        }
    }

    fn report(&mut self, progress: BuildProgress) {
        if let Some(f) = self.progress.as_mut() {
            f(progress);
        }
    }
}
