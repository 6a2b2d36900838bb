use crate::{
    error::ApiError,
    spotify::SpotifyApi,
    types::{LibraryPage, Track},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Lazy walk over the user's saved tracks.
///
/// Each [`next_page`](LibraryPages::next_page) issues exactly one request and
/// the walk ends once a page comes back without a `next` cursor. A failed
/// request leaves the cursor in place, so calling `next_page` again retries
/// the same page.
pub struct LibraryPages<'a, A: ?Sized> {
    api: &'a A,
    token: String,
    page_size: u32,
    cursor: Cursor,
}

impl<'a, A: SpotifyApi + ?Sized> LibraryPages<'a, A> {
    pub fn new(api: &'a A, token: impl Into<String>, page_size: u32) -> Self {
        LibraryPages {
            api,
            token: token.into(),
            page_size,
            cursor: Cursor::Start,
        }
    }

    pub async fn next_page(&mut self) -> Option<Result<LibraryPage, ApiError>> {
        let cursor = match &self.cursor {
            Cursor::Start => None,
            Cursor::Next(next) => Some(next.clone()),
            Cursor::Exhausted => return None,
        };

        match self
            .api
            .saved_tracks(&self.token, cursor.as_deref(), self.page_size)
            .await
        {
            Ok(page) => {
                self.cursor = match &page.next {
                    Some(next) => Cursor::Next(next.clone()),
                    None => Cursor::Exhausted,
                };
                Some(Ok(page))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Rewinds to the first page.
    pub fn restart(&mut self) {
        self.cursor = Cursor::Start;
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }
}

/// Keeps the tracks crediting `artist_id`, in library order.
pub fn tracks_by_artist(tracks: Vec<Track>, artist_id: &str) -> Vec<Track> {
    tracks.into_iter().filter(|t| t.is_by(artist_id)).collect()
}
