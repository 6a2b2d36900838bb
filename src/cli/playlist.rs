use crate::{
    cli::{report_build_error, require_session},
    error, info,
    spotify::{PlaylistBuilder, SpotifyClient},
    success, utils, warning,
};

pub async fn playlist(query: String, pick: usize) {
    let mut tokens = require_session().await;
    let client = SpotifyClient::from_env();

    let artists = match PlaylistBuilder::new(&client, &mut tokens)
        .search_artists(&query)
        .await
    {
        Ok(artists) => artists,
        Err(e) => return report_build_error(e),
    };

    if artists.is_empty() {
        warning!("No artists for \"{}\"", query.trim());
        return;
    }

    let Some(artist) = pick.checked_sub(1).and_then(|i| artists.get(i)) else {
        error!(
            "Cannot pick result {}, the search returned {} artists.",
            pick,
            artists.len()
        );
    };

    info!("Looking for songs by {} in your library", artist.name);

    let pb = utils::spinner("Analyzing your library...");
    let progress_bar = pb.clone();
    let result = PlaylistBuilder::new(&client, &mut tokens)
        .on_progress(move |p| progress_bar.set_message(p.to_string()))
        .build_playlist_for_artist(artist)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(built) => {
            let noun = if built.track_count == 1 {
                "track"
            } else {
                "tracks"
            };
            success!(
                "Created \"{}\" with {} {}.",
                built.playlist.name,
                built.track_count,
                noun
            );
            if let Some(url) = built.playlist.external_url {
                info!("Open in Spotify: {}", url);
            }
        }
        Err(e) => report_build_error(e),
    }
}
