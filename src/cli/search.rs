use tabled::Table;

use crate::{
    cli::{report_build_error, require_session},
    spotify::{PlaylistBuilder, SpotifyClient},
    utils, warning,
};

pub async fn search(query: String) {
    let mut tokens = require_session().await;
    let client = SpotifyClient::from_env();

    let pb = utils::spinner("Searching artists...");
    let result = PlaylistBuilder::new(&client, &mut tokens)
        .search_artists(&query)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(artists) if artists.is_empty() => warning!("No artists for \"{}\"", query.trim()),
        Ok(artists) => {
            let table = Table::new(utils::artist_table_rows(&artists));
            println!("{}", table);
        }
        Err(e) => report_build_error(e),
    }
}
