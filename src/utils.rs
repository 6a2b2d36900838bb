use std::time::Duration;

use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

use crate::types::{Artist, ArtistTableRow};

pub const STATE_LENGTH: usize = 16;

/// Random anti-forgery value sent as the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

pub fn playlist_name(artist_name: &str) -> String {
    format!("{} - Mi Colección", artist_name)
}

pub fn playlist_description(artist_name: &str, track_count: usize) -> String {
    let noun = if track_count == 1 {
        "canción"
    } else {
        "canciones"
    };
    format!(
        "Creada automáticamente • {} {} de {}",
        track_count, noun, artist_name
    )
}

/// Compact follower count, e.g. `1.2M seguidores`.
pub fn format_followers(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M seguidores", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K seguidores", count as f64 / 1_000.0)
    } else {
        format!("{} seguidores", count)
    }
}

pub fn artist_table_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            position: i + 1,
            name: a.name.clone(),
            genres: a
                .genres
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            followers: format_followers(a.follower_count),
        })
        .collect()
}

/// Renders a unix millisecond timestamp in local time.
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => millis.to_string(),
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
