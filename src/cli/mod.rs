//! # CLI Module
//!
//! User-facing commands of `coleccion`. Each command restores or establishes the
//! session, delegates to the [`spotify`](crate::spotify) workflow and renders the
//! single outcome through the colored output macros.
//!
//! ## Commands
//!
//! - [`login`] - Implicit grant login through the browser
//! - [`logout`] - Forget the stored session
//! - [`status`] - Show whether a session is stored and when it expires
//! - [`search`] - List artists matching a query
//! - [`playlist`] - Build "<artist> - Mi Colección" from the saved tracks
//!
//! ## Usage Patterns
//!
//! ```bash
//! coleccion login
//! coleccion search "soda stereo"
//! coleccion playlist "soda stereo" --pick 1
//! coleccion logout
//! ```

mod auth;
mod playlist;
mod search;

pub use auth::login;
pub use auth::logout;
pub use auth::status;
pub use playlist::playlist;
pub use search::search;

use crate::{
    error,
    error::BuildError,
    info,
    management::{FileStore, TokenManager},
    warning,
};

/// Restores the stored session or exits asking the user to log in.
pub(crate) async fn require_session() -> TokenManager<FileStore> {
    let mut tokens = TokenManager::new(FileStore::default_location());
    if !tokens.restore_session().await {
        error!("Not logged in or session expired. Please run coleccion login");
    }
    tokens
}

/// Renders a workflow failure as one user-facing message.
pub(crate) fn report_build_error(err: BuildError) {
    let relogin = err.requires_login();
    match err {
        BuildError::PartialPlaylist {
            playlist,
            added,
            total,
            source,
        } => {
            warning!(
                "Playlist \"{}\" is incomplete: {} of {} tracks added. Err: {}",
                playlist.name,
                added,
                total,
                source
            );
            if let Some(url) = playlist.external_url {
                info!("Open in Spotify: {}", url);
            }
            if relogin {
                error!("Session expired. Please run coleccion login");
            }
            std::process::exit(1);
        }
        e if relogin => error!("{}. Please run coleccion login", e),
        e @ BuildError::NoTracksFound { .. } => warning!("{}", e),
        e => error!("{}", e),
    }
}
