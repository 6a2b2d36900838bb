use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config, error, info,
    management::{FileStore, TokenManager},
    spotify::{self, auth::LOGIN_TIMEOUT},
    success,
    types::AuthConfig,
    utils, warning,
};

pub async fn login() {
    let auth = match AuthConfig::from_env() {
        Ok(auth) => auth,
        Err(e) => error!("Cannot start login. Err: {}", e),
    };

    let mut tokens = TokenManager::new(FileStore::default_location());
    if tokens.restore_session().await {
        info!("Replacing the current session.");
    }

    let tokens = Arc::new(Mutex::new(tokens));
    info!(
        "Waiting up to {} seconds for the Spotify login to complete...",
        LOGIN_TIMEOUT.as_secs()
    );

    match spotify::auth::login(tokens, &auth, &config::server_addr()).await {
        Ok(true) => success!("Authentication successful!"),
        Ok(false) => error!("Authentication failed or timed out."),
        Err(e) => error!("Cannot run login flow. Err: {}", e),
    }
}

pub async fn logout() {
    let mut tokens = TokenManager::new(FileStore::default_location());
    match tokens.logout().await {
        Ok(()) => success!("Logged out."),
        Err(e) => warning!("Session cleared in memory, but storage failed. Err: {}", e),
    }
}

pub async fn status() {
    let mut tokens = TokenManager::new(FileStore::default_location());
    if !tokens.restore_session().await {
        warning!("Not logged in. Run coleccion login.");
        return;
    }

    if let Some(session) = tokens.session() {
        let minutes = (session.expires_at - tokens.now()) / 60_000;
        success!(
            "Logged in. Session expires at {} ({} minutes left).",
            utils::format_timestamp(session.expires_at),
            minutes
        );
    }
}
