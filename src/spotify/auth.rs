use std::{sync::Arc, time::Duration};

use tokio::net::TcpListener;

use crate::{
    Res, config,
    management::SharedTokenManager,
    server::serve_api,
    types::AuthConfig,
    warning,
};

/// How long `login` waits for the browser to come back.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

impl AuthConfig {
    /// Authorization settings from the configuration.
    ///
    /// # Errors
    ///
    /// Fails when no client id is configured.
    pub fn from_env() -> Result<Self, String> {
        Ok(AuthConfig {
            authorize_url: config::spotify_apiauth_url(),
            client_id: config::spotify_client_id()?,
            redirect_uri: config::spotify_redirect_uri(),
            scopes: config::spotify_scope()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Runs the implicit grant flow end to end.
///
/// 1. Binds the local redirect server so the callback cannot be missed
/// 2. Persists a fresh anti-forgery value and builds the authorization URL
/// 3. Opens the URL in the default browser (or prints it)
/// 4. Waits until the redirect server has verified a session
///
/// Returns whether a session was established before [`LOGIN_TIMEOUT`].
pub async fn login(tokens: SharedTokenManager, auth: &AuthConfig, server_addr: &str) -> Res<bool> {
    let listener = TcpListener::bind(server_addr).await?;

    let auth_url = {
        let lock = tokens.lock().await;
        lock.begin_login(auth).await?
    };

    let server_state = Arc::clone(&tokens);
    let server = tokio::spawn(async move {
        if let Err(e) = serve_api(listener, server_state).await {
            warning!("Redirect server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let authenticated = wait_for_session(tokens, LOGIN_TIMEOUT).await;

    // let the redirect page receive its response before the server goes away
    tokio::time::sleep(Duration::from_millis(500)).await;
    server.abort();

    Ok(authenticated)
}

/// Polls the shared token manager until it holds a valid session.
pub async fn wait_for_session(tokens: SharedTokenManager, max_wait: Duration) -> bool {
    let start = tokio::time::Instant::now();

    while start.elapsed() < max_wait {
        if tokens.lock().await.is_authenticated() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    tokens.lock().await.is_authenticated()
}
