use chrono::Utc;

use crate::{
    Res,
    error::StoreError,
    management::KeyValueStore,
    types::{AuthConfig, AuthorizeRequest, RedirectFragment, Session},
    utils,
};

pub const AUTH_STATE_KEY: &str = "spotify_auth_state";
pub const ACCESS_TOKEN_KEY: &str = "spotify_access_token";
pub const TOKEN_EXPIRES_KEY: &str = "spotify_token_expires";

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Owns the implicit grant login and the lifecycle of the persisted [`Session`].
///
/// Nothing else in the crate writes the session: API callers only read
/// [`TokenManager::current_token`] and call [`TokenManager::logout`] when the
/// token is rejected.
pub struct TokenManager<S> {
    store: S,
    session: Option<Session>,
    clock: Clock,
}

impl<S: KeyValueStore> TokenManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, || Utc::now().timestamp_millis())
    }

    /// Uses `clock` (unix milliseconds) instead of the system time.
    pub fn with_clock(store: S, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        TokenManager {
            store,
            session: None,
            clock: Box::new(clock),
        }
    }

    /// Persists a fresh anti-forgery value and returns the authorization URL the
    /// user agent has to visit.
    pub async fn begin_login(&self, auth: &AuthConfig) -> Res<String> {
        let state = utils::generate_state();
        self.store.set(AUTH_STATE_KEY, &state).await?;

        let params = serde_urlencoded::to_string(AuthorizeRequest {
            client_id: &auth.client_id,
            response_type: "token",
            redirect_uri: &auth.redirect_uri,
            state: &state,
            scope: auth.scopes.join(" "),
            show_dialog: true,
        })?;

        Ok(format!("{}?{}", auth.authorize_url, params))
    }

    /// Verifies the redirect fragment against the stored anti-forgery value and
    /// starts a session from it.
    ///
    /// Returns `false` without touching the stored session when the fragment
    /// carries an error, lacks a field, has a non-positive or out of range
    /// lifetime, or its state does not match.
    pub async fn complete_login_from_redirect(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim_start_matches('#');
        let params: RedirectFragment = match serde_urlencoded::from_str(fragment) {
            Ok(p) => p,
            Err(_) => return false,
        };

        if params.error.is_some() {
            return false;
        }

        let (Some(token), Some(expires_in), Some(state)) =
            (params.access_token, params.expires_in, params.state)
        else {
            return false;
        };

        let stored_state = match self.store.get(AUTH_STATE_KEY).await {
            Ok(Some(s)) => s,
            _ => return false,
        };

        if token.is_empty() || expires_in <= 0 || state != stored_state {
            return false;
        }

        let Some(expires_at) = expires_in
            .checked_mul(1000)
            .and_then(|ms| (self.clock)().checked_add(ms))
        else {
            return false;
        };

        let session = Session { token, expires_at };

        if self.persist(&session).await.is_err() {
            return false;
        }

        // the session is already usable, a stale state only blocks replays
        let _ = self.store.remove(AUTH_STATE_KEY).await;
        self.session = Some(session);
        true
    }

    /// Loads the persisted session, keeping it only while it is unexpired.
    ///
    /// An expired, partial or unreadable session is cleared from storage.
    pub async fn restore_session(&mut self) -> bool {
        let token = self.store.get(ACCESS_TOKEN_KEY).await.ok().flatten();
        let expires_at = self
            .store
            .get(TOKEN_EXPIRES_KEY)
            .await
            .ok()
            .flatten()
            .and_then(|v| v.trim().parse::<i64>().ok());

        if let (Some(token), Some(expires_at)) = (token, expires_at) {
            let session = Session { token, expires_at };
            if session.is_valid_at((self.clock)()) {
                self.session = Some(session);
                return true;
            }
        }

        let _ = self.logout().await;
        false
    }

    /// Drops the in-memory session, then the persisted one.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        self.session = None;
        let token = self.store.remove(ACCESS_TOKEN_KEY).await;
        let expires = self.store.remove(TOKEN_EXPIRES_KEY).await;
        token.and(expires)
    }

    pub fn current_token(&self) -> Option<&str> {
        let now = (self.clock)();
        self.session
            .as_ref()
            .filter(|s| s.is_valid_at(now))
            .map(|s| s.token.as_str())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    pub fn now(&self) -> i64 {
        (self.clock)()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn persist(&self, session: &Session) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, &session.token).await?;
        self.store
            .set(TOKEN_EXPIRES_KEY, &session.expires_at.to_string())
            .await
    }
}
