use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use coleccion::management::{
    ACCESS_TOKEN_KEY, AUTH_STATE_KEY, KeyValueStore, MemoryStore, TOKEN_EXPIRES_KEY, TokenManager,
};
use coleccion::types::{AuthConfig, Session};

const NOW: i64 = 1_700_000_000_000;

// Helper function to create a token manager with a controllable clock
fn create_manager() -> (TokenManager<MemoryStore>, Arc<AtomicI64>) {
    let now = Arc::new(AtomicI64::new(NOW));
    let clock = Arc::clone(&now);
    let manager = TokenManager::with_clock(MemoryStore::new(), move || {
        clock.load(Ordering::SeqCst)
    });
    (manager, now)
}

fn create_auth_config() -> AuthConfig {
    AuthConfig {
        authorize_url: "https://accounts.example.com/authorize".to_string(),
        client_id: "client-123".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        scopes: vec![
            "user-library-read".to_string(),
            "playlist-modify-private".to_string(),
        ],
    }
}

#[tokio::test]
async fn test_begin_login_persists_state_and_builds_url() {
    let (manager, _) = create_manager();

    let url = manager.begin_login(&create_auth_config()).await.unwrap();
    let state = manager
        .store()
        .get(AUTH_STATE_KEY)
        .await
        .unwrap()
        .expect("state must be persisted");

    assert!(url.starts_with("https://accounts.example.com/authorize?"));
    assert!(url.contains("client_id=client-123"));
    assert!(url.contains("response_type=token"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains(&format!("state={}", state)));
    assert!(url.contains("scope=user-library-read+playlist-modify-private"));
    assert!(url.contains("show_dialog=true"));
}

#[tokio::test]
async fn test_begin_login_replaces_previous_state() {
    let (manager, _) = create_manager();
    let auth = create_auth_config();

    manager.begin_login(&auth).await.unwrap();
    let first = manager.store().get(AUTH_STATE_KEY).await.unwrap();
    manager.begin_login(&auth).await.unwrap();
    let second = manager.store().get(AUTH_STATE_KEY).await.unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_complete_login_with_matching_state() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();

    let ok = manager
        .complete_login_from_redirect("access_token=tok-1&token_type=Bearer&expires_in=3600&state=xyz")
        .await;

    assert!(ok);
    assert_eq!(
        manager.session(),
        Some(&Session {
            token: "tok-1".to_string(),
            expires_at: NOW + 3_600_000,
        })
    );
    assert_eq!(manager.current_token(), Some("tok-1"));

    let store = manager.store();
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("tok-1")
    );
    assert_eq!(
        store.get(TOKEN_EXPIRES_KEY).await.unwrap(),
        Some((NOW + 3_600_000).to_string())
    );
    // The anti-forgery value is single use
    assert_eq!(store.get(AUTH_STATE_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_complete_login_accepts_leading_hash() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();

    assert!(
        manager
            .complete_login_from_redirect("#access_token=tok-1&expires_in=60&state=xyz")
            .await
    );
    assert!(manager.is_authenticated());
}

#[tokio::test]
async fn test_complete_login_rejects_mismatched_state() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();

    let ok = manager
        .complete_login_from_redirect("access_token=tok-1&expires_in=3600&state=forged")
        .await;

    assert!(!ok);
    assert!(manager.session().is_none());
    assert_eq!(manager.store().get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(manager.store().get(TOKEN_EXPIRES_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_complete_login_rejects_when_no_state_was_stored() {
    let (mut manager, _) = create_manager();

    let ok = manager
        .complete_login_from_redirect("access_token=tok-1&expires_in=3600&state=xyz")
        .await;

    assert!(!ok);
    assert!(manager.store().is_empty());
}

#[tokio::test]
async fn test_complete_login_rejects_missing_state_parameter() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();

    assert!(
        !manager
            .complete_login_from_redirect("access_token=tok-1&expires_in=3600")
            .await
    );
    assert_eq!(manager.store().get(ACCESS_TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_complete_login_rejects_incomplete_or_failed_redirects() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();

    for fragment in [
        "",
        "expires_in=3600&state=xyz",
        "access_token=tok-1&state=xyz",
        "access_token=&expires_in=3600&state=xyz",
        "access_token=tok-1&expires_in=soon&state=xyz",
        "error=access_denied&state=xyz",
    ] {
        assert!(
            !manager.complete_login_from_redirect(fragment).await,
            "fragment {:?} must not log in",
            fragment
        );
    }

    assert!(manager.session().is_none());
    assert_eq!(manager.store().get(ACCESS_TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_complete_login_rejects_unusable_lifetimes() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();

    for fragment in [
        "access_token=tok-1&expires_in=0&state=xyz",
        "access_token=tok-1&expires_in=-60&state=xyz",
        "access_token=tok-1&expires_in=9223372036854775&state=xyz",
        "access_token=tok-1&expires_in=9223372036854775807&state=xyz",
    ] {
        assert!(
            !manager.complete_login_from_redirect(fragment).await,
            "fragment {:?} must not log in",
            fragment
        );
    }

    assert!(manager.session().is_none());
    assert_eq!(manager.store().get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(manager.store().get(TOKEN_EXPIRES_KEY).await.unwrap(), None);
    // The state stays until a valid redirect arrives
    assert_eq!(
        manager.store().get(AUTH_STATE_KEY).await.unwrap().as_deref(),
        Some("xyz")
    );
}

#[tokio::test]
async fn test_restore_session_with_valid_token() {
    let (mut manager, _) = create_manager();
    let store = manager.store();
    store.set(ACCESS_TOKEN_KEY, "tok-1").await.unwrap();
    store
        .set(TOKEN_EXPIRES_KEY, &(NOW + 1_000).to_string())
        .await
        .unwrap();

    assert!(manager.restore_session().await);
    assert_eq!(manager.current_token(), Some("tok-1"));
}

#[tokio::test]
async fn test_restore_session_with_expired_token_clears_storage() {
    let (mut manager, _) = create_manager();
    let store = manager.store();
    store.set(ACCESS_TOKEN_KEY, "tok-1").await.unwrap();
    store.set(TOKEN_EXPIRES_KEY, &NOW.to_string()).await.unwrap();

    assert!(!manager.restore_session().await);
    assert!(manager.session().is_none());
    assert_eq!(manager.store().get(ACCESS_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(manager.store().get(TOKEN_EXPIRES_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_restore_session_with_corrupt_expiry() {
    let (mut manager, _) = create_manager();
    let store = manager.store();
    store.set(ACCESS_TOKEN_KEY, "tok-1").await.unwrap();
    store.set(TOKEN_EXPIRES_KEY, "tomorrow").await.unwrap();

    assert!(!manager.restore_session().await);
    assert!(manager.store().is_empty());
}

#[tokio::test]
async fn test_restore_session_without_anything_stored() {
    let (mut manager, _) = create_manager();
    assert!(!manager.restore_session().await);
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn test_current_token_stops_at_expiry() {
    let (mut manager, now) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();
    assert!(
        manager
            .complete_login_from_redirect("access_token=tok-1&expires_in=60&state=xyz")
            .await
    );

    now.store(NOW + 59_999, Ordering::SeqCst);
    assert_eq!(manager.current_token(), Some("tok-1"));

    now.store(NOW + 60_000, Ordering::SeqCst);
    assert_eq!(manager.current_token(), None);
    // The expired session is still visible until someone logs out
    assert!(manager.session().is_some());
}

#[tokio::test]
async fn test_logout_clears_memory_and_storage() {
    let (mut manager, _) = create_manager();
    manager.store().set(AUTH_STATE_KEY, "xyz").await.unwrap();
    assert!(
        manager
            .complete_login_from_redirect("access_token=tok-1&expires_in=3600&state=xyz")
            .await
    );

    manager.logout().await.unwrap();

    assert!(manager.session().is_none());
    assert_eq!(manager.current_token(), None);
    assert!(manager.store().is_empty());

    // Logging out twice is fine
    manager.logout().await.unwrap();
}
