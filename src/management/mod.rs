mod auth;
mod store;

pub use auth::ACCESS_TOKEN_KEY;
pub use auth::AUTH_STATE_KEY;
pub use auth::TOKEN_EXPIRES_KEY;
pub use auth::TokenManager;
pub use store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;

/// Token manager shared between the login command and the redirect server.
pub type SharedTokenManager = std::sync::Arc<tokio::sync::Mutex<TokenManager<FileStore>>>;
