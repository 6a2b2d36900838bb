//! # API Module
//!
//! HTTP endpoints of the local redirect server used during `coleccion login`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Landing page of the OAuth redirect. The implicit grant puts
//!   the token into the URL fragment, which browsers never send to a server, so
//!   the page forwards the fragment to [`token`] from a short script.
//! - [`token`] - Hands the forwarded fragment to
//!   [`TokenManager::complete_login_from_redirect`](crate::management::TokenManager::complete_login_from_redirect).
//! - [`health`] - Status and version for quick manual checks.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use coleccion::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod health;
mod redirect;

pub use health::health;
pub use redirect::{callback, token};
