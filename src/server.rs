use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{Res, api, management::SharedTokenManager};

pub fn router(state: SharedTokenManager) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .route("/token", get(api::token).layer(Extension(state)))
}

/// Serves the redirect routes on an already bound listener.
pub async fn serve_api(listener: TcpListener, state: SharedTokenManager) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
