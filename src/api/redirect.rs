use axum::{Extension, extract::RawQuery, response::Html};

use crate::{management::SharedTokenManager, warning};

const CALLBACK_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>coleccion</title></head>
  <body>
    <h4>Completing login...</h4>
    <script>
      const hash = window.location.hash.substring(1);
      const params = hash.length > 0 ? hash : window.location.search.substring(1);
      window.history.replaceState({}, document.title, window.location.pathname);
      fetch('/token?' + params)
        .then((r) => r.text())
        .then((html) => { document.body.innerHTML = html; })
        .catch(() => { document.body.innerHTML = '<h4>Login failed.</h4>'; });
    </script>
  </body>
</html>
"#;

pub async fn callback() -> Html<&'static str> {
    Html(CALLBACK_PAGE)
}

pub async fn token(
    RawQuery(query): RawQuery,
    Extension(tokens): Extension<SharedTokenManager>,
) -> Html<&'static str> {
    let fragment = query.unwrap_or_default();
    let mut lock = tokens.lock().await;

    if lock.complete_login_from_redirect(&fragment).await {
        Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
    } else {
        warning!("Received a redirect without a valid token or with a foreign state.");
        Html("<h4>Login failed.</h4>")
    }
}
