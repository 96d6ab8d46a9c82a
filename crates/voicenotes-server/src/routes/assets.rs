//! Bundled browser page and static assets.
//!
//! `GET /` serves the entry document; every other unmatched GET is looked up
//! under the static directory. Nothing outside that directory is reachable.

use std::path::{Component, Path, PathBuf};

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::state::AppState;

/// Content type for a file, guessed from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("webm") => "audio/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("webmanifest") => "application/manifest+json",
        _ => "application/octet-stream",
    }
}

/// Map a request path onto the static root.
///
/// Each segment is percent-decoded before it is checked. Returns `None` for
/// empty paths, undecodable segments, and anything that decodes to `..`, a
/// separator or a root.
pub fn resolve_static_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    let mut pushed = false;

    for segment in request_path.split('/') {
        let part = percent_decode_str(segment).decode_utf8().ok()?;
        if part.is_empty() || part == "." {
            continue;
        }
        if part.contains(['/', '\\', '\0']) {
            return None;
        }

        let mut components = Path::new(&*part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => resolved.push(name),
            _ => return None,
        }
        pushed = true;
    }

    pushed.then_some(resolved)
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return StatusCode::NOT_FOUND.into_response(),
    }

    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(path))], bytes).into_response(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Static file unreadable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// GET /
pub async fn index_handler(State(state): State<AppState>) -> Response {
    serve_file(&state.config.index_path()).await
}

/// Fallback for every unmatched route.
pub async fn static_fallback(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    match resolve_static_path(&state.config.static_dir, uri.path()) {
        Some(path) => serve_file(&path).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::TestApp;

    #[test]
    fn test_resolve_rejects_escapes() {
        let root = Path::new("/srv/static");
        assert_eq!(
            resolve_static_path(root, "/css/app.css"),
            Some(PathBuf::from("/srv/static/css/app.css"))
        );
        assert_eq!(
            resolve_static_path(root, "/./app.js"),
            Some(PathBuf::from("/srv/static/app.js"))
        );
        assert_eq!(resolve_static_path(root, "/../etc/passwd"), None);
        assert_eq!(resolve_static_path(root, "/css/../../secret"), None);
        assert_eq!(
            resolve_static_path(root, "//etc/passwd"),
            Some(PathBuf::from("/srv/static/etc/passwd"))
        );
        assert_eq!(resolve_static_path(root, "/"), None);
    }

    #[test]
    fn test_resolve_decodes_segments() {
        let root = Path::new("/srv/static");
        assert_eq!(
            resolve_static_path(root, "/my%20notes.css"),
            Some(PathBuf::from("/srv/static/my notes.css"))
        );
        assert_eq!(
            resolve_static_path(root, "/%D0%B7%D0%B0%D0%BC%D0%B5%D1%82%D0%BA%D0%B8.js"),
            Some(PathBuf::from("/srv/static/заметки.js"))
        );
        assert_eq!(resolve_static_path(root, "/%2e%2e/secret"), None);
        assert_eq!(resolve_static_path(root, "/css/%2E%2E/%2E%2E/secret"), None);
        assert_eq!(resolve_static_path(root, "/a%2Fb"), None);
        assert_eq!(resolve_static_path(root, "/..%5Csecret"), None);
        assert_eq!(resolve_static_path(root, "/%FF"), None);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("LOGO.PNG")), "image/png");
        assert_eq!(
            content_type_for(Path::new("blob")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_index_served_at_root() {
        let app = TestApp::new();
        let response = app.get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(std::str::from_utf8(&body).unwrap().contains("VoiceNotes"));
    }

    #[tokio::test]
    async fn test_static_asset_and_missing_file() {
        let app = TestApp::new();

        let response = app.get("/app.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );

        let response = app.get("/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_encoded_file_names_are_served() {
        let app = TestApp::new();
        std::fs::write(app.static_dir().join("my notes.css"), "body {}").unwrap();
        std::fs::write(app.static_dir().join("заметки.js"), "1").unwrap();

        let response = app.get("/my%20notes.css").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .get("/%D0%B7%D0%B0%D0%BC%D0%B5%D1%82%D0%BA%D0%B8.js")
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );

        let response = app.get("/%2e%2e/app.css").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let app = TestApp::new();
        std::fs::create_dir(app.static_dir().join("sub")).unwrap();
        let response = app.get("/sub").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_get_fallback_is_404() {
        let app = TestApp::new();
        let response = app.send(Method::POST, "/app.css").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
