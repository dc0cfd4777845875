pub mod search;
pub mod server;

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the HTTP router / 构建路由
///
/// Anything that is not an API route falls through to the static directory.
pub fn router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/search", get(search::search))
        .route("/api/health", get(server::health_check))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{CorpusIndex, SearchSettings, Searcher};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const CORPUS: &[u8] = b"The Cat sat. the cat ran. THE CAT slept.";

    fn test_app(static_dir: &Path) -> Router {
        let index = CorpusIndex::build(CORPUS.to_vec()).unwrap();
        let searcher = Searcher::new(
            Arc::new(index),
            SearchSettings {
                context_bytes: 10,
                min_query_len: 2,
            },
        );
        router(Arc::new(AppState::new(searcher)), static_dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn test_search_returns_json_snippets() {
        let dir = tempfile::tempdir().unwrap();
        let (status, content_type, body) = get(test_app(dir.path()), "/search?q=cat").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let results: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            results,
            vec!["The Cat sat. t", " sat. the cat ran. T", " ran. THE CAT slept."]
        );
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get(test_app(dir.path()), "/search?q=%20%20ran%20").await;

        assert_eq!(status, StatusCode::OK);
        let results: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].contains("ran"));
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get(test_app(dir.path()), "/search?q=ab").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn test_search_rejects_short_query() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get(test_app(dir.path()), "/search?q=%20a%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"search query too short");
    }

    #[tokio::test]
    async fn test_search_rejects_missing_query() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get(test_app(dir.path()), "/search").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, b"search query too short");
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get(test_app(dir.path()), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["corpus_bytes"], CORPUS.len());
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>search</h1>").unwrap();

        let (status, _, body) = get(test_app(dir.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>search</h1>");

        let (status, _, _) = get(test_app(dir.path()), "/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
