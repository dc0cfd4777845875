use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /search?q=... - 搜索
///
/// 200 with a JSON array of snippet strings in corpus order,
/// 400 when the query is missing or too short.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(raw) = params.q else {
        return bad_query();
    };

    // CPU-bound over the whole corpus, keep it off the async workers
    let searcher = state.searcher.clone();
    let outcome = tokio::task::spawn_blocking(move || searcher.search(&raw)).await;

    let snippets = match outcome {
        Ok(Ok(snippets)) => snippets,
        Ok(Err(e)) if e.is_bad_query() => return bad_query(),
        Ok(Err(e)) => {
            tracing::error!("Search failed: {}", e);
            return encoding_failure();
        }
        Err(e) => {
            tracing::error!("Search task panicked: {}", e);
            return encoding_failure();
        }
    };

    let texts: Vec<String> = snippets.into_iter().map(|s| s.text).collect();
    match serde_json::to_vec(&texts) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode search results: {}", e);
            encoding_failure()
        }
    }
}

fn bad_query() -> Response {
    (StatusCode::BAD_REQUEST, "search query too short").into_response()
}

fn encoding_failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "encoding failure").into_response()
}
