use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shakesearch_backend::config;
use shakesearch_backend::search::{CorpusIndex, Searcher};
use shakesearch_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shakesearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let mut app_config = config::load_config().map_err(anyhow::Error::msg)?;
    app_config.apply_env_overrides();
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Index the corpus before accepting any request / 先建立索引再接受请求
    let corpus_path = app_config.get_corpus_path();
    let build_threads = app_config.search.build_threads;
    let index = tokio::task::spawn_blocking(move || CorpusIndex::load(&corpus_path, build_threads))
        .await
        .context("Index build task failed")?
        .context("Failed to build corpus index")?;

    let searcher = Searcher::new(Arc::new(index), app_config.search_settings());
    let state = Arc::new(AppState::new(searcher));

    let app = shakesearch_backend::api::router(state, app_config.get_static_dir());

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
