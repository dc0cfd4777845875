use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::search::{CorpusIndex, Searcher};

/// Shared application state / 共享应用状态
///
/// The searcher holds the only index; handlers reach it through `Arc<AppState>`.
pub struct AppState {
    pub searcher: Arc<Searcher<CorpusIndex>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(searcher: Searcher<CorpusIndex>) -> Self {
        Self {
            searcher: Arc::new(searcher),
            started_at: Utc::now(),
        }
    }

    /// Size of the indexed corpus in bytes / 语料字节数
    pub fn corpus_bytes(&self) -> usize {
        self.searcher.index().len()
    }
}
