//! Search error types / 搜索错误类型

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the corpus index / 构建语料索引时的错误
///
/// All of these are startup-time failures: the server must not start
/// serving without an index.
#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("Failed to read corpus {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus of {len} bytes exceeds the 4 GiB index limit")]
    CorpusTooLarge { len: usize },

    #[error("Failed to start index build pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors surfaced by the search pipeline / 搜索流程错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// Query missing or shorter than the minimum length after trimming
    #[error("search query too short (minimum {min_len} bytes)")]
    BadQuery { min_len: usize },

    #[error(transparent)]
    IndexBuild(#[from] IndexBuildError),
}

impl SearchError {
    pub fn is_bad_query(&self) -> bool {
        matches!(self, SearchError::BadQuery { .. })
    }
}
