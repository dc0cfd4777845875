//! Search module - exact substring search over one static corpus / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - `suffix_array` owns the corpus and answers byte-exact occurrence lookups
//! - `query` turns a raw query into case variants, merged offsets and snippets
//! - Call direction: query → suffix_array (unidirectional) / 调用方向
//!
//! Index features / 索引特性：
//! - Built once at startup, immutable afterwards, shared without locks
//! - Case-insensitive-ish matching through literal/lower/upper/title variants
//! - Results in corpus order, never ranked

pub mod error;
pub mod query;
pub mod suffix_array;

pub use error::{IndexBuildError, SearchError};
pub use query::{SearchSettings, Searcher, Snippet};
pub use suffix_array::{CorpusIndex, PatternIndex};
