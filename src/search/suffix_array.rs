//! Corpus index - suffix array over an immutable byte buffer / 语料索引
//!
//! Built once at startup, then shared read-only by every request:
//! - build: prefix-doubling suffix array construction / 前缀倍增构建后缀数组
//! - lookup: all start offsets of a byte pattern, O(m log n + k) / 查找所有出现位置
//! - bytes: borrowed view of the corpus for windowing / 语料只读视图

use std::ops::Range;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use super::error::IndexBuildError;

/// Read-only access to an occurrence index / 出现位置索引的只读接口
///
/// The query resolver only depends on this trait, so tests can swap in a
/// counting double for the real suffix array.
pub trait PatternIndex: Send + Sync {
    /// All start offsets of `pattern`, in unspecified order.
    /// `limit = None` returns every match.
    fn lookup(&self, pattern: &[u8], limit: Option<usize>) -> Vec<usize>;

    /// The indexed corpus / 被索引的语料
    fn bytes(&self) -> &[u8];
}

/// Suffix array index over one corpus / 单一语料的后缀数组索引
pub struct CorpusIndex {
    data: Vec<u8>,
    /// Start offsets of all suffixes, in lexicographic order
    suffixes: Vec<u32>,
}

impl CorpusIndex {
    /// Build on the global rayon pool / 使用全局线程池构建
    pub fn build(data: Vec<u8>) -> Result<Self, IndexBuildError> {
        Self::check_len(&data)?;
        Ok(Self::build_unchecked(data))
    }

    /// Build on a dedicated pool with `threads` workers (0 = rayon default) / 使用指定线程数构建
    pub fn build_with_threads(data: Vec<u8>, threads: usize) -> Result<Self, IndexBuildError> {
        Self::check_len(&data)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("index-build-{}", i))
            .build()?;
        Ok(pool.install(|| Self::build_unchecked(data)))
    }

    /// Read a corpus file and index it / 读取语料文件并建立索引
    pub fn load(path: impl AsRef<Path>, threads: usize) -> Result<Self, IndexBuildError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| IndexBuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded corpus {:?} ({} bytes)", path, data.len());
        Self::build_with_threads(data, threads)
    }

    fn check_len(data: &[u8]) -> Result<(), IndexBuildError> {
        if data.len() > u32::MAX as usize {
            return Err(IndexBuildError::CorpusTooLarge { len: data.len() });
        }
        Ok(())
    }

    fn build_unchecked(data: Vec<u8>) -> Self {
        let started = Instant::now();
        let suffixes = build_suffix_array(&data);
        tracing::info!(
            "Corpus index built: {} bytes, {} suffixes in {:?}",
            data.len(),
            suffixes.len(),
            started.elapsed()
        );
        Self { data, suffixes }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Start offsets of `pattern`, capped at `limit` when given / 查找模式的起始偏移
    ///
    /// Matching is byte-exact and case-sensitive. An empty pattern yields
    /// nothing rather than every position.
    pub fn lookup(&self, pattern: &[u8], limit: Option<usize>) -> Vec<usize> {
        if pattern.is_empty() || limit == Some(0) {
            return Vec::new();
        }
        let matches = &self.suffixes[self.lookup_range(pattern)];
        let take = limit.map_or(matches.len(), |n| n.min(matches.len()));
        matches[..take].iter().map(|&i| i as usize).collect()
    }

    /// Borrowed view of the corpus / 语料只读视图
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Range of `suffixes` whose suffix starts with `pattern`
    fn lookup_range(&self, pattern: &[u8]) -> Range<usize> {
        let start = self
            .suffixes
            .partition_point(|&i| self.prefix(i, pattern.len()) < pattern);
        let count = self.suffixes[start..]
            .partition_point(|&i| self.prefix(i, pattern.len()) == pattern);
        start..start + count
    }

    fn prefix(&self, suffix: u32, len: usize) -> &[u8] {
        let start = suffix as usize;
        let end = (start + len).min(self.data.len());
        &self.data[start..end]
    }
}

impl PatternIndex for CorpusIndex {
    fn lookup(&self, pattern: &[u8], limit: Option<usize>) -> Vec<usize> {
        CorpusIndex::lookup(self, pattern, limit)
    }

    fn bytes(&self) -> &[u8] {
        CorpusIndex::bytes(self)
    }
}

/// Prefix doubling: after round k every suffix is ranked by its first 2^k bytes.
/// Stops as soon as all ranks are distinct.
fn build_suffix_array(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sa: Vec<u32> = (0..n as u32).collect();
    let mut rank: Vec<u32> = text.iter().map(|&b| b as u32).collect();
    let mut next = vec![0u32; n];
    let mut k = 1usize;

    loop {
        // 0 sorts a suffix that ends inside the window before any that continues
        let key = |i: u32| -> (u32, u32) {
            let i = i as usize;
            let second = if i + k < n { rank[i + k] + 1 } else { 0 };
            (rank[i], second)
        };

        sa.par_sort_unstable_by_key(|&i| key(i));

        next[sa[0] as usize] = 0;
        for w in 1..n {
            let (prev, cur) = (sa[w - 1], sa[w]);
            next[cur as usize] = next[prev as usize] + u32::from(key(prev) != key(cur));
        }
        std::mem::swap(&mut rank, &mut next);

        if rank[sa[n - 1] as usize] as usize == n - 1 {
            break;
        }
        k *= 2;
    }

    sa
}
