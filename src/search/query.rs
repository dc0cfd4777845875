//! Query resolver - turns a raw query into ordered context snippets / 查询解析
//!
//! Pipeline / 流程：
//! - validate: trim and enforce the minimum length / 校验查询长度
//! - derive_variants: literal, lower, upper, title case / 生成大小写变体
//! - resolve_offsets: lookup per distinct variant, merge, sort, dedup / 合并偏移
//! - extract_snippet: clamped window around each hit / 截取上下文片段

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::SearchError;
use super::suffix_array::{CorpusIndex, PatternIndex};

/// Search settings / 搜索设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Bytes of context on each side of a hit / 命中两侧的上下文字节数
    pub context_bytes: usize,
    /// Minimum query length in bytes after trimming / 最小查询长度（字节）
    pub min_query_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            context_bytes: 50,
            min_query_len: 2,
        }
    }
}

/// One context window around a hit / 命中位置的上下文片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Byte offset of the hit in the corpus / 命中在语料中的字节偏移
    pub offset: usize,
    /// Window text, invalid UTF-8 replaced / 片段文本
    pub text: String,
}

/// Trim and check the minimum length / 去除空白并检查最小长度
pub fn validate(raw: &str, min_len: usize) -> Result<&str, SearchError> {
    let query = raw.trim();
    if query.len() < min_len {
        return Err(SearchError::BadQuery { min_len });
    }
    Ok(query)
}

/// Capitalize every letter that starts a word / 单词首字母大写
///
/// A word starts after whitespace or ASCII punctuation, so `don't` becomes
/// `Don'T`. Letters and digits never start a new word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_boundary = true;
    for c in text.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = is_word_separator(c);
    }
    out
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

/// Case variants of a query, duplicates removed, first-seen order kept / 生成去重后的大小写变体
pub fn derive_variants(query: &str) -> Vec<String> {
    let lower = query.to_lowercase();
    let candidates = [
        query.to_string(),
        lower.clone(),
        query.to_uppercase(),
        title_case(&lower),
    ];

    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut variants = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        if !candidate.is_empty() && seen.insert(candidate.as_str()) {
            variants.push(candidate.clone());
        }
    }
    variants
}

/// Merged ascending offsets of every variant / 合并所有变体的命中偏移（升序去重）
pub fn resolve_offsets<I>(index: &I, variants: &[String]) -> Vec<usize>
where
    I: PatternIndex + ?Sized,
{
    let mut offsets = Vec::new();
    for variant in variants.iter().filter(|v| !v.is_empty()) {
        offsets.extend(index.lookup(variant.as_bytes(), None));
    }
    offsets.par_sort_unstable();
    offsets.dedup();
    offsets
}

/// Window `[offset - half_width, offset + half_width)` clamped to the corpus / 截取片段
pub fn extract_snippet(corpus: &[u8], offset: usize, half_width: usize) -> Snippet {
    let start = offset.saturating_sub(half_width).min(corpus.len());
    let end = offset.saturating_add(half_width).min(corpus.len());
    Snippet {
        offset,
        text: String::from_utf8_lossy(&corpus[start..end]).into_owned(),
    }
}

/// Search entry point over a shared index / 基于共享索引的搜索入口
pub struct Searcher<I: PatternIndex = CorpusIndex> {
    index: Arc<I>,
    settings: SearchSettings,
}

impl<I: PatternIndex> Searcher<I> {
    pub fn new(index: Arc<I>, settings: SearchSettings) -> Self {
        Self { index, settings }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Full pipeline; no matches is an empty vector, not an error / 完整搜索流程
    pub fn search(&self, raw: &str) -> Result<Vec<Snippet>, SearchError> {
        let query = validate(raw, self.settings.min_query_len)?;
        let variants = derive_variants(query);
        let offsets = resolve_offsets(self.index.as_ref(), &variants);

        tracing::debug!(
            "Search {:?}: {} variants, {} hits",
            query,
            variants.len(),
            offsets.len()
        );

        let corpus = self.index.bytes();
        Ok(offsets
            .into_iter()
            .map(|offset| extract_snippet(corpus, offset, self.settings.context_bytes))
            .collect())
    }
}
