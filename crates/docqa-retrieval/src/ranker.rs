//! Keyword ranking over a snapshot of stored chunks.
//!
//! Used when semantic similarity search is unavailable. Scores are plain
//! occurrence counts, so ranking is a pure function of its inputs.

use std::collections::HashMap;

use docqa_core::config::MatchMode;
use docqa_core::types::Chunk;

use crate::tokenize::{word_analyzer, words};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk<'a> {
	pub chunk: &'a Chunk,
	pub score: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ranking<'a> {
	/// The collection was empty; there is nothing to ground an answer on.
	EmptyCorpus,
	/// At least one chunk matched; only positive scores, best first.
	Matched(Vec<ScoredChunk<'a>>),
	/// Nothing matched; the first `limit` chunks in storage order.
	Unmatched(Vec<ScoredChunk<'a>>),
}

impl<'a> Ranking<'a> {
	pub fn scored(&self) -> &[ScoredChunk<'a>] {
		match self {
			Ranking::EmptyCorpus => &[],
			Ranking::Matched(s) | Ranking::Unmatched(s) => s,
		}
	}

	pub fn chunks(&self) -> Vec<&'a Chunk> {
		self.scored().iter().map(|s| s.chunk).collect()
	}

	pub fn is_empty_corpus(&self) -> bool { matches!(self, Ranking::EmptyCorpus) }

	pub fn is_degraded(&self) -> bool { matches!(self, Ranking::Unmatched(_)) }
}

/// Lower-cased query tokens for the given mode.
pub fn query_tokens(query: &str, mode: MatchMode) -> Vec<String> {
	match mode {
		MatchMode::Substring => query.split_whitespace().map(str::to_lowercase).collect(),
		MatchMode::WholeToken => words(&mut word_analyzer(), query),
	}
}

/// Sum over tokens of their occurrences in `content`. Repeated query tokens count again.
pub fn score(tokens: &[String], content: &str, mode: MatchMode) -> usize {
	if tokens.is_empty() { return 0; }
	match mode {
		MatchMode::Substring => {
			let content = content.to_lowercase();
			tokens.iter().map(|t| content.matches(t.as_str()).count()).sum()
		}
		MatchMode::WholeToken => {
			let mut counts: HashMap<String, usize> = HashMap::new();
			for w in words(&mut word_analyzer(), content) { *counts.entry(w).or_default() += 1; }
			tokens.iter().map(|t| counts.get(t).copied().unwrap_or(0)).sum()
		}
	}
}

/// Substring-mode ranking.
pub fn rank<'a>(query: &str, chunks: &'a [Chunk], limit: usize) -> Ranking<'a> {
	rank_with(query, chunks, limit, MatchMode::Substring)
}

pub fn rank_with<'a>(query: &str, chunks: &'a [Chunk], limit: usize, mode: MatchMode) -> Ranking<'a> {
	if chunks.is_empty() { return Ranking::EmptyCorpus; }
	let tokens = query_tokens(query, mode);
	let mut scored: Vec<ScoredChunk<'a>> = chunks
		.iter()
		.map(|chunk| ScoredChunk { chunk, score: score(&tokens, &chunk.content, mode) })
		.filter(|s| s.score > 0)
		.collect();
	if scored.is_empty() {
		return Ranking::Unmatched(chunks.iter().take(limit).map(|chunk| ScoredChunk { chunk, score: 0 }).collect());
	}
	// sort_by is stable: equal scores keep storage order
	scored.sort_by(|a, b| b.score.cmp(&a.score));
	scored.truncate(limit);
	Ranking::Matched(scored)
}
