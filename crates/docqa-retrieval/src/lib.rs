//! docqa-retrieval
//!
//! Keyword-fallback ranking of stored chunks and formatting of the ranked
//! chunks into grounding context. See `ranker` for scoring and `format` for
//! the context layout.

pub mod format;
pub mod ranker;
pub mod retrieve;
pub mod tokenize;

pub use docqa_core::config::MatchMode;
pub use format::{format_context, group_by_source, SourceGroup};
pub use ranker::{rank, rank_with, Ranking, ScoredChunk};
pub use retrieve::{retrieve, Retrieval, NO_DOCUMENTS_MESSAGE};
