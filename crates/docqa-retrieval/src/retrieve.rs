use tracing::debug;

use docqa_core::config::MatchMode;
use docqa_core::types::Chunk;

use crate::format::{format_context, group_by_source};
use crate::ranker::rank_with;

pub const NO_DOCUMENTS_MESSAGE: &str = "No documents found in the database. Please upload documents first.";

/// Result of the document-retrieval tool: ranked chunks plus the context text built from them.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval<'a> {
	NoDocuments,
	Found {
		context: String,
		chunks: Vec<&'a Chunk>,
		/// No keyword matched; `chunks` are simply the first ones stored.
		degraded: bool,
	},
}

impl Retrieval<'_> {
	/// Text handed back to the model in place of a tool result.
	pub fn tool_output(&self) -> &str {
		match self {
			Retrieval::NoDocuments => NO_DOCUMENTS_MESSAGE,
			Retrieval::Found { context, .. } => context,
		}
	}

	pub fn is_empty_corpus(&self) -> bool { matches!(self, Retrieval::NoDocuments) }
}

pub fn retrieve<'a>(query: &str, chunks: &'a [Chunk], limit: usize, mode: MatchMode) -> Retrieval<'a> {
	let ranking = rank_with(query, chunks, limit, mode);
	if ranking.is_empty_corpus() {
		debug!("no documents in corpus");
		return Retrieval::NoDocuments;
	}
	let selected = ranking.chunks();
	let groups = group_by_source(selected.iter().copied());
	debug!(
		corpus = chunks.len(),
		retrieved = selected.len(),
		sources = groups.len(),
		degraded = ranking.is_degraded(),
		"keyword retrieval"
	);
	Retrieval::Found { context: format_context(&groups), chunks: selected, degraded: ranking.is_degraded() }
}
