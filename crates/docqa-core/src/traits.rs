use crate::types::{Chunk, ChunkFilter, NewChunk, Turn};

/// Storage collaborator. Holds chunks exclusively; callers only see snapshots.
pub trait ChunkStore: Send + Sync {
    /// Validates `source` on every chunk and stores the batch, returning how many were written.
    fn store_batch(&self, batch: &[NewChunk]) -> anyhow::Result<usize>;
    /// Ordering is stable across calls absent writes.
    fn fetch_chunks(&self, filter: Option<&ChunkFilter>) -> anyhow::Result<Vec<Chunk>>;
    fn count(&self) -> anyhow::Result<usize>;
    /// Bulk delete. Returns the number of chunks removed.
    fn clear(&self) -> anyhow::Result<usize>;
}

/// Opaque answer generator (an LLM behind some API).
pub trait Generator: Send + Sync {
    fn generate(&self, context: &str, question: &str, history: &[Turn]) -> anyhow::Result<String>;
}

/// Text-to-speech output channel.
pub trait SpeechSink: Send + Sync {
    fn speak(&self, text: &str, is_question: bool) -> anyhow::Result<()>;
}
