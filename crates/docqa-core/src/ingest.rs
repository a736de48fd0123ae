use serde_json::Value;
use tracing::{info, warn};

use crate::traits::ChunkStore;
use crate::types::NewChunk;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngestMode {
    #[default]
    Append,
    /// Clear the store before writing.
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub stored: usize,
    pub batches: usize,
    pub cleared: usize,
}

/// Stamps `chunk_index` on every chunk and fills in `unknown_source_<i>` where
/// the loader produced no source, so the store boundary never rejects them.
pub fn prepare(mut chunks: Vec<NewChunk>) -> Vec<NewChunk> {
    for (i, chunk) in chunks.iter_mut().enumerate() {
        if !chunk.has_source() {
            chunk.metadata.insert("source".to_string(), Value::String(format!("unknown_source_{i}")));
        }
        chunk.metadata.insert("chunk_index".to_string(), Value::from(i));
    }
    chunks
}

pub struct Ingestor<'a> {
    store: &'a dyn ChunkStore,
    batch_size: usize,
}

impl<'a> Ingestor<'a> {
    pub fn new(store: &'a dyn ChunkStore, batch_size: usize) -> Self {
        Self { store, batch_size: batch_size.max(1) }
    }

    pub fn ingest(&self, chunks: Vec<NewChunk>, mode: IngestMode) -> anyhow::Result<IngestReport> {
        let mut report = IngestReport::default();
        if mode == IngestMode::Replace {
            // A failed clear is reported but does not stop the upload.
            match self.store.clear() {
                Ok(n) => report.cleared = n,
                Err(e) => warn!(error = %e, "failed to clear existing documents"),
            }
        }

        let chunks = prepare(chunks);
        let total_batches = chunks.len().div_ceil(self.batch_size);
        for (i, batch) in chunks.chunks(self.batch_size).enumerate() {
            info!(batch = i + 1, total_batches, size = batch.len(), "storing batch");
            report.stored += self.store.store_batch(batch)?;
            report.batches += 1;
        }
        info!(stored = report.stored, "ingest complete");
        Ok(report)
    }
}
