//! Chunk stores used when no hosted vector database is configured.
//!
//! Both stores validate `source` at insert time, assign ids from 1 upward and
//! return chunks in insertion order, which keeps keyword ranking deterministic.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::Error;
use crate::traits::ChunkStore;
use crate::types::{Chunk, ChunkFilter, ChunkId, ChunkMeta, NewChunk};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Rows {
    next_id: ChunkId,
    chunks: Vec<Chunk>,
}

impl Rows {
    /// All-or-nothing: a single chunk without a source rejects the batch.
    fn insert(&mut self, batch: &[NewChunk]) -> crate::error::Result<usize> {
        let metas = batch
            .iter()
            .map(|c| ChunkMeta::try_from(c.metadata.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        for (new, metadata) in batch.iter().zip(metas) {
            self.next_id += 1;
            self.chunks.push(Chunk { id: self.next_id, content: new.content.clone(), metadata });
        }
        Ok(batch.len())
    }

    fn select(&self, filter: Option<&ChunkFilter>) -> Vec<Chunk> {
        match filter {
            Some(f) => self.chunks.iter().filter(|c| f.matches(c)).cloned().collect(),
            None => self.chunks.clone(),
        }
    }

    fn clear(&mut self) -> usize {
        let removed = self.chunks.len();
        self.chunks.clear();
        removed
    }
}

fn poisoned() -> Error {
    Error::Store("store lock poisoned".to_string())
}

#[derive(Default)]
pub struct MemoryChunkStore {
    rows: RwLock<Rows>,
}

impl MemoryChunkStore {
    pub fn new() -> Self { Self::default() }
}

impl ChunkStore for MemoryChunkStore {
    fn store_batch(&self, batch: &[NewChunk]) -> anyhow::Result<usize> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        Ok(rows.insert(batch)?)
    }

    fn fetch_chunks(&self, filter: Option<&ChunkFilter>) -> anyhow::Result<Vec<Chunk>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.select(filter))
    }

    fn count(&self) -> anyhow::Result<usize> {
        Ok(self.rows.read().map_err(|_| poisoned())?.chunks.len())
    }

    fn clear(&self) -> anyhow::Result<usize> {
        Ok(self.rows.write().map_err(|_| poisoned())?.clear())
    }
}

/// Same rows as [`MemoryChunkStore`], persisted to a JSON file on every write.
pub struct JsonChunkStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonChunkStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> anyhow::Result<Rows> {
        if !self.path.exists() {
            return Ok(Rows::default());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading chunk store {}", self.path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing chunk store {}", self.path.display()))
    }

    fn write(&self, rows: &Rows) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(rows)?;
        fs::write(&self.path, json).with_context(|| format!("writing chunk store {}", self.path.display()))?;
        debug!(path = %self.path.display(), chunks = rows.chunks.len(), "chunk store saved");
        Ok(())
    }
}

impl ChunkStore for JsonChunkStore {
    fn store_batch(&self, batch: &[NewChunk]) -> anyhow::Result<usize> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut rows = self.read()?;
        let stored = rows.insert(batch)?;
        self.write(&rows)?;
        Ok(stored)
    }

    fn fetch_chunks(&self, filter: Option<&ChunkFilter>) -> anyhow::Result<Vec<Chunk>> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        Ok(self.read()?.select(filter))
    }

    fn count(&self) -> anyhow::Result<usize> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        Ok(self.read()?.chunks.len())
    }

    fn clear(&self) -> anyhow::Result<usize> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut rows = self.read()?;
        let removed = rows.clear();
        self.write(&rows)?;
        info!(removed, "cleared chunk store");
        Ok(removed)
    }
}
