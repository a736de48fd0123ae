//! Domain types shared by the ranker, the segmenter and the stores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

pub type ChunkId = u64;

/// Free-form metadata carried alongside `source` (file type, chunk index, ...).
pub type Extra = Map<String, Value>;

/// Chunk metadata with a required `source` and an open extension bag.
///
/// Serializes flat, so `{"source": "a.pdf", "file_type": "pdf"}` round-trips
/// with `file_type` landing in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMeta {
    pub source: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ChunkMeta {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(), extra: Extra::new() }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

impl TryFrom<Extra> for ChunkMeta {
    type Error = Error;

    fn try_from(mut map: Extra) -> Result<Self, Self::Error> {
        match map.remove("source") {
            Some(Value::String(source)) if !source.trim().is_empty() => Ok(Self { source, extra: map }),
            _ => Err(Error::MissingSource),
        }
    }
}

/// A stored unit of source-document text.
///
/// - `id`: assigned by the store on insert
/// - `content`: the text payload
/// - `metadata`: origin of the text, see [`ChunkMeta`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub content: String,
    pub metadata: ChunkMeta,
}

impl Chunk {
    pub fn source(&self) -> &str {
        &self.metadata.source
    }
}

/// A chunk on its way into a store. `source` has not been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewChunk {
    pub content: String,
    #[serde(default)]
    pub metadata: Extra,
}

impl NewChunk {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        let mut metadata = Extra::new();
        metadata.insert("source".to_string(), Value::String(source.into()));
        Self { content: content.into(), metadata }
    }

    pub fn has_source(&self) -> bool {
        matches!(self.metadata.get("source"), Some(Value::String(s)) if !s.trim().is_empty())
    }
}

/// Restricts a fetch to a subset of stored chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkFilter {
    pub source: Option<String>,
}

impl ChunkFilter {
    pub fn source(source: impl Into<String>) -> Self {
        Self { source: Some(source.into()) }
    }

    pub fn matches(&self, chunk: &Chunk) -> bool {
        self.source.as_deref().map_or(true, |s| chunk.source() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

/// One message of conversation history handed to a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn human(text: impl Into<String>) -> Self {
        Self { role: Role::Human, text: text.into() }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self { role: Role::Ai, text: text.into() }
    }
}
