use docqa_core::config::Settings;
use docqa_core::traits::{ChunkStore, Generator};

/// Process-wide collaborators, built once at startup and passed by reference.
pub struct AssistantContext {
    pub store: Box<dyn ChunkStore>,
    /// Tool-calling model that answers from the focused keyword context.
    pub primary: Box<dyn Generator>,
    /// Direct single-shot model tried once when the primary fails.
    pub fallback: Box<dyn Generator>,
    pub settings: Settings,
}

impl AssistantContext {
    pub fn new(store: Box<dyn ChunkStore>, primary: Box<dyn Generator>, fallback: Box<dyn Generator>, settings: Settings) -> Self {
        Self { store, primary, fallback, settings }
    }
}
