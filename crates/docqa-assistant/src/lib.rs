//! docqa-assistant
//!
//! Ties the chunk store, the keyword ranker, the answer generators and the
//! segmenter together behind one per-process [`AssistantContext`].

pub mod assistant;
pub mod commands;
pub mod context;
pub mod conversation;

pub use assistant::{AnswerOutcome, AnswerReport, Assistant, VoiceAction};
pub use commands::{classify_command, VoiceCommand};
pub use context::AssistantContext;
pub use conversation::Conversation;
