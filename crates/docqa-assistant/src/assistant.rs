//! Question answering over the chunk store.
//!
//! One call walks a small state machine: count documents, fetch a snapshot,
//! try the primary generator with the focused context, and on failure try the
//! fallback generator once with the broad context. Every path ends in an
//! [`AnswerOutcome`]; nothing here returns an error for collaborator failures.

use tracing::{error, info, warn};

use docqa_core::types::{Chunk, Turn};
use docqa_retrieval::retrieve;
use docqa_segment::{ClosingRemarks, VoiceReply};

use crate::commands::{classify_command, VoiceCommand};
use crate::context::AssistantContext;
use crate::conversation::Conversation;

pub const NO_DOCUMENTS_REPLY: &str = "I don't have any documents to search through. Please upload documents first.";
pub const GENERIC_ERROR_REPLY: &str =
    "I encountered an error while trying to answer your question. Please try again or check the logs.";
pub const UPLOAD_REPLY: &str = "Please add your files with the ingest command, then ask your question again.";
pub const STOPPED_REPLY: &str = "Voice assistant stopped. You can start it again anytime.";

/// Marker a grounded model uses when the context lacks the answer.
const NOT_IN_DOCUMENTS: &str = "I don't have";
/// Below this many stored chunks an answer is likely drawing on outside knowledge.
const SPARSE_CORPUS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The store is empty; no generator was called.
    NoDocuments { message: String },
    Succeeded { answer: String },
    /// The primary generator failed and the fallback answered.
    Degraded { answer: String, primary_error: String },
    Failed { reason: String },
}

impl AnswerOutcome {
    /// Text to show the user.
    pub fn reply(&self) -> &str {
        match self {
            AnswerOutcome::NoDocuments { message } => message,
            AnswerOutcome::Succeeded { answer } | AnswerOutcome::Degraded { answer, .. } => answer,
            AnswerOutcome::Failed { .. } => GENERIC_ERROR_REPLY,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            AnswerOutcome::Succeeded { answer } | AnswerOutcome::Degraded { answer, .. } => Some(answer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReport {
    pub outcome: AnswerOutcome,
    /// The answer did not say it lacked information, yet very few chunks are stored.
    pub ungrounded_warning: bool,
}

impl AnswerReport {
    fn plain(outcome: AnswerOutcome) -> Self {
        Self { outcome, ungrounded_warning: false }
    }
}

/// What a voice utterance resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceAction {
    Upload { message: &'static str },
    Cleared { removed: usize },
    Exit { message: &'static str },
    Answered(AnswerReport),
}

pub struct Assistant<'a> {
    ctx: &'a AssistantContext,
}

impl<'a> Assistant<'a> {
    pub fn new(ctx: &'a AssistantContext) -> Self { Self { ctx } }

    pub fn answer(&self, question: &str, history: &[Turn]) -> AnswerReport {
        match self.ctx.store.count() {
            Ok(0) => return AnswerReport::plain(no_documents()),
            Ok(count) => info!(count, "document chunks available"),
            // The fetch below decides; a failed count alone does not stop the query.
            Err(e) => warn!(error = %e, "failed to count documents"),
        }
        let chunks = match self.ctx.store.fetch_chunks(None) {
            Ok(chunks) => chunks,
            Err(e) => {
                error!(error = %e, "failed to fetch chunks");
                return AnswerReport::plain(AnswerOutcome::Failed { reason: format!("fetch failed: {e}") });
            }
        };
        if chunks.is_empty() {
            return AnswerReport::plain(no_documents());
        }

        let outcome = self.generate(question, history, &chunks);
        let ungrounded_warning = outcome
            .answer()
            .is_some_and(|a| !a.contains(NOT_IN_DOCUMENTS) && chunks.len() < SPARSE_CORPUS);
        if ungrounded_warning {
            warn!(chunks = chunks.len(), "answer may rely on information outside the documents");
        }
        AnswerReport { outcome, ungrounded_warning }
    }

    fn generate(&self, question: &str, history: &[Turn], chunks: &[Chunk]) -> AnswerOutcome {
        let retrieval = &self.ctx.settings.retrieval;
        let focused = retrieve(question, chunks, retrieval.focus_limit, retrieval.match_mode);
        let primary_error = match self.ctx.primary.generate(focused.tool_output(), question, history) {
            Ok(answer) => {
                info!("primary generator answered");
                return AnswerOutcome::Succeeded { answer };
            }
            Err(e) => {
                warn!(error = %e, "primary generator failed, falling back to direct retrieval");
                e.to_string()
            }
        };

        // The direct path answers from the broad gather alone, without history.
        let broad = retrieve(question, chunks, retrieval.gather_limit, retrieval.match_mode);
        match self.ctx.fallback.generate(broad.tool_output(), question, &[]) {
            Ok(answer) => {
                info!("fallback generator answered");
                AnswerOutcome::Degraded { answer, primary_error }
            }
            Err(e) => {
                error!(error = %e, "fallback generator failed");
                AnswerOutcome::Failed { reason: format!("primary: {primary_error}; fallback: {e}") }
            }
        }
    }

    /// Answers with the conversation so far as history, then records both turns.
    pub fn ask(&self, conversation: &mut Conversation, question: &str) -> AnswerReport {
        let report = self.answer(question, conversation.turns());
        conversation.push_user(question);
        conversation.push_assistant(report.outcome.reply());
        report
    }

    pub fn handle_utterance(&self, conversation: &mut Conversation, utterance: &str) -> anyhow::Result<VoiceAction> {
        match classify_command(utterance) {
            VoiceCommand::Upload => {
                conversation.push_user(utterance);
                conversation.push_assistant(UPLOAD_REPLY);
                Ok(VoiceAction::Upload { message: UPLOAD_REPLY })
            }
            VoiceCommand::Clear => {
                let removed = self.ctx.store.clear()?;
                info!(removed, "documents cleared by voice command");
                conversation.push_user(utterance);
                conversation.push_assistant("All documents cleared.");
                Ok(VoiceAction::Cleared { removed })
            }
            VoiceCommand::Exit => Ok(VoiceAction::Exit { message: STOPPED_REPLY }),
            VoiceCommand::Query => Ok(VoiceAction::Answered(self.ask(conversation, utterance))),
        }
    }

    /// Display and speech views of a report. Only real answers get closing remarks.
    pub fn voice_reply(&self, report: &AnswerReport, for_voice_only: bool) -> VoiceReply {
        let remarks = match &report.outcome {
            AnswerOutcome::Succeeded { .. } | AnswerOutcome::Degraded { .. } if self.ctx.settings.voice.closing_remarks => {
                Some(if for_voice_only { ClosingRemarks::voice() } else { ClosingRemarks::chat() })
            }
            _ => None,
        };
        VoiceReply::build(report.outcome.reply(), for_voice_only, remarks.as_ref())
    }
}

fn no_documents() -> AnswerOutcome {
    info!("no documents stored, skipping generation");
    AnswerOutcome::NoDocuments { message: NO_DOCUMENTS_REPLY.to_string() }
}
