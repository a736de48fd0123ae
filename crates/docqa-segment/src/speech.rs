//! Display and speech views over segmenter output.

use docqa_core::traits::SpeechSink;
use tracing::debug;

use crate::segmenter::{segment, Segment, SegmentKind};

pub const CODE_REMARK: &str = "I shared some code. Try running it and let me know how it goes!";
pub const FOLLOW_UP: &str = "Does that make sense? Ready for another question?";
pub const VOICE_PLACEHOLDER: &str = "Explained via voice. See code or key points below if any.";

const UNSPOKEN: &[char] = &['*', '-', '#', '[', ']', '(', ')'];

/// Drops markdown-ish punctuation and collapses whitespace.
pub fn clean_for_speech(text: &str) -> String {
    text.replace(UNSPOKEN, "").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Segments to show on screen. A voice-only session shows nothing but code.
pub fn displayable(segments: &[Segment], for_voice_only: bool) -> Vec<Segment> {
    segments
        .iter()
        .filter(|s| !for_voice_only || s.is_code())
        .cloned()
        .collect()
}

/// Segments to read aloud, cleaned for speech. A voice-only session speaks everything except code.
pub fn speakable(segments: &[Segment], for_voice_only: bool) -> Vec<Segment> {
    segments
        .iter()
        .filter(|s| !for_voice_only || s.kind != SegmentKind::Code)
        .map(|s| Segment::new(s.kind, clean_for_speech(&s.content)))
        .collect()
}

/// Remarks appended after the natural spoken segments. Never touches segmenter output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingRemarks {
    pub code_remark: String,
    pub follow_up: Option<String>,
}

impl ClosingRemarks {
    /// Code remark only.
    pub fn chat() -> Self {
        Self { code_remark: CODE_REMARK.to_string(), follow_up: None }
    }

    /// Code remark plus the follow-up question asked after every voice answer.
    pub fn voice() -> Self {
        Self { code_remark: CODE_REMARK.to_string(), follow_up: Some(FOLLOW_UP.to_string()) }
    }

    pub fn decorate(&self, segments: &[Segment], spoken: Vec<Segment>) -> Vec<Segment> {
        let mut spoken = spoken;
        if segments.iter().any(Segment::is_code) {
            spoken.push(Segment::text(self.code_remark.clone()));
        }
        if let Some(follow_up) = &self.follow_up {
            spoken.push(Segment::question(follow_up.clone()));
        }
        spoken
    }
}

/// Everything a front-end needs to render and speak one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceReply {
    pub display: Vec<Segment>,
    pub spoken: Vec<Segment>,
    for_voice_only: bool,
}

impl VoiceReply {
    pub fn build(answer: &str, for_voice_only: bool, remarks: Option<&ClosingRemarks>) -> Self {
        let segments = segment(answer);
        let spoken = speakable(&segments, for_voice_only);
        let spoken = match remarks {
            Some(r) => r.decorate(&segments, spoken),
            None => spoken,
        };
        Self { display: displayable(&segments, for_voice_only), spoken, for_voice_only }
    }

    pub fn has_code(&self) -> bool {
        self.display.iter().any(Segment::is_code)
    }

    /// Shown instead of an empty assistant bubble in voice-only sessions.
    pub fn placeholder(&self) -> Option<&'static str> {
        (self.for_voice_only && self.display.is_empty()).then_some(VOICE_PLACEHOLDER)
    }

    pub fn dispatch(&self, sink: &dyn SpeechSink) -> anyhow::Result<()> {
        for s in &self.spoken {
            debug!(kind = ?s.kind, "speaking segment");
            sink.speak(&s.content, s.kind == SegmentKind::Question)?;
        }
        Ok(())
    }
}
