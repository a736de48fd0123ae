//! docqa-segment
//!
//! Response segmentation for differentiated display and speech output.

pub mod segmenter;
pub mod speech;

pub use segmenter::{segment, Segment, SegmentKind};
pub use speech::{clean_for_speech, displayable, speakable, ClosingRemarks, VoiceReply};
