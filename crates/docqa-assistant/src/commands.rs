/// What a spoken utterance asks the assistant to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    Upload,
    Clear,
    Exit,
    Query,
}

const UPLOAD_KEYWORDS: &[&str] = &["upload", "add document", "process file", "load pdf", "add pdf", "upload document"];
const CLEAR_KEYWORDS: &[&str] = &["clear documents", "reset database", "delete documents"];
const EXIT_KEYWORDS: &[&str] = &["exit", "stop", "quit", "end"];

fn mentions(utterance: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| utterance.contains(k))
}

/// Case-insensitive keyword match, checked upload, clear, exit; anything else is a question.
pub fn classify_command(utterance: &str) -> VoiceCommand {
    let utterance = utterance.to_lowercase();
    if mentions(&utterance, UPLOAD_KEYWORDS) {
        VoiceCommand::Upload
    } else if mentions(&utterance, CLEAR_KEYWORDS) {
        VoiceCommand::Clear
    } else if mentions(&utterance, EXIT_KEYWORDS) {
        VoiceCommand::Exit
    } else {
        VoiceCommand::Query
    }
}
