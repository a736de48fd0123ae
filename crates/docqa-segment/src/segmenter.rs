//! Splits a generated answer into typed segments.
//!
//! Code and code-explanation spans are cut out first in a single left-to-right
//! scan; everything between them is prose, which is split into numbered list
//! items and then into sentences. Malformed markup never fails: an opener
//! without a closer is simply left in the prose.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const CODE_OPEN: &str = "<CODE>";
pub const CODE_CLOSE: &str = "</CODE>";
pub const EXPLANATION_OPEN: &str = "<CODE_EXPLANATION>";
pub const EXPLANATION_CLOSE: &str = "</CODE_EXPLANATION>";

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.\s+([^\n]+)").expect("list item pattern"));

/// Terminal punctuation followed by whitespace; the sentence ends after the punctuation.
static SENTENCE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence break pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Text,
    List,
    Question,
    Code,
    CodeExplanation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self { kind, content: content.into() }
    }

    pub fn text(content: impl Into<String>) -> Self { Self::new(SegmentKind::Text, content) }

    pub fn question(content: impl Into<String>) -> Self { Self::new(SegmentKind::Question, content) }

    pub fn is_code(&self) -> bool { self.kind == SegmentKind::Code }
}

#[derive(Debug, Clone, Copy)]
struct Span<'a> {
    start: usize,
    end: usize,
    body: &'a str,
}

/// First complete `open ... close` span at or after `from`.
fn find_span<'a>(text: &'a str, from: usize, open: &str, close: &str) -> Option<Span<'a>> {
    let start = from + text[from..].find(open)?;
    let body_start = start + open.len();
    let body_end = body_start + text[body_start..].find(close)?;
    Some(Span { start, end: body_end + close.len(), body: &text[body_start..body_end] })
}

pub fn segment(answer: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < answer.len() {
        let code = find_span(answer, pos, CODE_OPEN, CODE_CLOSE);
        let explanation = find_span(answer, pos, EXPLANATION_OPEN, EXPLANATION_CLOSE);
        let next = match (code, explanation) {
            (Some(c), Some(e)) if e.start < c.start => Some((SegmentKind::CodeExplanation, e)),
            (Some(c), _) => Some((SegmentKind::Code, c)),
            (None, Some(e)) => Some((SegmentKind::CodeExplanation, e)),
            (None, None) => None,
        };
        let Some((kind, span)) = next else {
            split_prose(&answer[pos..], &mut out);
            break;
        };
        split_prose(&answer[pos..span.start], &mut out);
        out.push(Segment::new(kind, span.body));
        pos = span.end;
    }
    out
}

/// Numbered list items first, then sentences in the text around them.
fn split_prose(text: &str, out: &mut Vec<Segment>) {
    let mut last = 0;
    for caps in LIST_ITEM_RE.captures_iter(text) {
        let (Some(whole), Some(number), Some(item)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        split_sentences(&text[last..whole.start()], out);
        out.push(Segment::new(SegmentKind::List, spoken_list_item(number.as_str(), item.as_str())));
        last = whole.end();
    }
    split_sentences(&text[last..], out);
}

fn spoken_list_item(number: &str, item: &str) -> String {
    format!("Point {}, {}", number, item.trim())
}

fn split_sentences(text: &str, out: &mut Vec<Segment>) {
    let mut last = 0;
    for m in SENTENCE_BREAK_RE.find_iter(text) {
        push_sentence(&text[last..=m.start()], out);
        last = m.end();
    }
    push_sentence(&text[last..], out);
}

fn push_sentence(sentence: &str, out: &mut Vec<Segment>) {
    let sentence = sentence.trim();
    if sentence.is_empty() {
        return;
    }
    let kind = if sentence.ends_with('?') { SegmentKind::Question } else { SegmentKind::Text };
    out.push(Segment::new(kind, sentence));
}
