use std::sync::Mutex;

use docqa_core::traits::SpeechSink;
use docqa_segment::speech::{CODE_REMARK, FOLLOW_UP, VOICE_PLACEHOLDER};
use docqa_segment::{clean_for_speech, displayable, segment, speakable, ClosingRemarks, Segment, SegmentKind, VoiceReply};

fn kinds(segments: &[Segment]) -> Vec<SegmentKind> {
    segments.iter().map(|s| s.kind).collect()
}

fn seg(kind: SegmentKind, content: &str) -> Segment {
    Segment::new(kind, content)
}

#[derive(Default)]
struct RecordingSink {
    said: Mutex<Vec<(String, bool)>>,
}

impl SpeechSink for RecordingSink {
    fn speak(&self, text: &str, is_question: bool) -> anyhow::Result<()> {
        self.said.lock().unwrap().push((text.to_string(), is_question));
        Ok(())
    }
}

#[test]
fn code_span_splits_surrounding_text() {
    let segments = segment("Explain <CODE>print('hi')</CODE> now");
    assert_eq!(
        segments,
        vec![seg(SegmentKind::Text, "Explain"), seg(SegmentKind::Code, "print('hi')"), seg(SegmentKind::Text, "now")]
    );
}

#[test]
fn numbered_items_win_over_sentence_rules() {
    let segments = segment("1. First point\n2. Second point?");
    assert_eq!(
        segments,
        vec![seg(SegmentKind::List, "Point 1, First point"), seg(SegmentKind::List, "Point 2, Second point?")]
    );
}

#[test]
fn unterminated_code_tag_stays_in_text() {
    let segments = segment("Look: <CODE>x = 1");
    assert_eq!(segments, vec![seg(SegmentKind::Text, "Look: <CODE>x = 1")]);

    let segments = segment("Done. <CODE>x = 1");
    assert_eq!(segments, vec![seg(SegmentKind::Text, "Done."), seg(SegmentKind::Text, "<CODE>x = 1")]);
}

#[test]
fn earliest_marker_is_consumed_first() {
    let answer = "Intro. <CODE_EXPLANATION>It adds.</CODE_EXPLANATION><CODE>a + b</CODE>Done!";
    let segments = segment(answer);
    assert_eq!(
        segments,
        vec![
            seg(SegmentKind::Text, "Intro."),
            seg(SegmentKind::CodeExplanation, "It adds."),
            seg(SegmentKind::Code, "a + b"),
            seg(SegmentKind::Text, "Done!"),
        ]
    );
}

#[test]
fn unterminated_code_does_not_hide_later_explanation() {
    let segments = segment("<CODE>oops <CODE_EXPLANATION>why</CODE_EXPLANATION>");
    assert_eq!(kinds(&segments), vec![SegmentKind::Text, SegmentKind::CodeExplanation]);
    assert_eq!(segments[0].content, "<CODE>oops");
}

#[test]
fn code_content_is_kept_verbatim() {
    let segments = segment("<CODE>\nfor i in range(3):\n    print(i)\n</CODE>");
    assert_eq!(segments, vec![seg(SegmentKind::Code, "\nfor i in range(3):\n    print(i)\n")]);
}

#[test]
fn sentences_are_classified_by_terminal_mark() {
    let segments = segment("Rust is fast. Is it safe?  Yes!\n\nGreat");
    assert_eq!(
        segments,
        vec![
            seg(SegmentKind::Text, "Rust is fast."),
            seg(SegmentKind::Question, "Is it safe?"),
            seg(SegmentKind::Text, "Yes!"),
            seg(SegmentKind::Text, "Great"),
        ]
    );
}

#[test]
fn text_around_list_items_is_split_into_sentences() {
    let segments = segment("Steps follow. Ready?\n1. Install it\n2. Run it\nThat is all.");
    assert_eq!(
        segments,
        vec![
            seg(SegmentKind::Text, "Steps follow."),
            seg(SegmentKind::Question, "Ready?"),
            seg(SegmentKind::List, "Point 1, Install it"),
            seg(SegmentKind::List, "Point 2, Run it"),
            seg(SegmentKind::Text, "That is all."),
        ]
    );
}

#[test]
fn plain_answers_reconstruct_modulo_whitespace() {
    let answer = "Ownership moves values.  Borrowing   lends them! Does that help?";
    let joined = segment(answer).iter().map(|s| s.content.clone()).collect::<Vec<_>>().join(" ");
    let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(normalize(&joined), normalize(answer));
}

#[test]
fn empty_and_blank_answers_produce_nothing() {
    assert!(segment("").is_empty());
    assert!(segment(" \n\t ").is_empty());
}

#[test]
fn speech_cleaning_strips_markup() {
    assert_eq!(clean_for_speech("**Bold** - see [docs](http://x)  #1"), "Bold see docshttp://x 1");
}

#[test]
fn chat_views_show_and_speak_everything() {
    let segments = segment("Hi. <CODE>x()</CODE>");
    assert_eq!(displayable(&segments, false), segments);
    assert_eq!(kinds(&speakable(&segments, false)), vec![SegmentKind::Text, SegmentKind::Code]);
    assert_eq!(speakable(&segments, false)[1].content, "x");
}

#[test]
fn voice_views_route_prose_to_speech_and_code_to_screen() {
    let segments = segment("**Look** here. <CODE>x()</CODE><CODE_EXPLANATION>Calls x.</CODE_EXPLANATION>");
    let display = displayable(&segments, true);
    assert_eq!(display, vec![seg(SegmentKind::Code, "x()")]);
    let spoken = speakable(&segments, true);
    assert_eq!(spoken, vec![seg(SegmentKind::Text, "Look here."), seg(SegmentKind::CodeExplanation, "Calls x.")]);
}

#[test]
fn closing_remarks_only_mention_code_when_present() {
    let with_code = segment("Try <CODE>x()</CODE>");
    let spoken = ClosingRemarks::chat().decorate(&with_code, speakable(&with_code, true));
    assert_eq!(spoken.last(), Some(&Segment::text(CODE_REMARK)));

    let without_code = segment("Nothing to run.");
    let spoken = ClosingRemarks::chat().decorate(&without_code, speakable(&without_code, true));
    assert_eq!(spoken, vec![seg(SegmentKind::Text, "Nothing to run.")]);

    let spoken = ClosingRemarks::voice().decorate(&with_code, speakable(&with_code, true));
    assert_eq!(kinds(&spoken[spoken.len() - 2..]), vec![SegmentKind::Text, SegmentKind::Question]);
    assert_eq!(spoken.last().unwrap().content, FOLLOW_UP);
}

#[test]
fn voice_reply_dispatches_in_order_and_flags_questions() {
    let reply = VoiceReply::build("Sure. Want more?", true, Some(&ClosingRemarks::voice()));
    assert!(!reply.has_code());
    assert_eq!(reply.placeholder(), Some(VOICE_PLACEHOLDER));

    let sink = RecordingSink::default();
    reply.dispatch(&sink).unwrap();
    let said = sink.said.lock().unwrap().clone();
    assert_eq!(
        said,
        vec![("Sure.".to_string(), false), ("Want more?".to_string(), true), (FOLLOW_UP.to_string(), true)]
    );
}

#[test]
fn chat_reply_has_no_placeholder() {
    let reply = VoiceReply::build("", false, None);
    assert!(reply.display.is_empty());
    assert_eq!(reply.placeholder(), None);
}
