use std::env;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use docqa_assistant::{AnswerOutcome, Assistant, AssistantContext};
use docqa_core::config::{Config, Settings};
use docqa_core::ingest::{IngestMode, Ingestor};
use docqa_core::loader::load_text_documents;
use docqa_core::store::JsonChunkStore;
use docqa_core::traits::{ChunkStore, Generator, SpeechSink};
use docqa_core::types::Turn;
use docqa_retrieval::{retrieve, Retrieval};
use docqa_segment::{segment, VoiceReply};

const USAGE: &str = "Usage: docqa <ingest [dir] [--replace] | count | clear | context \"<query>\" | ask \"<question>\" [--voice] | segment [file] [--voice]>";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    args.remove(0);
    if args.is_empty() { eprintln!("{}", USAGE); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

fn required_arg(args: &[String], what: &str) -> String {
    args.first().cloned().unwrap_or_else(|| {
        eprintln!("Missing {}.\n{}", what, USAGE);
        std::process::exit(1)
    })
}

/// Offline stand-in for a hosted model: answers with the best-ranked excerpt.
struct ExcerptGenerator;

impl Generator for ExcerptGenerator {
    fn generate(&self, context: &str, _question: &str, _history: &[Turn]) -> anyhow::Result<String> {
        let excerpt = context
            .split_once("### Excerpt 1:\n")
            .map(|(_, rest)| rest.split("\n\n").next().unwrap_or(rest).trim());
        Ok(match excerpt {
            Some(text) if !text.is_empty() => format!("Based on your uploaded documents: {}", text),
            _ => "I don't have that information in my documents.".to_string(),
        })
    }
}

struct ConsoleSpeech;

impl SpeechSink for ConsoleSpeech {
    fn speak(&self, text: &str, is_question: bool) -> anyhow::Result<()> {
        println!("🔊 {}{}", if is_question { "(?) " } else { "" }, text);
        Ok(())
    }
}

fn print_reply(reply: &VoiceReply) -> anyhow::Result<()> {
    if let Some(placeholder) = reply.placeholder() { println!("{}", placeholder); }
    for s in &reply.display { println!("{}", serde_json::to_string(s)?); }
    reply.dispatch(&ConsoleSpeech)
}

fn main() -> anyhow::Result<()> {
    docqa_core::logging::init();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings: Settings = config.settings()?;
    let (cmd, mut args) = parse_args();
    let store = JsonChunkStore::open(settings.data.store_path());

    match cmd.as_str() {
        "ingest" => {
            let replace = take_flag(&mut args, "--replace");
            let data_dir = args.first().map(PathBuf::from).unwrap_or_else(|| settings.data.docs_dir());
            println!("Ingesting from {} into {}", data_dir.display(), store.path().display());
            let chunks = load_text_documents(&data_dir)?;
            let mode = if replace { IngestMode::Replace } else { IngestMode::Append };
            let report = Ingestor::new(&store, settings.ingest.batch_size).ingest(chunks, mode)?;
            println!("✅ Ingest complete ({} chunks in {} batches, {} cleared)", report.stored, report.batches, report.cleared);
        }
        "count" => {
            let count = store.count()?;
            if count == 0 {
                println!("⚠️ No documents found in the knowledge base. Run `docqa ingest` first.");
            } else {
                println!("📚 {} document chunks in the knowledge base.", count);
            }
        }
        "clear" => {
            let removed = store.clear()?;
            println!("Cleared {} chunks.", removed);
        }
        "context" => {
            let query = required_arg(&args, "query");
            let chunks = store.fetch_chunks(None)?;
            let retrieval = retrieve(&query, &chunks, settings.retrieval.focus_limit, settings.retrieval.match_mode);
            if let Retrieval::Found { chunks, degraded: true, .. } = &retrieval {
                eprintln!("No keyword matches, showing the first {} chunks", chunks.len());
            }
            println!("{}", retrieval.tool_output());
        }
        "ask" => {
            let voice = take_flag(&mut args, "--voice");
            let question = required_arg(&args, "question");
            let ctx = AssistantContext::new(Box::new(store), Box::new(ExcerptGenerator), Box::new(ExcerptGenerator), settings);
            let assistant = Assistant::new(&ctx);
            let report = assistant.answer(&question, &[]);
            if let AnswerOutcome::Failed { reason } = &report.outcome {
                tracing::error!(%reason, "answer failed");
            }
            if report.ungrounded_warning {
                eprintln!("⚠️ Warning: the answer might use information outside of your documents. Consider adding more documents.");
            }
            if voice {
                print_reply(&assistant.voice_reply(&report, true))?;
            } else {
                println!("{}", report.outcome.reply());
            }
        }
        "segment" => {
            let voice = take_flag(&mut args, "--voice");
            let answer = match args.first() {
                Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            if voice {
                let remarks = settings.voice.closing_remarks.then(docqa_segment::ClosingRemarks::voice);
                print_reply(&VoiceReply::build(&answer, true, remarks.as_ref()))?;
            } else {
                for s in segment(&answer) { println!("{}", serde_json::to_string(&s)?); }
            }
        }
        _ => { eprintln!("Unknown command: {}\n{}", cmd, USAGE); std::process::exit(1); }
    }
    Ok(())
}
