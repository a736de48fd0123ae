use docqa_core::types::{Chunk, ChunkMeta};
use docqa_retrieval::{format_context, group_by_source, rank, rank_with, retrieve, MatchMode, Ranking, Retrieval, NO_DOCUMENTS_MESSAGE};

fn chunk(id: u64, source: &str, content: &str) -> Chunk {
    Chunk { id, content: content.to_string(), metadata: ChunkMeta::new(source) }
}

fn ids(ranking: &Ranking<'_>) -> Vec<u64> {
    ranking.chunks().iter().map(|c| c.id).collect()
}

fn corpus() -> Vec<Chunk> {
    vec![
        chunk(1, "intro.pdf", "Welcome to the course."),
        chunk(2, "rust.pdf", "Rust ownership: each value has one owner. Ownership moves."),
        chunk(3, "rust.pdf", "Borrowing lets you reference a value without ownership."),
        chunk(4, "python.txt", "Python uses reference counting."),
        chunk(5, "intro.pdf", "Grading is based on projects."),
    ]
}

#[test]
fn empty_collection_signals_empty_corpus() {
    let ranking = rank("anything", &[], 7);
    assert!(ranking.is_empty_corpus());
    assert!(ranking.chunks().is_empty());
}

#[test]
fn no_keyword_match_falls_back_to_storage_order() {
    let chunks = corpus();
    let ranking = rank("quantum entanglement", &chunks, 3);
    assert!(ranking.is_degraded());
    assert_eq!(ids(&ranking), vec![1, 2, 3]);
    assert!(ranking.scored().iter().all(|s| s.score == 0));
}

#[test]
fn empty_query_has_no_scoring_signal() {
    let chunks = corpus();
    let ranking = rank("   ", &chunks, 10);
    assert!(matches!(ranking, Ranking::Unmatched(_)));
    assert_eq!(ids(&ranking), vec![1, 2, 3, 4, 5]);
}

#[test]
fn higher_scores_rank_first_and_ties_keep_input_order() {
    let chunks = corpus();
    // chunk 2: "ownership" x2 ; chunk 3: "ownership" x1 + "reference" x1 ; chunk 4: "reference" x1
    let ranking = rank("Ownership REFERENCE", &chunks, 10);
    let scored: Vec<(u64, usize)> = ranking.scored().iter().map(|s| (s.chunk.id, s.score)).collect();
    assert_eq!(scored, vec![(2, 2), (3, 2), (4, 1)]);
    assert!(!ranking.is_degraded());
}

#[test]
fn zero_scores_are_excluded_when_something_matches() {
    let chunks = corpus();
    let ranking = rank("python", &chunks, 7);
    assert_eq!(ids(&ranking), vec![4]);
}

#[test]
fn result_never_exceeds_limit() {
    let chunks = corpus();
    for limit in 0..7 {
        let matched = rank("o", &chunks, limit);
        assert!(matched.chunks().len() <= limit);
        let unmatched = rank("zzz", &chunks, limit);
        assert_eq!(unmatched.chunks().len(), limit.min(chunks.len()));
    }
}

#[test]
fn ranking_is_idempotent() {
    let chunks = corpus();
    let first = rank("value ownership", &chunks, 3);
    let second = rank("value ownership", &chunks, 3);
    assert_eq!(first, second);
}

#[test]
fn substring_mode_counts_inside_words() {
    let chunks = vec![chunk(1, "a", "cat bat"), chunk(2, "b", "a dog")];
    let ranking = rank("a", &chunks, 5);
    let scored: Vec<(u64, usize)> = ranking.scored().iter().map(|s| (s.chunk.id, s.score)).collect();
    assert_eq!(scored, vec![(1, 2), (2, 1)]);
}

#[test]
fn whole_token_mode_ignores_partial_words() {
    let chunks = vec![chunk(1, "a", "cat bat"), chunk(2, "b", "A dog, a cat.")];
    let ranking = rank_with("a", &chunks, 5, MatchMode::WholeToken);
    let scored: Vec<(u64, usize)> = ranking.scored().iter().map(|s| (s.chunk.id, s.score)).collect();
    assert_eq!(scored, vec![(2, 2)]);

    let punctuated = rank_with("cat?", &chunks, 5, MatchMode::WholeToken);
    assert_eq!(ids(&punctuated), vec![1, 2]);
}

#[test]
fn groups_follow_first_appearance_of_source() {
    let chunks = corpus();
    let ranking = rank("ownership value reference grading", &chunks, 10);
    let groups = group_by_source(ranking.chunks());
    let layout: Vec<(&str, Vec<u64>)> = groups.iter().map(|g| (g.source, g.chunks.iter().map(|c| c.id).collect())).collect();
    assert_eq!(layout, vec![("rust.pdf", vec![2, 3]), ("python.txt", vec![4]), ("intro.pdf", vec![5])]);
}

#[test]
fn context_numbers_excerpts_per_source() {
    let chunks = vec![chunk(1, "a.txt", "alpha"), chunk(2, "b.txt", "beta"), chunk(3, "a.txt", "gamma")];
    let groups = group_by_source(chunks.iter());
    let expected = "## Source: a.txt\n\n### Excerpt 1:\nalpha\n\n### Excerpt 2:\ngamma\n\n\n\n## Source: b.txt\n\n### Excerpt 1:\nbeta\n\n";
    assert_eq!(format_context(&groups), expected);
    assert_eq!(format_context(&[]), "");
}

#[test]
fn retrieve_reports_missing_documents() {
    let retrieval = retrieve("anything", &[], 7, MatchMode::Substring);
    assert!(retrieval.is_empty_corpus());
    assert_eq!(retrieval.tool_output(), NO_DOCUMENTS_MESSAGE);
}

#[test]
fn retrieve_formats_selected_chunks() {
    let chunks = corpus();
    match retrieve("python", &chunks, 7, MatchMode::Substring) {
        Retrieval::Found { context, chunks, degraded } => {
            assert!(!degraded);
            assert_eq!(chunks.len(), 1);
            assert!(context.starts_with("## Source: python.txt\n\n### Excerpt 1:\nPython uses"));
        }
        Retrieval::NoDocuments => panic!("corpus is not empty"),
    }
}
