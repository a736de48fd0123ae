use docqa_core::types::Chunk;

/// Ranked chunks sharing one source, in ranked order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceGroup<'a> {
	pub source: &'a str,
	pub chunks: Vec<&'a Chunk>,
}

/// Groups by `metadata.source`, sources ordered by first appearance.
pub fn group_by_source<'a, I>(chunks: I) -> Vec<SourceGroup<'a>>
where
	I: IntoIterator<Item = &'a Chunk>,
{
	let mut groups: Vec<SourceGroup<'a>> = Vec::new();
	for chunk in chunks {
		match groups.iter_mut().find(|g| g.source == chunk.source()) {
			Some(group) => group.chunks.push(chunk),
			None => groups.push(SourceGroup { source: chunk.source(), chunks: vec![chunk] }),
		}
	}
	groups
}

/// Grounding context for the generator: a `## Source:` header per group and
/// one numbered `### Excerpt` block per chunk.
pub fn format_context(groups: &[SourceGroup<'_>]) -> String {
	groups
		.iter()
		.map(|group| {
			let mut text = format!("## Source: {}\n\n", group.source);
			for (i, chunk) in group.chunks.iter().enumerate() {
				text.push_str(&format!("### Excerpt {}:\n{}\n\n", i + 1, chunk.content));
			}
			text
		})
		.collect::<Vec<_>>()
		.join("\n\n")
}
