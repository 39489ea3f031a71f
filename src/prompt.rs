//! Deterministic flattening of retrieval results for LLM prompt injection.
//!
//! Pure formatting: the stated caps are the only filtering applied. The
//! downstream prompt assembler decides where and whether the block is used.

use crate::query::RetrievalResult;

/// Records included in a prompt block.
pub const MAX_PROMPT_RECORDS: usize = 3;

/// Triples included per record.
pub const MAX_PROMPT_TRIPLES: usize = 3;

/// Format the top records with default caps.
pub fn format_for_prompt(results: &[RetrievalResult]) -> String {
    format_for_prompt_with(results, MAX_PROMPT_RECORDS, MAX_PROMPT_TRIPLES)
}

/// Format the top `max_records` records, each with up to `max_triples` of its
/// triples as `subject - label - object` lines under the source sentence.
///
/// Records without triples are skipped entirely; empty input formats to an
/// empty string.
pub fn format_for_prompt_with(
    results: &[RetrievalResult],
    max_records: usize,
    max_triples: usize,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    for result in results.iter().take(max_records) {
        if result.record.triples.is_empty() {
            continue;
        }
        lines.push(format!("相关知识: {}", result.record.sentence));
        for triple in result.record.triples.iter().take(max_triples) {
            if triple.subject.is_empty() || triple.object.is_empty() || triple.label.is_empty() {
                continue;
            }
            lines.push(format!(
                "  {} - {} - {}",
                triple.subject, triple.label, triple.object
            ));
        }
    }

    lines.join("\n")
}
