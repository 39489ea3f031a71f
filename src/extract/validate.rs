//! Triple validation against the source sentence.
//!
//! The extractor is permissive by design, so validation is the step that
//! separates usable triples from noise: every surviving triple is anchored to
//! the sentence by token spans. Dropping a triple here is expected,
//! high-frequency behavior, never an error.

use tracing::trace;

use crate::corpus::Record;
use crate::tokenize::Segmenter;

/// Longest entity, in tokens, accepted by validation. Guards against
/// mis-extracted whole-paragraph spans.
const MAX_ENTITY_TOKENS: usize = 15;

/// Locate `needle` as a contiguous token sub-sequence of `haystack`,
/// returning the first (leftmost) start index.
fn find_token_span(haystack: &[&str], needle: &[&str]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}

/// Resolve an entity to an inclusive token span within the sentence.
///
/// Prefers exact token alignment; falls back to the `[0, 0]` placeholder when
/// the entity is a literal substring of the sentence but does not align to
/// token boundaries. Returns `None` when the entity cannot be located at all.
fn resolve_span(
    sentence: &str,
    sentence_tokens: &[&str],
    entity_tokens: &[&str],
    entity: &str,
) -> Option<(usize, usize)> {
    match find_token_span(sentence_tokens, entity_tokens) {
        Some(start) => Some((start, start + entity_tokens.len() - 1)),
        None if sentence.contains(entity) => Some((0, 0)),
        None => None,
    }
}

/// Validate one record, returning it with an annotated, possibly shorter
/// triple sequence.
///
/// A triple survives only if both its subject and object segment to between 1
/// and [`MAX_ENTITY_TOKENS`] tokens, occur literally in the sentence, and
/// resolve to a token span (or the placeholder). Idempotent: re-validating an
/// already validated record changes nothing.
pub fn validate(mut record: Record, segmenter: &Segmenter) -> Record {
    let sentence_tokens = segmenter.segment(&record.sentence);

    let triples = std::mem::take(&mut record.triples);
    let mut kept = Vec::with_capacity(triples.len());

    for mut triple in triples {
        let subject_tokens = segmenter.segment(&triple.subject);
        let object_tokens = segmenter.segment(&triple.object);

        if subject_tokens.is_empty() || object_tokens.is_empty() {
            trace!(subject = %triple.subject, object = %triple.object, "dropped: empty segmentation");
            continue;
        }
        if subject_tokens.len() > MAX_ENTITY_TOKENS || object_tokens.len() > MAX_ENTITY_TOKENS {
            trace!(subject = %triple.subject, object = %triple.object, "dropped: entity too long");
            continue;
        }
        if !record.sentence.contains(&triple.subject) || !record.sentence.contains(&triple.object)
        {
            trace!(subject = %triple.subject, object = %triple.object, "dropped: not in sentence");
            continue;
        }

        let Some((sub_start, sub_end)) = resolve_span(
            &record.sentence,
            &sentence_tokens,
            &subject_tokens,
            &triple.subject,
        ) else {
            continue;
        };
        let Some((obj_start, obj_end)) = resolve_span(
            &record.sentence,
            &sentence_tokens,
            &object_tokens,
            &triple.object,
        ) else {
            continue;
        };

        triple.subject_start = Some(sub_start);
        triple.subject_end = Some(sub_end);
        triple.object_start = Some(obj_start);
        triple.object_end = Some(obj_end);
        kept.push(triple);
    }

    record.triples = kept;
    record
}

/// Validate a whole batch of records.
pub fn validate_all(records: Vec<Record>, segmenter: &Segmenter) -> Vec<Record> {
    records
        .into_iter()
        .map(|record| validate(record, segmenter))
        .collect()
}
