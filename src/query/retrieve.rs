//! Ranked retrieval of supporting records by entity overlap.

use std::collections::HashMap;

use serde::Serialize;

use crate::corpus::Record;
use crate::index::KnowledgeIndex;

/// Maximum records returned by one retrieval.
pub const MAX_RESULTS: usize = 10;

/// One retrieved record with its relevance score: the number of distinct
/// query-candidate entities appearing in the record as subject or object.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalResult {
    #[serde(flatten)]
    pub record: Record,
    pub relevance_score: u32,
}

/// Score and rank records against the resolved entity set.
///
/// Each (entity, record) posting pair contributes one increment; a record
/// matching three distinct candidates scores 3 regardless of how many triples
/// realize each match. Ordering is score descending with record id ascending
/// as the tiebreak, so output is deterministic. Empty input yields empty
/// output, not an error.
pub fn search_by_entities(entities: &[String], index: &KnowledgeIndex) -> Vec<RetrievalResult> {
    let mut scores: HashMap<u32, u32> = HashMap::new();
    for entity in entities {
        if let Some(postings) = index.entity_postings(entity) {
            for &id in postings {
                *scores.entry(id).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(u32, u32)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(MAX_RESULTS);

    ranked
        .into_iter()
        .filter_map(|(id, score)| {
            index.record(id).map(|record| RetrievalResult {
                record: record.clone(),
                relevance_score: score,
            })
        })
        .collect()
}
