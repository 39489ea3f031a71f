//! Entity resolution: map free-form query text to index entity keys.
//!
//! Three passes run on every query, with their union deduplicated in
//! first-seen order: segmented tokens, the whole query string, and a bounded
//! substring scan. The scan caps substrings at ten characters, which bounds
//! worst-case cost at O(len × 10) lookups without any external cancellation.
//! When all three passes come up empty, a keyword fallback scans index keys
//! for ones containing a query token.

use tracing::debug;

use crate::index::KnowledgeIndex;
use crate::tokenize::Segmenter;

use super::validity::is_valid_entity;

/// Maximum substring length (in characters) considered by the scan pass.
const MAX_SUBSTRING_CHARS: usize = 10;

/// Minimum substring length (in characters) considered by the scan pass.
const MIN_SUBSTRING_CHARS: usize = 2;

/// Maximum entities returned by the keyword fallback.
const MAX_KEYWORD_MATCHES: usize = 5;

fn push_unique(found: &mut Vec<String>, candidate: &str) {
    if !found.iter().any(|e| e == candidate) {
        found.push(candidate.to_string());
    }
}

/// Propose candidate entities for `query` against the index.
///
/// The result is deduplicated and deterministic for a fixed corpus and query.
pub fn resolve_entities(
    query: &str,
    index: &KnowledgeIndex,
    segmenter: &Segmenter,
) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    // Pass 1: segmented tokens present as index keys.
    let tokens = segmenter.segment(query);
    for token in &tokens {
        if token.chars().count() > 1 && index.contains_entity(token) && is_valid_entity(token) {
            push_unique(&mut found, token);
        }
    }

    // Pass 2: the whole query as one key.
    if index.contains_entity(query) && is_valid_entity(query) {
        push_unique(&mut found, query);
    }

    // Pass 3: bounded substring scan over character positions.
    let mut offsets: Vec<usize> = query.char_indices().map(|(i, _)| i).collect();
    offsets.push(query.len());
    let char_len = offsets.len() - 1;
    for i in 0..char_len {
        let max_j = (i + MAX_SUBSTRING_CHARS).min(char_len);
        for j in i + MIN_SUBSTRING_CHARS..=max_j {
            let substring = &query[offsets[i]..offsets[j]];
            if index.contains_entity(substring) && is_valid_entity(substring) {
                push_unique(&mut found, substring);
            }
        }
    }

    if found.is_empty() {
        found = keyword_fallback(&tokens, index);
        if !found.is_empty() {
            debug!(matches = found.len(), "keyword fallback produced entities");
        }
    }

    found
}

/// Scan index keys for ones containing a query token as a substring,
/// collecting up to [`MAX_KEYWORD_MATCHES`] distinct keys in deterministic
/// key-iteration order.
fn keyword_fallback(tokens: &[&str], index: &KnowledgeIndex) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for token in tokens {
        if token.chars().count() <= 1 {
            continue;
        }
        for key in index.entity_keys() {
            if key.contains(token) && !found.iter().any(|e| e == key) {
                found.push(key.to_string());
                if found.len() >= MAX_KEYWORD_MATCHES {
                    return found;
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Record, Triple};

    fn index_with(entities: &[(&str, &str, &str)]) -> KnowledgeIndex {
        let records = entities
            .iter()
            .map(|(s, o, l)| {
                Record::new(0, format!("{s}相关{o}"), vec![Triple::new(*s, *o, *l)])
            })
            .collect();
        KnowledgeIndex::build(records)
    }

    #[test]
    fn substring_scan_finds_embedded_entity() {
        let seg = Segmenter::new();
        let index = index_with(&[("CCUS技术", "碳减排", "用于")]);
        let entities = resolve_entities("什么是CCUS技术？", &index, &seg);
        assert_eq!(entities, vec!["CCUS技术"]);
    }

    #[test]
    fn invalid_single_char_entity_never_resolves() {
        let seg = Segmenter::new();
        // "的" is an index key here, but the validity predicate rejects it.
        let index = index_with(&[("的", "CO2封存技术", "噪声")]);
        let entities = resolve_entities("的", &index, &seg);
        assert!(entities.is_empty());
    }

    #[test]
    fn whole_query_match_is_included() {
        let seg = Segmenter::new();
        let index = index_with(&[("碳捕集示范项目", "内蒙古", "位于")]);
        let entities = resolve_entities("碳捕集示范项目", &index, &seg);
        assert!(entities.contains(&"碳捕集示范项目".to_string()));
    }

    #[test]
    fn results_are_deduplicated_and_deterministic() {
        let seg = Segmenter::new();
        let index = index_with(&[("大庆油田", "CO2封存技术", "应用")]);
        let a = resolve_entities("大庆油田的大庆油田", &index, &seg);
        let b = resolve_entities("大庆油田的大庆油田", &index, &seg);
        assert_eq!(a, b);
        assert_eq!(a.iter().filter(|e| *e == "大庆油田").count(), 1);
    }

    #[test]
    fn keyword_fallback_caps_at_five() {
        let seg = Segmenter::new();
        let records: Vec<Record> = (0..8)
            .map(|i| {
                let entity = format!("油田区块{i}号储层");
                Record::new(0, entity.clone(), vec![Triple::new(entity, "封存", "用于")])
            })
            .collect();
        let index = KnowledgeIndex::build(records);
        // "油田" alone is not an index key, so the three direct passes miss
        // and the fallback scans keys containing the token.
        let entities = resolve_entities("油田", &index, &seg);
        assert_eq!(entities.len(), 5);
        assert!(entities.iter().all(|e| e.contains("油田")));
    }

    #[test]
    fn no_match_yields_empty_set() {
        let seg = Segmenter::new();
        let index = index_with(&[("碳捕集技术", "电厂", "用于")]);
        let entities = resolve_entities("完全无关的问题", &index, &seg);
        assert!(entities.is_empty());
    }
}
