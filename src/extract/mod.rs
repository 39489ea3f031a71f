//! Pattern-based triple extraction from raw domain sentences.
//!
//! Extraction is deliberately high-recall, low-precision: explicit relation
//! patterns produce the trustworthy matches, and a schema-guided synthesis
//! pass seeds additional schema-consistent triples so sparse sentences still
//! contribute to the retrieval index. Everything produced here must pass the
//! validator (`validate`) before being trusted beyond coverage statistics.
//!
//! Output order is deterministic for a fixed sentence: explicit matches in
//! pattern-table order first, then synthesized triples in schema order.

pub mod patterns;
pub mod schema;
pub mod validate;

use tracing::debug;

use crate::corpus::{Record, Triple};

use schema::{DOMAIN_SCHEMA, MAX_SCHEMA_ENTITIES, MAX_SCHEMA_RELATIONS};

/// Entities recognized in one sentence, grouped by type in table order.
type TypedEntities = Vec<(&'static str, Vec<String>)>;

/// Recognize typed entities in `sentence`.
///
/// A match against any pattern of a type yields a candidate entity of that
/// type; candidates shorter than two characters are ignored, and duplicates
/// within a type are collapsed keeping first-match order.
fn extract_entities(sentence: &str) -> TypedEntities {
    let tables = patterns::tables();
    let mut typed = Vec::with_capacity(tables.entity_sets.len());

    for set in &tables.entity_sets {
        let mut found: Vec<String> = Vec::new();
        for pattern in &set.patterns {
            for m in pattern.find_iter(sentence) {
                let text = m.as_str().trim();
                if text.chars().count() > 1 && !found.iter().any(|e| e == text) {
                    found.push(text.to_string());
                }
            }
        }
        typed.push((set.entity_type, found));
    }

    typed
}

/// Extract candidate triples from one sentence.
///
/// Explicit relation-pattern matches come first; each match whose subject and
/// object groups are both longer than one character yields one triple. Then
/// the synthesis pass pairs up to [`MAX_SCHEMA_ENTITIES`] entities of each
/// type with up to [`MAX_SCHEMA_RELATIONS`] of the type's declared relations,
/// linking each pair to the first entity of the first other type that matched
/// anything, and stopping after that single pairing.
pub fn extract_triples(sentence: &str) -> Vec<Triple> {
    let tables = patterns::tables();
    let entities = extract_entities(sentence);
    let mut triples = Vec::new();

    for rp in &tables.relation_patterns {
        for caps in rp.regex.captures_iter(sentence) {
            let (Some(subject), Some(object)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let subject = subject.as_str().trim();
            let object = object.as_str().trim();
            if subject.chars().count() > 1 && object.chars().count() > 1 {
                triples.push(Triple::new(subject, object, rp.label));
            }
        }
    }

    for (entity_type, relations) in DOMAIN_SCHEMA {
        let type_entities = entities
            .iter()
            .find(|(t, _)| t == entity_type)
            .map(|(_, found)| found.as_slice())
            .unwrap_or(&[]);

        for entity in type_entities.iter().take(MAX_SCHEMA_ENTITIES) {
            for relation in relations.iter().take(MAX_SCHEMA_RELATIONS) {
                // Link to one candidate of a different type; a single example
                // pairing per declared relation keeps synthesis bounded.
                for (target_type, target_entities) in &entities {
                    if target_type == entity_type {
                        continue;
                    }
                    if let Some(target) = target_entities.first() {
                        triples.push(Triple::new(entity.clone(), target.clone(), *relation));
                        break;
                    }
                }
            }
        }
    }

    triples
}

/// Run extraction over raw text lines, assigning sequential record ids.
///
/// Blank lines are skipped and do not consume an id. This is the offline
/// corpus-building entry point; the output still needs validation before it
/// is persisted.
pub fn build_records<'a, I>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    let mut id: u32 = 0;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let triples = extract_triples(line);
        records.push(Record::new(id, line, triples));
        id += 1;
        if id % 100 == 0 {
            debug!(records = id, "extraction progress");
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_pattern_yields_explicit_triple() {
        let triples = extract_triples("中石油采用CO2封存技术");
        let explicit: Vec<_> = triples.iter().filter(|t| t.label == "技术应用").collect();
        assert_eq!(explicit.len(), 1);
        assert_eq!(explicit[0].subject, "中石油");
        assert_eq!(explicit[0].object, "CO2封存技术");
    }

    #[test]
    fn location_pattern_extracts_subject_and_object() {
        let triples = extract_triples("齐鲁石化示范项目位于山东省");
        let located: Vec<_> = triples.iter().filter(|t| t.label == "位于").collect();
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].subject, "齐鲁石化示范项目");
        assert_eq!(located[0].object, "山东省");
    }

    #[test]
    fn explicit_matches_precede_synthesized_triples() {
        // Sentence with both an explicit relation match and entities of two
        // types, so synthesis also fires.
        let triples = extract_triples("华能集团采用碳捕集技术建设示范项目");
        assert!(!triples.is_empty());
        let first_synth = triples.iter().position(|t| t.label == "应用于");
        let last_explicit = triples
            .iter()
            .rposition(|t| t.label == "技术应用")
            .expect("explicit match present");
        if let Some(first_synth) = first_synth {
            assert!(last_explicit < first_synth);
        }
    }

    #[test]
    fn synthesis_links_to_one_entity_of_another_type() {
        // Two entity types match, no explicit relation pattern does.
        let triples = extract_triples("碳捕集技术、示范项目");
        let synthesized: Vec<_> = triples.iter().filter(|t| t.label == "应用于").collect();
        // One pairing per declared relation, not a cross product.
        assert_eq!(synthesized.len(), 1);
        assert_eq!(synthesized[0].subject, "碳捕集技术");
        assert_eq!(synthesized[0].object, "示范项目");
    }

    #[test]
    fn extraction_is_deterministic() {
        let sentence = "国家能源集团与华能集团合作，在鄂尔多斯盆地建设CCUS示范项目，采用燃烧后捕集技术";
        let a = extract_triples(sentence);
        let b = extract_triples(sentence);
        assert_eq!(a, b);
    }

    #[test]
    fn build_records_skips_blank_lines() {
        let records = build_records(["第一句使用捕集技术", "", "  ", "第二句"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].sentence, "第二句");
    }

    #[test]
    fn no_patterns_no_triples() {
        assert!(extract_triples("今天天气不错").is_empty());
    }
}
