//! Subgraph assembly over retrieved records.
//!
//! Converts the top retrieved records into a node/edge view for visualization
//! and LLM-prompt grounding. Edges are intentionally not deduplicated here:
//! repeated (source, target, relation) tuples from different supporting
//! sentences each keep their own sentence, preserving evidence provenance.
//! Callers needing a merged view aggregate afterwards (`export`).

use std::collections::BTreeSet;

use serde::Serialize;

use crate::index::KnowledgeIndex;

use super::retrieve::search_by_entities;
use super::validity::is_valid_entity;

/// One directed edge with its supporting sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relation: String,
    pub sentence: String,
}

/// Node/edge view of the records supporting an entity set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Subgraph {
    /// Distinct entity strings, in deterministic (sorted) order.
    pub nodes: BTreeSet<String>,
    /// Edges in first-production order over the ranked records.
    pub edges: Vec<Edge>,
}

impl Subgraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Build the subgraph centered on the resolved entity set.
///
/// Runs the ranked retriever internally, then adds one edge per triple whose
/// subject, object, and label are all non-empty and whose endpoints both pass
/// the validity predicate.
pub fn build_subgraph(entities: &[String], index: &KnowledgeIndex) -> Subgraph {
    let mut subgraph = Subgraph::default();

    for result in search_by_entities(entities, index) {
        for triple in &result.record.triples {
            if triple.subject.is_empty() || triple.object.is_empty() || triple.label.is_empty() {
                continue;
            }
            if !is_valid_entity(&triple.subject) || !is_valid_entity(&triple.object) {
                continue;
            }
            subgraph.nodes.insert(triple.subject.clone());
            subgraph.nodes.insert(triple.object.clone());
            subgraph.edges.push(Edge {
                source: triple.subject.clone(),
                target: triple.object.clone(),
                relation: triple.label.clone(),
                sentence: result.record.sentence.clone(),
            });
        }
    }

    subgraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Record, Triple};

    fn entities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn edges_carry_their_source_sentence() {
        let index = KnowledgeIndex::build(vec![Record::new(
            0,
            "大庆油田应用CO2封存技术",
            vec![Triple::new("大庆油田", "CO2封存技术", "应用")],
        )]);
        let subgraph = build_subgraph(&entities(&["大庆油田"]), &index);
        assert_eq!(subgraph.edges.len(), 1);
        assert_eq!(subgraph.edges[0].sentence, "大庆油田应用CO2封存技术");
        assert!(subgraph.nodes.contains("大庆油田"));
        assert!(subgraph.nodes.contains("CO2封存技术"));
    }

    #[test]
    fn invalid_endpoints_are_filtered_from_the_view() {
        let index = KnowledgeIndex::build(vec![Record::new(
            0,
            "的与CO2封存技术相关",
            vec![
                Triple::new("的", "CO2封存技术", "噪声"),
                Triple::new("大庆油田", "CO2封存技术", "应用"),
            ],
        )]);
        let subgraph = build_subgraph(&entities(&["CO2封存技术"]), &index);
        assert!(!subgraph.nodes.contains("的"));
        assert_eq!(subgraph.edges.len(), 1);
        assert_eq!(subgraph.edges[0].source, "大庆油田");
    }

    #[test]
    fn duplicate_edges_across_records_are_kept() {
        let index = KnowledgeIndex::build(vec![
            Record::new(
                0,
                "第一处证据",
                vec![Triple::new("大庆油田", "CO2封存技术", "应用")],
            ),
            Record::new(
                0,
                "第二处证据",
                vec![Triple::new("大庆油田", "CO2封存技术", "应用")],
            ),
        ]);
        let subgraph = build_subgraph(&entities(&["大庆油田"]), &index);
        assert_eq!(subgraph.edges.len(), 2);
        assert_ne!(subgraph.edges[0].sentence, subgraph.edges[1].sentence);
        assert_eq!(subgraph.nodes.len(), 2);
    }

    #[test]
    fn empty_entities_empty_subgraph() {
        let index = KnowledgeIndex::build(vec![]);
        let subgraph = build_subgraph(&[], &index);
        assert!(subgraph.is_empty());
    }
}
