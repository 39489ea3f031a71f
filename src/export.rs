//! Export-oriented graph aggregation for static visualization.
//!
//! The query-path subgraph keeps every edge with its own supporting sentence.
//! Visualization wants the opposite: one link per (source, target) pair, with
//! the distinct relation labels unioned and the occurrence count as weight.
//! That merge happens here as a post-processing step; the query contract is
//! untouched.

use std::collections::HashMap;

use serde::Serialize;

use crate::index::KnowledgeIndex;
use crate::query::subgraph::Edge;

/// Default node size for the rendered graph.
const NODE_SYMBOL_SIZE: u32 = 30;

/// A rendered graph node.
#[derive(Debug, Clone, Serialize)]
pub struct ExportNode {
    pub name: String,
    #[serde(rename = "symbolSize")]
    pub symbol_size: u32,
    pub category: u32,
}

/// A merged link: all relations observed between one (source, target) pair.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedEdge {
    pub source: String,
    pub target: String,
    /// Distinct relation labels, in first-seen order.
    pub relations: Vec<String>,
    /// Number of underlying edges merged into this link.
    pub weight: u32,
}

/// Complete visualization document.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<AggregatedEdge>,
}

/// Merge edges sharing a (source, target) pair.
///
/// Output is ordered by weight descending; the sort is stable, so ties keep
/// first-seen order and the result is deterministic.
pub fn aggregate_edges(edges: &[Edge]) -> Vec<AggregatedEdge> {
    let mut merged: Vec<AggregatedEdge> = Vec::new();
    let mut by_pair: HashMap<(String, String), usize> = HashMap::new();

    for edge in edges {
        let pair = (edge.source.clone(), edge.target.clone());
        match by_pair.get(&pair) {
            Some(&i) => {
                let link = &mut merged[i];
                link.weight += 1;
                if !link.relations.contains(&edge.relation) {
                    link.relations.push(edge.relation.clone());
                }
            }
            None => {
                by_pair.insert(pair, merged.len());
                merged.push(AggregatedEdge {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    relations: vec![edge.relation.clone()],
                    weight: 1,
                });
            }
        }
    }

    merged.sort_by(|a, b| b.weight.cmp(&a.weight));
    merged
}

/// Render the whole corpus as an aggregated visualization graph.
///
/// Unlike the query path this applies no validity filtering: the export shows
/// everything the corpus contains. Subjects are category 0, objects
/// category 1 (a node keeps the category of its first appearance).
pub fn export_graph(index: &KnowledgeIndex) -> GraphExport {
    let mut nodes: Vec<ExportNode> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut edges: Vec<Edge> = Vec::new();

    let mut add_node = |nodes: &mut Vec<ExportNode>,
                        seen: &mut HashMap<String, usize>,
                        name: &str,
                        category: u32| {
        if !seen.contains_key(name) {
            seen.insert(name.to_string(), nodes.len());
            nodes.push(ExportNode {
                name: name.to_string(),
                symbol_size: NODE_SYMBOL_SIZE,
                category,
            });
        }
    };

    for record in index.records() {
        for triple in &record.triples {
            if triple.subject.is_empty() || triple.object.is_empty() {
                continue;
            }
            add_node(&mut nodes, &mut seen, &triple.subject, 0);
            add_node(&mut nodes, &mut seen, &triple.object, 1);
            edges.push(Edge {
                source: triple.subject.clone(),
                target: triple.object.clone(),
                relation: triple.label.clone(),
                sentence: record.sentence.clone(),
            });
        }
    }

    GraphExport {
        nodes,
        links: aggregate_edges(&edges),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Record, Triple};

    fn edge(source: &str, target: &str, relation: &str) -> Edge {
        Edge {
            source: source.into(),
            target: target.into(),
            relation: relation.into(),
            sentence: String::new(),
        }
    }

    #[test]
    fn merges_pairs_and_unions_labels() {
        let edges = vec![
            edge("甲", "乙", "应用"),
            edge("甲", "乙", "包含"),
            edge("甲", "乙", "应用"),
            edge("丙", "丁", "位于"),
        ];
        let merged = aggregate_edges(&edges);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].weight, 3);
        assert_eq!(merged[0].relations, vec!["应用", "包含"]);
        assert_eq!(merged[1].weight, 1);
    }

    #[test]
    fn direction_matters_for_merging() {
        let edges = vec![edge("甲", "乙", "应用"), edge("乙", "甲", "应用")];
        let merged = aggregate_edges(&edges);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let edges = vec![edge("甲", "乙", "r"), edge("丙", "丁", "r")];
        let merged = aggregate_edges(&edges);
        assert_eq!(merged[0].source, "甲");
        assert_eq!(merged[1].source, "丙");
    }

    #[test]
    fn whole_corpus_export() {
        let index = KnowledgeIndex::build(vec![
            Record::new(
                0,
                "大庆油田应用CO2封存技术",
                vec![Triple::new("大庆油田", "CO2封存技术", "应用")],
            ),
            Record::new(
                0,
                "大庆油田推广CO2封存技术",
                vec![Triple::new("大庆油田", "CO2封存技术", "推广")],
            ),
        ]);
        let export = export_graph(&index);
        assert_eq!(export.nodes.len(), 2);
        assert_eq!(export.nodes[0].category, 0);
        assert_eq!(export.nodes[1].category, 1);
        assert_eq!(export.links.len(), 1);
        assert_eq!(export.links[0].weight, 2);
        assert_eq!(export.links[0].relations, vec!["应用", "推广"]);
    }

    #[test]
    fn empty_index_exports_empty_graph() {
        let index = KnowledgeIndex::build(vec![]);
        let export = export_graph(&index);
        assert!(export.nodes.is_empty());
        assert!(export.links.is_empty());
    }
}
