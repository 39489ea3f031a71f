//! In-memory knowledge index: posting lists over the validated triple corpus.
//!
//! Built once from a line-delimited JSON corpus at service start and treated
//! as read-only afterward. Two posting-list maps are kept: entity text →
//! record ids and relation label → record ids. `BTreeMap` keys give the
//! deterministic iteration order the keyword fallback and repeated-query
//! determinism depend on.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::Record;
use crate::error::{CorpusError, CorpusResult};

/// Read-only snapshot of index-level counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStatistics {
    /// Number of records, including ones without triples.
    pub total_records: usize,
    /// Number of distinct entity keys.
    pub total_entities: usize,
    /// Total triple count across all records.
    pub total_relations: usize,
    /// Number of distinct relation labels.
    pub relation_types: usize,
}

impl std::fmt::Display for IndexStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "knowledge index statistics")?;
        writeln!(f, "  records:         {}", self.total_records)?;
        writeln!(f, "  entities:        {}", self.total_entities)?;
        writeln!(f, "  relations:       {}", self.total_relations)?;
        writeln!(f, "  relation types:  {}", self.relation_types)?;
        Ok(())
    }
}

/// Frozen in-memory index over a triple corpus.
///
/// Invariant: every record id in `entity_index[e]` belongs to a record with at
/// least one triple whose subject or object equals `e`. The maps are
/// append-only during construction and never mutated by queries; share the
/// built index behind an `Arc` for concurrent readers.
pub struct KnowledgeIndex {
    records: Vec<Record>,
    entity_index: BTreeMap<String, Vec<u32>>,
    relation_index: BTreeMap<String, Vec<u32>>,
}

/// Append `id` to a posting list unless it is already the most recent entry.
/// Records are visited in ascending id order, so this suffices for set
/// semantics while keeping the list sorted.
fn post(index: &mut BTreeMap<String, Vec<u32>>, key: &str, id: u32) {
    let posting = index.entry(key.to_string()).or_default();
    if posting.last() != Some(&id) {
        posting.push(id);
    }
}

impl KnowledgeIndex {
    /// Build the index in a single pass over `records`.
    ///
    /// Record ids are reassigned by position so that the id is always a valid
    /// offset into the record store.
    pub fn build(mut records: Vec<Record>) -> Self {
        let mut entity_index: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        let mut relation_index: BTreeMap<String, Vec<u32>> = BTreeMap::new();

        for (position, record) in records.iter_mut().enumerate() {
            record.id = position as u32;
            for triple in &record.triples {
                if !triple.subject.is_empty() {
                    post(&mut entity_index, &triple.subject, record.id);
                }
                if !triple.object.is_empty() {
                    post(&mut entity_index, &triple.object, record.id);
                }
                if !triple.label.is_empty() {
                    post(&mut relation_index, &triple.label, record.id);
                }
            }
        }

        info!(
            records = records.len(),
            entities = entity_index.len(),
            relation_types = relation_index.len(),
            "knowledge index built"
        );

        Self {
            records,
            entity_index,
            relation_index,
        }
    }

    /// Load a line-delimited JSON corpus and build the index over it.
    ///
    /// Blank lines are ignored; a line that fails to parse as a record is
    /// skipped with a warning, not fatal to the load.
    pub fn load(path: &Path) -> CorpusResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| CorpusError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CorpusError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    skipped += 1;
                    warn!(line = line_no + 1, %err, "skipping malformed corpus line");
                }
            }
        }

        info!(
            path = %path.display(),
            records = records.len(),
            skipped,
            "corpus loaded"
        );
        Ok(Self::build(records))
    }

    /// Probe candidate corpus locations in order and load the first that
    /// exists and parses. Later candidates are not attempted once one wins.
    pub fn load_any(candidates: &[PathBuf]) -> CorpusResult<Self> {
        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::load(candidate) {
                Ok(index) => return Ok(index),
                Err(err) => {
                    warn!(path = %candidate.display(), %err, "corpus candidate failed to load");
                }
            }
        }
        Err(CorpusError::NoSource {
            tried: candidates.len(),
        })
    }

    /// The record with the given id, if any.
    pub fn record(&self, id: u32) -> Option<&Record> {
        self.records.get(id as usize)
    }

    /// All records, in id order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Posting list for an entity key.
    pub fn entity_postings(&self, entity: &str) -> Option<&[u32]> {
        self.entity_index.get(entity).map(Vec::as_slice)
    }

    /// Posting list for a relation label.
    pub fn relation_postings(&self, label: &str) -> Option<&[u32]> {
        self.relation_index.get(label).map(Vec::as_slice)
    }

    /// Whether `entity` is an index key.
    pub fn contains_entity(&self, entity: &str) -> bool {
        self.entity_index.contains_key(entity)
    }

    /// All entity keys in deterministic (sorted) order.
    pub fn entity_keys(&self) -> impl Iterator<Item = &str> {
        self.entity_index.keys().map(String::as_str)
    }

    /// Snapshot of index-level counts.
    pub fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            total_records: self.records.len(),
            total_entities: self.entity_index.len(),
            total_relations: self.records.iter().map(|r| r.triples.len()).sum(),
            relation_types: self.relation_index.len(),
        }
    }
}

impl std::fmt::Debug for KnowledgeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeIndex")
            .field("records", &self.records.len())
            .field("entities", &self.entity_index.len())
            .field("relation_types", &self.relation_index.len())
            .finish()
    }
}
