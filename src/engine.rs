//! Engine facade: top-level API for the carbokg system.
//!
//! The `Engine` owns the segmenter and the loaded knowledge index and
//! provides the combined query entry point used by chat-prompt assembly.
//! Absence of a knowledge base is an expected operating mode (for example
//! before the first corpus build): the engine then answers every query with
//! empty results instead of failing.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{EngineError, KgResult};
use crate::index::{IndexStatistics, KnowledgeIndex};
use crate::query::{RetrievalResult, Subgraph, build_subgraph, resolve_entities, search_by_entities};
use crate::tokenize::Segmenter;

/// Configuration for the carbokg engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Corpus locations probed in order at startup; the first that parses
    /// wins.
    pub corpus_candidates: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus_candidates: vec![
                PathBuf::from("data/knowledge_graph.jsonl"),
                PathBuf::from("../data/knowledge_graph.jsonl"),
            ],
        }
    }
}

/// Combined output of one query: resolved entities, ranked supporting
/// records, and the subgraph view over them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryOutput {
    pub entities: Vec<String>,
    pub records: Vec<RetrievalResult>,
    pub subgraph: Subgraph,
}

/// The carbokg retrieval engine.
pub struct Engine {
    config: EngineConfig,
    segmenter: Segmenter,
    index: Option<Arc<KnowledgeIndex>>,
}

impl Engine {
    /// Create an engine, probing the configured corpus candidates.
    ///
    /// A corpus that cannot be loaded leaves the engine in the not-loaded
    /// state with a warning; only an empty candidate list is a configuration
    /// error.
    pub fn new(config: EngineConfig) -> KgResult<Self> {
        if config.corpus_candidates.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "corpus_candidates must not be empty".into(),
            }
            .into());
        }

        let index = match KnowledgeIndex::load_any(&config.corpus_candidates) {
            Ok(index) => {
                info!(stats = %index.statistics(), "engine ready");
                Some(Arc::new(index))
            }
            Err(err) => {
                warn!(%err, "no knowledge base loaded; queries will return empty results");
                None
            }
        };

        Ok(Self {
            config,
            segmenter: Segmenter::new(),
            index,
        })
    }

    /// Create an engine over an already-built index. Used by hosts that build
    /// the corpus in-process and by tests.
    pub fn with_index(index: KnowledgeIndex) -> Self {
        Self {
            config: EngineConfig::default(),
            segmenter: Segmenter::new(),
            index: Some(Arc::new(index)),
        }
    }

    /// Whether a knowledge base is loaded.
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Shared read-only handle to the loaded index, for hosts serving
    /// queries on parallel workers.
    pub fn index(&self) -> Option<Arc<KnowledgeIndex>> {
        self.index.clone()
    }

    /// Resolve candidate entities for free-form query text.
    pub fn resolve(&self, text: &str) -> Vec<String> {
        match &self.index {
            Some(index) => resolve_entities(text, index, &self.segmenter),
            None => Vec::new(),
        }
    }

    /// The combined query entry point: resolution → retrieval → subgraph.
    ///
    /// "No knowledge found" is a normal outcome and yields empty records and
    /// an empty subgraph.
    pub fn query(&self, text: &str) -> QueryOutput {
        let Some(index) = &self.index else {
            return QueryOutput::default();
        };

        let entities = resolve_entities(text, index, &self.segmenter);
        debug!(?entities, "resolved query entities");

        let records = search_by_entities(&entities, index);
        let subgraph = build_subgraph(&entities, index);

        QueryOutput {
            entities,
            records,
            subgraph,
        }
    }

    /// Read-only statistics snapshot, if a knowledge base is loaded.
    pub fn statistics(&self) -> Option<IndexStatistics> {
        self.index.as_ref().map(|index| index.statistics())
    }

    /// Rebuild the index from the configured candidates and swap it in.
    ///
    /// The new index is fully constructed before the swap, so concurrent
    /// readers holding the previous `Arc` are never disturbed. On failure the
    /// previous index stays in place.
    pub fn reload(&mut self) -> KgResult<()> {
        let index = KnowledgeIndex::load_any(&self.config.corpus_candidates)?;
        info!(stats = %index.statistics(), "knowledge index reloaded");
        self.index = Some(Arc::new(index));
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
