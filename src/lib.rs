//! # carbokg
//!
//! Knowledge-graph extraction and retrieval engine for Chinese CCUS
//! (carbon capture, utilization, and storage) domain text.
//!
//! ## Architecture
//!
//! - **Extraction** (`extract`): pattern-based triple extraction with
//!   schema-guided synthesis, plus span-annotating validation
//! - **Corpus** (`corpus`): line-delimited JSON record log
//! - **Index** (`index`): in-memory posting lists, built once and frozen
//! - **Query** (`query`): entity resolution, ranked retrieval, subgraph
//!   assembly, and the noise-gating validity predicate
//! - **Prompt** (`prompt`): deterministic knowledge block for LLM grounding
//! - **Export** (`export`): aggregated graph view for visualization
//!
//! ## Library usage
//!
//! ```no_run
//! use carbokg::engine::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let output = engine.query("大庆油田应用了什么技术？");
//! for result in &output.records {
//!     println!("[{}] {}", result.relevance_score, result.record.sentence);
//! }
//! ```

pub mod corpus;
pub mod engine;
pub mod error;
pub mod export;
pub mod extract;
pub mod index;
pub mod prompt;
pub mod query;
pub mod tokenize;

pub use corpus::{Record, Triple};
pub use engine::{Engine, EngineConfig, QueryOutput};
pub use error::{KgError, KgResult};
pub use index::{IndexStatistics, KnowledgeIndex};
