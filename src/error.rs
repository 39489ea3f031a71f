//! Rich diagnostic error types for the carbokg engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong and
//! how to fix it. Note that most failure modes inside the query pipeline are not
//! errors at all: an unloaded index, an unparseable corpus line, or an invalid
//! extracted triple all degrade to "less output" rather than surfacing here.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the carbokg engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum KgError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Corpus errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CorpusError {
    #[error("failed to read corpus file: {path}")]
    #[diagnostic(
        code(carbokg::corpus::io),
        help(
            "Check that the corpus file exists, is readable, and that the path \
             is correct relative to the working directory."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no corpus source could be loaded ({tried} candidate(s) tried)")]
    #[diagnostic(
        code(carbokg::corpus::no_source),
        help(
            "None of the candidate corpus locations existed or parsed. \
             Build a corpus first with `carbokg build --input <text> --output <jsonl>`, \
             or pass an explicit path with `--corpus`."
        )
    )]
    NoSource { tried: usize },

    #[error("failed to write corpus file: {path}")]
    #[diagnostic(
        code(carbokg::corpus::write),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(carbokg::engine::invalid_config),
        help("Check the EngineConfig fields. {message}")
    )]
    InvalidConfig { message: String },
}

/// Convenience alias for functions returning carbokg results.
pub type KgResult<T> = std::result::Result<T, KgError>;

/// Result type for corpus load/store operations.
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;
