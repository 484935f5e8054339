//! libarud crate root
//!
//! This crate provides the Arabic text side of prosody analysis: character
//! tables, the orthographic normalizer, the Arudi pattern extractor and a
//! high-level `Processor` that composes them with the shared `libarud-core`
//! scansion matcher.
//!
//! Public API exported here:
//! - `Processor` from `processor`
//! - `TextNormalizer` and `SpellingTable` from `normalizer`
//! - `extract` from `extractor`
//! - `ArudiConfig` from `config`

pub mod araby;
pub mod config;
pub mod extractor;
pub mod normalizer;
pub mod processor;

// Re-export the core model types callers see in results.
pub use libarud_core::{
    ArudError, Catalog, Config, FootDiagnosis, FootStatus, MeterCandidate, PoemAnalysis,
    ScannedVerse, ScansionMatcher, VerseAnalysis,
};

// Convenience re-exports for common types used by callers.
pub use config::ArudiConfig;
pub use extractor::extract;
pub use normalizer::{SpellingTable, TextNormalizer};
pub use processor::Processor;
