#![deny(unsafe_code)]

//! Column mapping engine.
//!
//! Maps arbitrary spreadsheet headers onto the canonical fields of a
//! [`FieldCatalog`](colmap_catalog::FieldCatalog), combining literal overrides,
//! catalog matching, content validation, shape detectors and an optional
//! language-model fallback.

pub mod access;
pub mod arbitration;
pub mod candidate;
pub mod classifiers;
pub mod engine;
pub mod fallback;
pub mod options;
pub mod redact;
pub mod utils;

pub use access::{
    CallerIdentity, DirectoryError, InMemoryDirectory, Membership, WorkspaceDirectory,
    WorkspaceRole, authorize,
};
pub use arbitration::{MIN_USABLE_CONFIDENCE, arbitrate};
pub use candidate::Candidate;
pub use classifiers::{
    CatalogMatcher, DETECTOR_GATE, HeaderClassifier, HeuristicPipeline, LiteralOverrides,
    OverrideRule, PatternDetectors, Stage, StageGate,
};
pub use engine::{MappingEngine, NO_MATCH_REASONING};
pub use fallback::{CompletionError, FallbackClassifier, TextCompletionClient};
pub use options::{DEFAULT_FALLBACK_THRESHOLD, EngineOptions};
pub use utils::normalize_header;
