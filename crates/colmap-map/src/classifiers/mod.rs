//! Heuristic header classifiers.
//!
//! Each classifier inspects one header and its sample values and proposes
//! zero or more [`Candidate`]s. The [`HeuristicPipeline`] runs them in a fixed
//! order:
//!
//! 1. [`LiteralOverrides`] - known ambiguous abbreviations; stops the pipeline
//!    when it fires
//! 2. [`CatalogMatcher`] - example/keyword matching plus content validation
//! 3. [`PatternDetectors`] - week numbers and numeric IDs, only consulted when
//!    nothing so far reached [`DETECTOR_GATE`]

pub mod catalog_match;
pub mod content;
pub mod overrides;
pub mod patterns;

use colmap_catalog::FieldCatalog;

use crate::candidate::Candidate;

pub use catalog_match::CatalogMatcher;
pub use overrides::{LiteralOverrides, OverrideRule};
pub use patterns::PatternDetectors;

/// Pattern detectors only run while every candidate is below this score.
pub const DETECTOR_GATE: f64 = 0.6;

/// A stateless strategy that scores one header.
pub trait HeaderClassifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Proposes candidates for `header` given its sample `values`.
    ///
    /// `header` is the normalized header (see
    /// [`normalize_header`](crate::utils::normalize_header)).
    fn classify(&self, header: &str, values: &[String], catalog: &FieldCatalog)
    -> Vec<Candidate>;
}

/// When a pipeline stage is consulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageGate {
    /// Always run.
    Always,
    /// Run only while no earlier candidate reached the given confidence.
    BelowConfidence(f64),
}

/// One classifier plus its scheduling rules.
pub struct Stage {
    pub classifier: Box<dyn HeaderClassifier>,
    pub gate: StageGate,
    /// Skip every later stage when this one produced a candidate.
    pub short_circuit: bool,
}

/// Ordered list of classifier stages.
pub struct HeuristicPipeline {
    stages: Vec<Stage>,
}

impl HeuristicPipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Overrides, catalog matching, then gated pattern detectors.
    pub fn standard() -> Self {
        Self::new(vec![
            Stage {
                classifier: Box::new(LiteralOverrides::default()),
                gate: StageGate::Always,
                short_circuit: true,
            },
            Stage {
                classifier: Box::new(CatalogMatcher),
                gate: StageGate::Always,
                short_circuit: false,
            },
            Stage {
                classifier: Box::new(PatternDetectors),
                gate: StageGate::BelowConfidence(DETECTOR_GATE),
                short_circuit: false,
            },
        ])
    }

    /// Runs all applicable stages and returns every candidate produced.
    pub fn run(&self, header: &str, values: &[String], catalog: &FieldCatalog) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for stage in &self.stages {
            if let StageGate::BelowConfidence(limit) = stage.gate
                && candidates.iter().any(|c| c.confidence >= limit)
            {
                continue;
            }
            let produced = stage.classifier.classify(header, values, catalog);
            tracing::trace!(
                classifier = stage.classifier.name(),
                header,
                count = produced.len(),
                "classifier finished"
            );
            let fired = !produced.is_empty();
            candidates.extend(produced);
            if fired && stage.short_circuit {
                break;
            }
        }
        candidates
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Default for HeuristicPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
