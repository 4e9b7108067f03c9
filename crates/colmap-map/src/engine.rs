//! Mapping orchestrator.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use colmap_catalog::FieldCatalog;
use colmap_model::{
    ColumnSample, MapColumnsRequest, MapColumnsResponse, MappingError, MappingSuggestion,
    MappingSummary, Result,
};

use crate::access::{CallerIdentity, WorkspaceDirectory, authorize};
use crate::arbitration::{MIN_USABLE_CONFIDENCE, arbitrate};
use crate::candidate::Candidate;
use crate::classifiers::HeuristicPipeline;
use crate::classifiers::patterns::{detect_identifier, detect_week};
use crate::fallback::{FallbackClassifier, TextCompletionClient};
use crate::options::EngineOptions;
use crate::redact::redact_value;
use crate::utils::normalize_header;

/// Reasoning attached to headers nothing could classify.
pub const NO_MATCH_REASONING: &str = "no matching field found";

/// Engine for mapping source columns to canonical fields.
///
/// Each header runs through the heuristic pipeline, arbitration and, when the
/// heuristics are weak and a completion client is configured, the model
/// fallback. The engine keeps no state between calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use colmap_catalog::FieldCatalog;
/// use colmap_map::{EngineOptions, MappingEngine};
/// use colmap_model::{ColumnSample, MappingError};
///
/// fn main() -> Result<(), MappingError> {
///     let engine = MappingEngine::new(Arc::new(FieldCatalog::builtin()), EngineOptions::default());
///     let samples = vec![ColumnSample::new("email", vec!["a@x.com".to_string()])];
///     let suggestions = engine.suggest(&samples, &["email".to_string()])?;
///     assert_eq!(suggestions[0].suggested_field, "customer_email");
///     Ok(())
/// }
/// ```
pub struct MappingEngine {
    catalog: Arc<FieldCatalog>,
    options: EngineOptions,
    pipeline: HeuristicPipeline,
    fallback: Option<FallbackClassifier>,
    directory: Option<Arc<dyn WorkspaceDirectory>>,
}

impl MappingEngine {
    /// Creates an engine with the standard heuristic pipeline and no
    /// fallback or directory.
    pub fn new(catalog: Arc<FieldCatalog>, options: EngineOptions) -> Self {
        Self {
            catalog,
            options,
            pipeline: HeuristicPipeline::standard(),
            fallback: None,
            directory: None,
        }
    }

    #[must_use]
    pub fn with_pipeline(mut self, pipeline: HeuristicPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    #[must_use]
    pub fn with_completion_client(mut self, client: Arc<dyn TextCompletionClient>) -> Self {
        self.fallback = Some(FallbackClassifier::new(client));
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackClassifier) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[must_use]
    pub fn with_directory(mut self, directory: Arc<dyn WorkspaceDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Returns true if weak headers will be sent to the model.
    pub fn fallback_available(&self) -> bool {
        self.active_fallback().is_some()
    }

    /// Handles a full mapping request.
    pub fn handle(
        &self,
        request: &MapColumnsRequest,
        caller: Option<&CallerIdentity>,
    ) -> Result<MapColumnsResponse> {
        self.map_columns(
            &request.headers,
            &request.sample_rows,
            caller,
            &request.workspace_id,
        )
        .map(MapColumnsResponse::new)
    }

    /// Suggests a mapping for every header, in header order.
    ///
    /// The caller is authorized before any classification work happens.
    pub fn map_columns(
        &self,
        headers: &[String],
        sample_rows: &[Vec<String>],
        caller: Option<&CallerIdentity>,
        workspace_id: &str,
    ) -> Result<Vec<MappingSuggestion>> {
        let span = tracing::info_span!("map_columns", workspace_id, headers = headers.len());
        let _guard = span.enter();

        authorize(self.directory.as_deref(), caller, workspace_id)?;
        if headers.is_empty() {
            return Err(MappingError::InvalidInput(
                "headers must not be empty".to_string(),
            ));
        }

        let samples = ColumnSample::from_rows(headers, sample_rows, self.options.sample_limit);
        let suggestions = self.suggest(&samples, headers)?;

        let summary = MappingSummary::from_suggestions(&suggestions);
        tracing::info!(
            rows = sample_rows.len(),
            mapped = summary.mapped,
            unmapped = summary.unmapped,
            fallback = self.fallback_available(),
            "mapping suggestions ready"
        );
        Ok(suggestions)
    }

    /// Classifies prepared samples without authorization.
    ///
    /// `all_headers` gives the model fallback cross-column context. A panic
    /// while classifying any header fails the whole batch.
    pub fn suggest(
        &self,
        samples: &[ColumnSample],
        all_headers: &[String],
    ) -> Result<Vec<MappingSuggestion>> {
        let workers = self.options.workers.clamp(1, samples.len().max(1));
        if workers == 1 {
            return catch_unwind(AssertUnwindSafe(|| {
                samples
                    .iter()
                    .map(|sample| self.classify_column(sample, all_headers))
                    .collect()
            }))
            .map_err(|payload| MappingError::Internal(panic_message(payload.as_ref())));
        }
        self.suggest_parallel(samples, all_headers, workers)
    }

    fn suggest_parallel(
        &self,
        samples: &[ColumnSample],
        all_headers: &[String],
        workers: usize,
    ) -> Result<Vec<MappingSuggestion>> {
        let chunk_size = samples.len().div_ceil(workers);
        let mut results: Vec<Option<MappingSuggestion>> = vec![None; samples.len()];

        let joined = std::thread::scope(|scope| {
            let handles: Vec<_> = samples
                .chunks(chunk_size)
                .zip(results.chunks_mut(chunk_size))
                .map(|(input, output)| {
                    scope.spawn(move || {
                        for (sample, slot) in input.iter().zip(output.iter_mut()) {
                            *slot = Some(self.classify_column(sample, all_headers));
                        }
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        });

        if let Some(Err(payload)) = joined.into_iter().find(std::result::Result::is_err) {
            return Err(MappingError::Internal(panic_message(payload.as_ref())));
        }
        results
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| MappingError::Internal("worker left a header unclassified".to_string()))
    }

    /// Classifies a single column. Never fails: the worst outcome is an
    /// unmapped suggestion with zero confidence.
    pub fn classify_column(
        &self,
        sample: &ColumnSample,
        all_headers: &[String],
    ) -> MappingSuggestion {
        let header = normalize_header(&sample.header);
        tracing::trace!(
            column = %sample.header,
            values = ?sample.values.iter().map(|v| redact_value(v)).collect::<Vec<_>>(),
            "classifying column"
        );

        let candidates = self.pipeline.run(&header, &sample.values, &self.catalog);
        let mut winner = arbitrate(candidates);

        let weak = winner
            .as_ref()
            .is_none_or(|c| c.confidence < self.options.fallback_threshold);
        if weak && let Some(fallback) = self.active_fallback() {
            let model =
                fallback.classify_with_model(&sample.header, all_headers, &sample.values, &self.catalog);
            if let Some(model) = model
                && winner.as_ref().is_none_or(|c| model.confidence > c.confidence)
            {
                tracing::debug!(column = %sample.header, field = %model.field, "model answer preferred");
                winner = Some(model);
            }
        }

        let chosen = match winner {
            Some(candidate) if candidate.confidence > MIN_USABLE_CONFIDENCE => Some(candidate),
            _ => self.shape_sentinel(&header, &sample.values),
        };
        let suggestion = match chosen {
            Some(candidate) => candidate.into_suggestion(&sample.header),
            None => MappingSuggestion::unmapped(&sample.header, NO_MATCH_REASONING),
        };

        tracing::debug!(
            column = %suggestion.original_column,
            field = %suggestion.suggested_field,
            confidence = suggestion.confidence,
            "column classified"
        );
        suggestion
    }

    /// Low-confidence stand-in for headers that look like week or ID columns.
    fn shape_sentinel(&self, header: &str, values: &[String]) -> Option<Candidate> {
        detect_week(header, values, &self.catalog).or_else(|| detect_identifier(header, values))
    }

    fn active_fallback(&self) -> Option<&FallbackClassifier> {
        if self.options.fallback_enabled {
            self.fallback.as_ref()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for MappingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingEngine")
            .field("fields", &self.catalog.len())
            .field("options", &self.options)
            .field("stages", &self.pipeline.len())
            .field("fallback", &self.fallback.is_some())
            .field("directory", &self.directory.is_some())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("classification panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("classification panicked: {message}")
    } else {
        "classification panicked".to_string()
    }
}
