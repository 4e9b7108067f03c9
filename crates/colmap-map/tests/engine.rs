//! End-to-end tests for the mapping engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use colmap_catalog::FieldCatalog;
use colmap_map::{
    CallerIdentity, Candidate, CompletionError, EngineOptions, FallbackClassifier,
    HeaderClassifier, HeuristicPipeline, InMemoryDirectory, LiteralOverrides, MappingEngine,
    NO_MATCH_REASONING, OverrideRule, Stage, StageGate, TextCompletionClient, WorkspaceRole,
};
use colmap_model::{ColumnSample, MapColumnsRequest, MappingError, MappingSuggestion, UNMAPPED};
use proptest::prelude::*;

const WORKSPACE: &str = "ws-acme";

/// Completion client that returns a fixed answer and records prompts.
struct Scripted {
    answer: Result<String, CompletionError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Scripted {
    fn new(answer: Result<String, CompletionError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextCompletionClient for Scripted {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone()
    }
}

struct Panicking;

impl HeaderClassifier for Panicking {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn classify(
        &self,
        header: &str,
        _values: &[String],
        _catalog: &FieldCatalog,
    ) -> Vec<Candidate> {
        if header == "boom" {
            panic!("classifier exploded");
        }
        Vec::new()
    }
}

fn directory() -> Arc<InMemoryDirectory> {
    Arc::new(
        InMemoryDirectory::new()
            .with_member("alice", WORKSPACE, WorkspaceRole::Member)
            .with_super_admin("ops"),
    )
}

fn engine() -> MappingEngine {
    engine_with(EngineOptions::default())
}

fn engine_with(options: EngineOptions) -> MappingEngine {
    MappingEngine::new(Arc::new(FieldCatalog::builtin()), options).with_directory(directory())
}

fn alice() -> CallerIdentity {
    CallerIdentity::new("alice")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|v| (*v).to_string()).collect()
}

fn single(engine: &MappingEngine, header: &str, values: &[&str]) -> MappingSuggestion {
    let headers = strings(&[header]);
    let samples = vec![ColumnSample::new(header, strings(values))];
    engine
        .suggest(&samples, &headers)
        .expect("suggest")
        .remove(0)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn maps_a_typical_export() {
    let request = MapColumnsRequest {
        headers: strings(&["Customer Name", "Email", "MRR", "Notes"]),
        sample_rows: vec![
            strings(&["Acme Corp", "ops@acme.io", "1200", "call back"]),
            strings(&["Globex", "it@globex.com", "850.50", ""]),
        ],
        workspace_id: WORKSPACE.to_string(),
    };
    let response = engine().handle(&request, Some(&alice())).expect("handle");
    assert!(response.success);

    let fields: Vec<_> = response
        .suggestions
        .iter()
        .map(|s| (s.original_column.as_str(), s.suggested_field.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("Customer Name", "customer_name"),
            ("Email", "customer_email"),
            ("MRR", "mrr"),
            ("Notes", UNMAPPED),
        ]
    );
    assert_close(response.suggestions[0].confidence, 0.95);
    let notes = &response.suggestions[3];
    assert_close(notes.confidence, 0.0);
    assert_eq!(notes.reasoning, NO_MATCH_REASONING);
}

#[test]
fn one_suggestion_per_header_in_order_with_duplicates() {
    let headers = strings(&["email", "email", "", "zz9"]);
    let suggestions = engine()
        .map_columns(&headers, &[], Some(&alice()), WORKSPACE)
        .expect("map");
    assert_eq!(suggestions.len(), headers.len());
    for (header, suggestion) in headers.iter().zip(&suggestions) {
        assert_eq!(&suggestion.original_column, header);
    }
    assert_eq!(suggestions[0], suggestions[1]);
    assert_eq!(suggestions[2].suggested_field, UNMAPPED);
}

#[test]
fn literal_overrides_win() {
    let engine = engine();
    let cli = single(&engine, "cli_name", &["Acme"]);
    assert_eq!(cli.suggested_field, "customer_name");
    assert_close(cli.confidence, 0.90);

    let app = single(&engine, "App Name", &["Dashboards"]);
    assert_eq!(app.suggested_field, "feature_usage");
    assert_close(app.confidence, 0.85);
}

#[test]
fn excluded_headers_never_reach_customer_name() {
    let engine = engine();
    for header in ["company_name", "product_name", "file_name", "plan_name", "user_id"] {
        let suggestion = single(&engine, header, &["x"]);
        assert_ne!(suggestion.suggested_field, "customer_name", "{header}");
    }
}

#[test]
fn email_content_identifies_contact_column() {
    let suggestion = single(&engine(), "contact", &["a@x.com", "b@y.com"]);
    assert_eq!(suggestion.suggested_field, "customer_email");
    assert!(suggestion.confidence >= 0.9);
}

#[test]
fn numeric_ids_become_low_confidence_sentinels() {
    let suggestion = single(&engine(), "row_id", &["1", "2", "3"]);
    assert_eq!(suggestion.suggested_field, UNMAPPED);
    assert_close(suggestion.confidence, 0.3);
    assert_eq!(suggestion.reasoning, "numeric ID field, typically not mapped");
}

#[test]
fn week_numbers_map_to_last_activity() {
    let suggestion = single(&engine(), "week", &["202501", "202502"]);
    assert_eq!(suggestion.suggested_field, "last_activity");
    assert_close(suggestion.confidence, 0.85);
}

#[test]
fn non_ascii_digits_do_not_trigger_shape_detectors() {
    let engine = engine();
    for (header, value) in [("row_id", "١٢٣"), ("week", "２０２５０１")] {
        let suggestion = single(&engine, header, &[value]);
        assert_eq!(suggestion.suggested_field, UNMAPPED, "{header}");
        assert_close(suggestion.confidence, 0.0);
        assert_eq!(suggestion.reasoning, NO_MATCH_REASONING);
    }
}

#[test]
fn strong_header_match_suppresses_week_detector() {
    let suggestion = single(&engine(), "last_activity_week", &["202501"]);
    assert_eq!(suggestion.suggested_field, "last_activity");
    assert_close(suggestion.confidence, 0.95);
}

#[test]
fn fallback_replaces_weak_heuristics() {
    let client = Scripted::new(Ok(
        r#"{"field":"industry","confidence":0.8,"reasoning":"sector names"}"#.to_string(),
    ));
    let engine = engine().with_completion_client(client.clone());
    assert!(engine.fallback_available());

    let suggestion = single(&engine, "zz9", &["Healthcare", "Fintech"]);
    assert_eq!(suggestion.suggested_field, "industry");
    assert_close(suggestion.confidence, 0.8);
    assert_eq!(suggestion.reasoning, "sector names");
    assert_eq!(client.calls(), 1);
}

#[test]
fn fallback_prompt_uses_configured_overrides() {
    let client = Scripted::new(Ok(r#"{"field":"mrr","confidence":0.7}"#.to_string()));
    let overrides = LiteralOverrides::new(vec![OverrideRule {
        header: "acct_rev",
        field: "mrr",
        confidence: 0.9,
    }]);
    let engine =
        engine().with_fallback(FallbackClassifier::new(client.clone()).with_overrides(overrides));
    assert!(engine.fallback_available());

    let suggestion = single(&engine, "zz9", &["1200"]);
    assert_eq!(suggestion.suggested_field, "mrr");

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- \"acct_rev\" always means mrr"));
    assert!(!prompts[0].contains("\"cli_name\" always means"));
}

#[test]
fn fallback_unmapped_answer_is_emitted() {
    let client = Scripted::new(Ok(
        r#"{"field":"unmapped","confidence":0.8,"reasoning":"free-form notes"}"#.to_string(),
    ));
    let engine = engine().with_completion_client(client);
    let suggestion = single(&engine, "zz9", &["call back"]);
    assert_eq!(suggestion.suggested_field, UNMAPPED);
    assert_close(suggestion.confidence, 0.8);
    assert_eq!(suggestion.reasoning, "free-form notes");
}

#[test]
fn fallback_is_skipped_for_strong_matches() {
    let client = Scripted::new(Ok(r#"{"field":"mrr","confidence":1.0}"#.to_string()));
    let engine = engine().with_completion_client(client.clone());
    let suggestion = single(&engine, "email", &["a@x.com"]);
    assert_eq!(suggestion.suggested_field, "customer_email");
    assert_eq!(client.calls(), 0);
}

#[test]
fn fallback_can_be_disabled() {
    let client = Scripted::new(Ok(r#"{"field":"industry","confidence":0.9}"#.to_string()));
    let engine = engine_with(EngineOptions::default().with_fallback_enabled(false))
        .with_completion_client(client.clone());
    assert!(!engine.fallback_available());
    let suggestion = single(&engine, "zz9", &["Healthcare"]);
    assert_eq!(suggestion.suggested_field, UNMAPPED);
    assert_eq!(client.calls(), 0);
}

#[test]
fn failing_fallback_degrades_gracefully() {
    let client = Scripted::new(Err(CompletionError::Timeout));
    let engine = engine().with_completion_client(client.clone());
    let headers = strings(&["email", "zz9"]);
    let rows = vec![strings(&["a@x.com", "Healthcare"])];
    let suggestions = engine
        .map_columns(&headers, &rows, Some(&alice()), WORKSPACE)
        .expect("map");
    assert_eq!(suggestions[0].suggested_field, "customer_email");
    assert_eq!(suggestions[1].suggested_field, UNMAPPED);
    assert_close(suggestions[1].confidence, 0.0);
    assert_eq!(suggestions[1].reasoning, NO_MATCH_REASONING);
    assert_eq!(client.calls(), 1);
}

#[test]
fn garbage_fallback_answer_is_ignored() {
    let client = Scripted::new(Ok("I think it is probably revenue".to_string()));
    let engine = engine().with_completion_client(client);
    let suggestion = single(&engine, "zz9", &["Healthcare"]);
    assert_eq!(suggestion.suggested_field, UNMAPPED);
    assert_close(suggestion.confidence, 0.0);
}

#[test]
fn unauthorized_caller_is_rejected_before_any_work() {
    let client = Scripted::new(Ok(r#"{"field":"industry","confidence":0.9}"#.to_string()));
    let engine = engine().with_completion_client(client.clone());
    let headers = strings(&["zz9"]);

    let err = engine
        .map_columns(&headers, &[], Some(&CallerIdentity::new("mallory")), WORKSPACE)
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let err = engine
        .map_columns(&headers, &[], None, WORKSPACE)
        .unwrap_err();
    assert_eq!(err, MappingError::Unauthenticated);
    assert_eq!(client.calls(), 0);
}

#[test]
fn super_admin_reaches_foreign_workspace() {
    let suggestions = engine()
        .map_columns(
            &strings(&["email"]),
            &[],
            Some(&CallerIdentity::new("ops")),
            "ws-other",
        )
        .expect("map");
    assert_eq!(suggestions.len(), 1);
}

#[test]
fn engine_without_directory_rejects_callers() {
    let engine = MappingEngine::new(Arc::new(FieldCatalog::builtin()), EngineOptions::default());
    let err = engine
        .map_columns(&strings(&["email"]), &[], Some(&alice()), WORKSPACE)
        .unwrap_err();
    assert!(matches!(err, MappingError::Forbidden { .. }));
}

#[test]
fn empty_header_list_is_invalid() {
    let err = engine()
        .map_columns(&[], &[], Some(&alice()), WORKSPACE)
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(matches!(err, MappingError::InvalidInput(_)));
}

#[test]
fn sample_limit_caps_values() {
    let options = EngineOptions {
        sample_limit: 1,
        ..EngineOptions::default()
    };
    let headers = strings(&["contact"]);
    // Only the first non-empty value is inspected.
    let rows = vec![strings(&[""]), strings(&["n/a"]), strings(&["a@x.com"])];
    let suggestions = engine_with(options)
        .map_columns(&headers, &rows, Some(&alice()), WORKSPACE)
        .expect("map");
    assert_eq!(suggestions[0].suggested_field, UNMAPPED);
}

#[test]
fn workers_preserve_order_and_results() {
    let headers = strings(&[
        "Customer Name",
        "Email",
        "MRR",
        "week",
        "row_id",
        "Industry",
        "renewal_date",
        "zz9",
        "cli_name",
    ]);
    let rows = vec![strings(&[
        "Acme", "a@x.com", "10", "202501", "7", "Retail", "2025-01-31", "?", "Acme",
    ])];
    let sequential = engine()
        .map_columns(&headers, &rows, Some(&alice()), WORKSPACE)
        .expect("sequential");
    let parallel = engine_with(EngineOptions::default().with_workers(4))
        .map_columns(&headers, &rows, Some(&alice()), WORKSPACE)
        .expect("parallel");
    assert_eq!(sequential, parallel);
}

#[test]
fn classifier_panic_fails_the_batch() {
    for workers in [1, 3] {
        let pipeline = HeuristicPipeline::new(vec![Stage {
            classifier: Box::new(Panicking),
            gate: StageGate::Always,
            short_circuit: false,
        }]);
        let engine = engine_with(EngineOptions::default().with_workers(workers))
            .with_pipeline(pipeline);
        let headers = strings(&["email", "boom", "mrr"]);
        let err = engine
            .map_columns(&headers, &[], Some(&alice()), WORKSPACE)
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), "Failed to generate mapping suggestions");
    }
}

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_ ]{0,16}",
        Just("email".to_string()),
        Just("cli_name".to_string()),
        Just("row_id".to_string()),
        Just("week".to_string()),
        Just("Company Name".to_string()),
    ]
}

fn column_strategy() -> impl Strategy<Value = ColumnSample> {
    (
        header_strategy(),
        prop::collection::vec("[a-z0-9@.$,/ -]{0,12}", 0..5),
    )
        .prop_map(|(header, values)| ColumnSample::new(header, values))
}

proptest! {
    #[test]
    fn suggestions_are_complete_bounded_and_deterministic(
        samples in prop::collection::vec(column_strategy(), 1..8)
    ) {
        let engine = engine();
        let headers: Vec<String> = samples.iter().map(|s| s.header.clone()).collect();
        let first = engine.suggest(&samples, &headers).unwrap();
        let second = engine.suggest(&samples, &headers).unwrap();

        prop_assert_eq!(first.len(), samples.len());
        prop_assert_eq!(&first, &second);
        for (sample, suggestion) in samples.iter().zip(&first) {
            prop_assert_eq!(&suggestion.original_column, &sample.header);
            prop_assert!((0.0..=1.0).contains(&suggestion.confidence));
            prop_assert!(
                suggestion.suggested_field == UNMAPPED
                    || engine.catalog().contains(&suggestion.suggested_field)
            );
        }
    }

    #[test]
    fn failing_fallback_never_changes_heuristic_results(
        samples in prop::collection::vec(column_strategy(), 1..6)
    ) {
        let headers: Vec<String> = samples.iter().map(|s| s.header.clone()).collect();
        let plain = engine().suggest(&samples, &headers).unwrap();
        let failing = engine()
            .with_completion_client(Scripted::new(Err(CompletionError::Unavailable)))
            .suggest(&samples, &headers)
            .unwrap();
        prop_assert_eq!(plain, failing);
    }
}
