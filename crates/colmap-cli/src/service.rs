//! Engine assembly and request execution shared by the `colmap` commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colmap_catalog::FieldCatalog;
use colmap_llm::ChatCompletionClient;
use colmap_map::{CallerIdentity, InMemoryDirectory, MappingEngine};
use colmap_model::{MapColumnsRequest, MapColumnsResponse, MappingError};

use crate::config::AppConfig;

/// Exit code for operational failures (unreadable files, bad config).
pub const EXIT_FAILURE: i32 = 1;

pub fn load_request(path: &Path) -> Result<MapColumnsRequest> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parse request {}", path.display()))
}

/// Loads a custom catalog, or the built-in one when `path` is `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<FieldCatalog> {
    match path {
        Some(path) => FieldCatalog::from_toml_file(path)
            .with_context(|| format!("load catalog {}", path.display())),
        None => Ok(FieldCatalog::builtin()),
    }
}

pub fn load_directory(path: Option<&Path>) -> Result<Option<InMemoryDirectory>> {
    path.map(|path| {
        InMemoryDirectory::from_toml_file(path)
            .with_context(|| format!("load directory {}", path.display()))
    })
    .transpose()
}

/// Builds an engine from configuration.
///
/// A completion client is attached only when the fallback is enabled and an
/// API key is available.
pub fn build_engine(
    config: &AppConfig,
    catalog: FieldCatalog,
    directory: Option<InMemoryDirectory>,
) -> Result<MappingEngine> {
    let mut engine = MappingEngine::new(Arc::new(catalog), config.engine.clone());
    if let Some(directory) = directory {
        engine = engine.with_directory(Arc::new(directory));
    }
    if config.engine.fallback_enabled
        && let Some(client) =
            ChatCompletionClient::from_config(&config.llm).context("configure completion client")?
    {
        tracing::info!(
            model = client.model(),
            endpoint = client.endpoint(),
            "language model fallback enabled"
        );
        engine = engine.with_completion_client(Arc::new(client));
    }
    Ok(engine)
}

pub fn execute(
    engine: &MappingEngine,
    request: &MapColumnsRequest,
    caller: Option<&CallerIdentity>,
) -> std::result::Result<MapColumnsResponse, MappingError> {
    let outcome = engine.handle(request, caller);
    if let Err(error) = &outcome {
        tracing::error!(%error, workspace_id = %request.workspace_id, "mapping request rejected");
    }
    outcome
}

/// Pretty JSON body for a request outcome: the response, or the error body.
pub fn render_outcome(
    outcome: &std::result::Result<MapColumnsResponse, MappingError>,
) -> Result<String> {
    let json = match outcome {
        Ok(response) => serde_json::to_string_pretty(response),
        Err(error) => serde_json::to_string_pretty(&error.to_response()),
    };
    json.context("serialize response")
}

/// Process exit code for a rejected request, grouped by error class.
pub fn exit_code(error: &MappingError) -> i32 {
    match error.status_code() {
        400 => 2,
        401 => 3,
        403 => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_class() {
        assert_eq!(exit_code(&MappingError::InvalidInput("x".to_string())), 2);
        assert_eq!(exit_code(&MappingError::Unauthenticated), 3);
        assert_eq!(
            exit_code(&MappingError::Forbidden {
                workspace_id: "w".to_string()
            }),
            4
        );
        assert_eq!(exit_code(&MappingError::Internal("x".to_string())), 5);
    }

    #[test]
    fn builtin_catalog_without_path() {
        assert_eq!(load_catalog(None).unwrap(), FieldCatalog::builtin());
        assert!(load_directory(None).unwrap().is_none());
    }

    #[test]
    fn engine_without_key_has_no_fallback() {
        let engine = build_engine(&AppConfig::default(), FieldCatalog::builtin(), None).unwrap();
        assert!(!engine.fallback_available());
    }
}
