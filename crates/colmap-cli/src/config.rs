//! `colmap.toml` loading.
//!
//! ```toml
//! catalog = "fields.toml"
//! directory = "members.toml"
//!
//! [engine]
//! sample_limit = 10
//! fallback_threshold = 0.5
//! workers = 4
//!
//! [llm]
//! model = "gpt-4o-mini"
//! timeout_secs = 5
//! ```
//!
//! The API key is best left to `COLMAP_LLM_API_KEY`; environment variables
//! override the `[llm]` table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colmap_llm::LlmConfig;
use colmap_map::EngineOptions;
use serde::Deserialize;

/// Application configuration assembled from the config file and environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineOptions,
    pub llm: LlmConfig,
    /// Custom field catalog; the built-in catalog when unset.
    pub catalog: Option<PathBuf>,
    /// Workspace membership file.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("parse config")
    }

    /// Loads the config file (if any) and applies environment overrides.
    ///
    /// Relative `catalog` and `directory` paths resolve against the config
    /// file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("read config {}", path.display()))?;
                let mut config = Self::from_toml_str(&source)
                    .with_context(|| format!("load config {}", path.display()))?;
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                config.catalog = config.catalog.map(|p| base.join(p));
                config.directory = config.directory.map(|p| base.join(p));
                config
            }
            None => Self::default(),
        };
        config.llm = config
            .llm
            .with_env_overrides(|key| std::env::var(key).ok())
            .context("read COLMAP_LLM_* environment")?;
        Ok(config)
    }
}
