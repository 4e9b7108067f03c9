use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML catalog: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    #[error("catalog defines no fields")]
    Empty,

    #[error("duplicate field in catalog: {name}")]
    DuplicateField { name: String },

    #[error("invalid field '{name}': {message}")]
    InvalidField { name: String, message: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
