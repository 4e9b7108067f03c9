//! Data model for column-to-field mapping.
//!
//! Shared by the catalog, the mapping engine and the command-line front end.

pub mod error;
pub mod field;
pub mod mapping;
pub mod request;
pub mod sample;

pub use error::{MappingError, Result};
pub use field::{ContentHint, FieldDefinition};
pub use mapping::{
    ConfidenceLevel, ConfidenceThresholds, MappingSuggestion, MappingSummary, UNMAPPED,
};
pub use request::{ErrorResponse, MapColumnsRequest, MapColumnsResponse};
pub use sample::{ColumnSample, DEFAULT_SAMPLE_LIMIT};
