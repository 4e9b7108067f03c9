//! Request and response bodies of the mapping operation.

use serde::{Deserialize, Serialize};

use crate::mapping::MappingSuggestion;

/// Body of a column-mapping request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapColumnsRequest {
    /// Source column names in file order.
    pub headers: Vec<String>,
    /// Leading data rows, aligned with `headers`.
    #[serde(default)]
    pub sample_rows: Vec<Vec<String>>,
    /// Workspace the data belongs to.
    pub workspace_id: String,
}

/// Successful response: one suggestion per header, in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapColumnsResponse {
    pub success: bool,
    pub suggestions: Vec<MappingSuggestion>,
}

impl MapColumnsResponse {
    pub fn new(suggestions: Vec<MappingSuggestion>) -> Self {
        Self {
            success: true,
            suggestions,
        }
    }
}

/// Error body returned when the request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
