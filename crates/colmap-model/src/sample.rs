//! Per-column input samples.

use serde::{Deserialize, Serialize};

/// Number of sample values taken per column by default.
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// Header and leading non-empty values of one source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSample {
    /// Column name as it appeared in the source file.
    pub header: String,
    /// Up to `limit` non-empty values in file order.
    pub values: Vec<String>,
}

impl ColumnSample {
    pub fn new(header: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            header: header.into(),
            values,
        }
    }

    /// Builds one sample per header from row-major data.
    ///
    /// Blank cells and cells missing from short rows are skipped; at most
    /// `limit` values are kept per column.
    pub fn from_rows(headers: &[String], rows: &[Vec<String>], limit: usize) -> Vec<Self> {
        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let values = rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.trim())
                    .filter(|cell| !cell.is_empty())
                    .take(limit)
                    .map(str::to_string)
                    .collect();
                Self::new(header.clone(), values)
            })
            .collect()
    }
}
