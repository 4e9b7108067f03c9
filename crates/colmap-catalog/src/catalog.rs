use std::collections::BTreeSet;
use std::path::Path;

use colmap_model::{FieldDefinition, UNMAPPED};
use serde::Deserialize;

use crate::builtin::builtin_fields;
use crate::error::CatalogError;

/// Immutable registry of canonical target fields.
///
/// Built once at startup and shared read-only between mapping requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<FieldDefinition>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

impl FieldCatalog {
    /// Builds a catalog after validating every field.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, CatalogError> {
        validate_fields(&fields)?;
        Ok(Self { fields })
    }

    /// Returns the compiled-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            fields: builtin_fields(),
        }
    }

    /// Parses a catalog from `[[fields]]` TOML tables.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(source).map_err(|source| CatalogError::Toml { source })?;
        Self::new(file.fields)
    }

    /// Loads a catalog from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_toml_str(&source)
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.canonical_name == name)
    }

    /// Declaration index of a field, used for deterministic tie-breaks.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.canonical_name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_fields(fields: &[FieldDefinition]) -> Result<(), CatalogError> {
    if fields.is_empty() {
        return Err(CatalogError::Empty);
    }
    let mut seen = BTreeSet::new();
    for field in fields {
        let name = field.canonical_name.trim();
        if name.is_empty() {
            return Err(CatalogError::invalid("", "canonical name is empty"));
        }
        if name != field.canonical_name {
            return Err(CatalogError::invalid(
                &field.canonical_name,
                "canonical name has surrounding whitespace",
            ));
        }
        if name == UNMAPPED {
            return Err(CatalogError::invalid(name, "name is reserved"));
        }
        if !seen.insert(name) {
            return Err(CatalogError::DuplicateField {
                name: name.to_string(),
            });
        }
        for (kind, entries) in [
            ("keyword", &field.keywords),
            ("example", &field.examples),
            ("exclude pattern", &field.exclude_patterns),
        ] {
            for entry in entries {
                if entry.is_empty() {
                    return Err(CatalogError::invalid(name, format!("empty {kind}")));
                }
                if entry.to_lowercase() != *entry {
                    return Err(CatalogError::invalid(
                        name,
                        format!("{kind} '{entry}' must be lowercase"),
                    ));
                }
            }
        }
    }
    Ok(())
}
