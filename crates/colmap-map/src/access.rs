//! Caller authorization against the workspace directory.
//!
//! Identity and tenancy live outside the engine. [`WorkspaceDirectory`] is the
//! narrow view the engine needs: does the caller hold an active membership in
//! the workspace, or super-admin standing.

use std::path::{Path, PathBuf};

use colmap_model::MappingError;
use serde::{Deserialize, Serialize};

/// Authenticated caller as resolved by the surrounding auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceRole {
    Owner,
    Admin,
    #[default]
    Member,
    Viewer,
}

/// One user's standing in one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: String,
    pub workspace_id: String,
    #[serde(default)]
    pub role: WorkspaceRole,
    /// Suspended or invited-but-not-joined members are inactive.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Read-only view of the identity and tenancy store.
pub trait WorkspaceDirectory: Send + Sync {
    /// Membership of `user_id` in `workspace_id`, if any.
    fn membership(&self, user_id: &str, workspace_id: &str) -> Option<Membership>;

    /// Whether `user_id` may act on every workspace.
    fn is_super_admin(&self, user_id: &str) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML directory: {source}")]
    Toml {
        #[source]
        source: toml::de::Error,
    },
}

/// Directory backed by a fixed list, for the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    pub super_admins: Vec<String>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_member(mut self, user_id: &str, workspace_id: &str, role: WorkspaceRole) -> Self {
        self.memberships.push(Membership {
            user_id: user_id.to_string(),
            workspace_id: workspace_id.to_string(),
            role,
            active: true,
        });
        self
    }

    #[must_use]
    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.memberships.push(membership);
        self
    }

    #[must_use]
    pub fn with_super_admin(mut self, user_id: &str) -> Self {
        self.super_admins.push(user_id.to_string());
        self
    }

    /// Parses `super_admins = [...]` and `[[memberships]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, DirectoryError> {
        toml::from_str(source).map_err(|source| DirectoryError::Toml { source })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, DirectoryError> {
        let source = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

impl WorkspaceDirectory for InMemoryDirectory {
    fn membership(&self, user_id: &str, workspace_id: &str) -> Option<Membership> {
        self.memberships
            .iter()
            .find(|m| m.user_id == user_id && m.workspace_id == workspace_id)
            .cloned()
    }

    fn is_super_admin(&self, user_id: &str) -> bool {
        self.super_admins.iter().any(|admin| admin == user_id)
    }
}

/// Checks that `caller` may map data for `workspace_id`.
///
/// Without a directory no caller can be resolved, so every authenticated
/// caller is rejected.
pub fn authorize(
    directory: Option<&dyn WorkspaceDirectory>,
    caller: Option<&CallerIdentity>,
    workspace_id: &str,
) -> Result<(), MappingError> {
    let Some(caller) = caller else {
        return Err(MappingError::Unauthenticated);
    };
    if caller.user_id.trim().is_empty() {
        return Err(MappingError::Unauthenticated);
    }
    let forbidden = || MappingError::Forbidden {
        workspace_id: workspace_id.to_string(),
    };
    let directory = directory.ok_or_else(forbidden)?;
    if directory.is_super_admin(&caller.user_id) {
        return Ok(());
    }
    match directory.membership(&caller.user_id, workspace_id) {
        Some(membership) if membership.active => Ok(()),
        _ => Err(forbidden()),
    }
}
