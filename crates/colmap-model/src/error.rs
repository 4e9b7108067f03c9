//! Error types for mapping requests.

use thiserror::Error;

use crate::request::ErrorResponse;

/// Errors that reject a whole mapping request.
///
/// Failures of the model fallback never surface here; they degrade to
/// heuristic-only results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// No caller identity was supplied.
    #[error("caller is not authenticated")]
    Unauthenticated,

    /// Caller is neither an active workspace member nor a super-admin.
    #[error("caller has no access to workspace '{workspace_id}'")]
    Forbidden {
        /// Workspace the caller asked to map data for.
        workspace_id: String,
    },

    /// Request is missing required data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure inside the mapping pipeline.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MappingError {
    /// HTTP status code a transport layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden { .. } => 403,
            Self::InvalidInput(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Returns a short message suitable for display to the caller.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthenticated => "Unauthorized",
            Self::Forbidden { .. } => "Forbidden",
            Self::InvalidInput(_) => "Invalid request",
            Self::Internal(_) => "Failed to generate mapping suggestions",
        }
    }

    /// Builds the error body returned to the caller.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            Self::Unauthenticated => None,
            Self::Forbidden { workspace_id } => {
                Some(format!("no active membership in workspace '{workspace_id}'"))
            }
            Self::InvalidInput(message) | Self::Internal(message) => Some(message.clone()),
        };
        ErrorResponse {
            error: self.user_message().to_string(),
            details,
        }
    }
}

/// Result type alias for mapping requests.
pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(MappingError::Unauthenticated.status_code(), 401);
        assert_eq!(
            MappingError::Forbidden {
                workspace_id: "ws".to_string()
            }
            .status_code(),
            403
        );
        assert_eq!(MappingError::InvalidInput("x".to_string()).status_code(), 400);
        assert_eq!(MappingError::Internal("x".to_string()).status_code(), 500);
    }

    #[test]
    fn internal_error_response_carries_details() {
        let response = MappingError::Internal("worker panicked".to_string()).to_response();
        assert_eq!(response.error, "Failed to generate mapping suggestions");
        assert_eq!(response.details.as_deref(), Some("worker panicked"));
    }
}
