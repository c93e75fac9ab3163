//! Error taxonomy for tracker operations.

use thiserror::Error;

use crate::types::{IssueKey, VersionId};

/// All errors a [`crate::TrackerGateway`] implementation may surface.
///
/// Every variant names the offending key(s) so callers can tell "nothing to
/// do" apart from "something is broken". The kinds are stable: callers match
/// on them for retry and exit-code decisions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The key does not resolve to the expected entity (epic, issue, or
    /// version).
    #[error("'{key}' not found in the tracker")]
    NotFound { key: String },

    /// Transport-level failure: the tracker could not be reached or answered
    /// with a server error.
    #[error("tracker unavailable: {detail}")]
    TrackerUnavailable { detail: String },

    /// The tracker rejected the credentials or the operation.
    #[error("permission denied: {detail}")]
    PermissionDenied { detail: String },

    /// The target version does not exist in the issue's project.
    #[error("version '{version}' does not exist in the project of '{key}'")]
    InvalidVersion { key: IssueKey, version: VersionId },
}

impl TrackerError {
    /// Convenience constructor for [`TrackerError::NotFound`].
    pub fn not_found(key: impl Into<String>) -> Self {
        TrackerError::NotFound { key: key.into() }
    }

    /// Convenience constructor for [`TrackerError::TrackerUnavailable`].
    pub fn unavailable(detail: impl Into<String>) -> Self {
        TrackerError::TrackerUnavailable {
            detail: detail.into(),
        }
    }
}
