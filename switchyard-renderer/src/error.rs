//! Error types for switchyard-renderer.

use thiserror::Error;

use switchyard_core::{ProjectKey, TrackerError};

/// All errors that can arise from manifest rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A gateway call failed mid-render. The manifest fails fast rather
    /// than presenting a silently truncated release view; the failing
    /// project is named so the caller knows what to fix.
    #[error("tracker unreachable while rendering '{project}': {source}")]
    Tracker {
        project: ProjectKey,
        #[source]
        source: TrackerError,
    },

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building the tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
