//! Error types for switchyard-engine.

use thiserror::Error;

use switchyard_core::{IssueKey, TrackerError};

/// All errors that can arise from reconciliation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An error from the tracker gateway.
    #[error("tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// An informational action (`FlagConflict` / `FlagBlocked`) was passed
    /// to apply. That is a caller bug, reported rather than skipped.
    #[error("action for '{key}' is informational and cannot be applied")]
    PreconditionFailed { key: IssueKey },

    /// Summary for a batch where some actions failed while others applied.
    /// The per-action detail lives in the accompanying [`crate::ApplyReport`].
    #[error("{failed} of {total} actions failed to apply")]
    PartialApply { failed: usize, total: usize },
}
