//! Action application — the side-effecting half of the engine.
//!
//! Actions are applied independently: one failure never aborts the batch,
//! and outcomes come back in input order. There is no rollback — if the
//! host aborts mid-batch, already-applied actions stay applied (the tracker
//! has no multi-issue transaction primitive). Retry policy belongs to the
//! gateway or a decorator around it, never here.

use switchyard_core::{Action, TrackerGateway};

use crate::error::EngineError;

/// Outcome of applying a single action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: Action,
    pub result: Result<(), EngineError>,
}

impl ActionOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-action results of one [`apply_actions`] batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub outcomes: Vec<ActionOutcome>,
}

impl ApplyReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.applied()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// The batch summary: `Ok` for a clean run, otherwise
    /// [`EngineError::PartialApply`]. The per-action detail stays available
    /// on the report either way, so callers can retry just the failed subset.
    pub fn summary(&self) -> Result<(), EngineError> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(EngineError::PartialApply {
                failed,
                total: self.outcomes.len(),
            }),
        }
    }
}

/// Apply `Assign`/`Reassign` actions through the gateway, one at a time.
///
/// Informational actions (`FlagConflict` / `FlagBlocked`) in the input are
/// a programming error: they produce a `PreconditionFailed` outcome and no
/// gateway call, rather than being silently dropped.
pub fn apply_actions(gateway: &dyn TrackerGateway, actions: &[Action]) -> ApplyReport {
    let mut outcomes = Vec::with_capacity(actions.len());
    for action in actions {
        let result = apply_one(gateway, action);
        match &result {
            Ok(()) => tracing::info!("applied action for {}", action.key()),
            Err(err) => tracing::warn!("apply failed for {}: {err}", action.key()),
        }
        outcomes.push(ActionOutcome {
            action: action.clone(),
            result,
        });
    }
    ApplyReport { outcomes }
}

fn apply_one(gateway: &dyn TrackerGateway, action: &Action) -> Result<(), EngineError> {
    match action {
        Action::Assign { key, to } | Action::Reassign { key, to, .. } => {
            gateway.assign_fix_version(key, to)?;
            Ok(())
        }
        Action::FlagConflict { key, .. } | Action::FlagBlocked { key, .. } => {
            Err(EngineError::PreconditionFailed { key: key.clone() })
        }
    }
}
