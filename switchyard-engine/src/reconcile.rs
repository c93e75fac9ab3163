//! Plan computation — the pure half of the engine.

use switchyard_core::{Action, Epic, IssueKey, TrackerGateway};

use crate::error::EngineError;

/// A loaded epic paired with the actions that would reconcile it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub epic: Epic,
    pub actions: Vec<Action>,
}

impl Plan {
    /// True when every story already matches the canonical version.
    pub fn is_clean(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Fetch `key` (with children populated) and compute its reconciliation plan.
///
/// Fails immediately on `NotFound` / `TrackerUnavailable` — a plan over a
/// partial snapshot would be worse than no plan.
pub fn plan_epic(gateway: &dyn TrackerGateway, key: &IssueKey) -> Result<Plan, EngineError> {
    let epic = gateway.get_epic(key)?;
    let actions = compute_actions(&epic);
    tracing::debug!("planned {} action(s) for {}", actions.len(), key);
    Ok(Plan { epic, actions })
}

/// Compute the minimal action sequence that makes every child story's fix
/// version consistent with the epic's own.
///
/// The epic's declared version is trusted as ground truth; whether that
/// version is itself correct is out of scope (a known limitation, not
/// something this function second-guesses). Consequences:
///
/// - epic without a version → a single `FlagBlocked` for the epic, nothing
///   per story;
/// - epic on a *released* version → a single `FlagBlocked` as well, since
///   released versions accept no new work;
/// - story without a version → `Assign` to the canonical version;
/// - story already at the canonical version → nothing emitted;
/// - story on a *released* version → `FlagConflict`, never auto-moved;
/// - any other mismatch → `Reassign`.
///
/// Output order follows story order, so re-running after a successful apply
/// yields no new `Assign`/`Reassign` entries; `FlagConflict` entries persist
/// until the released-version conflict is resolved by hand.
pub fn compute_actions(epic: &Epic) -> Vec<Action> {
    let canonical = match epic.canonical_version() {
        Some(version) => version,
        None => {
            return vec![Action::FlagBlocked {
                key: epic.key().clone(),
                reason: "epic has no fix version".to_string(),
            }]
        }
    };
    if canonical.released {
        return vec![Action::FlagBlocked {
            key: epic.key().clone(),
            reason: "epic fix version is already released".to_string(),
        }];
    }

    let mut actions = Vec::new();
    for story in &epic.stories {
        match &story.fix_version {
            None => actions.push(Action::Assign {
                key: story.key.clone(),
                to: canonical.id.clone(),
            }),
            Some(current) if current.id == canonical.id => {}
            Some(current) if current.released => actions.push(Action::FlagConflict {
                key: story.key.clone(),
                from: current.id.clone(),
                to: canonical.id.clone(),
                reason: "cannot move released work".to_string(),
            }),
            Some(current) => actions.push(Action::Reassign {
                key: story.key.clone(),
                from: current.id.clone(),
                to: canonical.id.clone(),
            }),
        }
    }
    actions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
