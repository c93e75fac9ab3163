//! End-to-end engine tests against an in-memory tracker fake.
//!
//! The fake records every `assign_fix_version` call and can be scripted to
//! fail for specific issues, which is enough to exercise plan propagation,
//! partial-apply semantics, and the conflict guarantees.

use std::cell::RefCell;

use switchyard_core::{
    Action, Epic, FixVersion, Issue, IssueKey, IssueKind, IssueStatus, ProjectKey, TrackerError,
    TrackerGateway, VersionId,
};
use switchyard_engine::{apply_actions, compute_actions, plan_epic, EngineError};

// ---------------------------------------------------------------------------
// Fake tracker
// ---------------------------------------------------------------------------

struct FakeTracker {
    epic: RefCell<Option<Epic>>,
    versions: Vec<FixVersion>,
    assigned: RefCell<Vec<(IssueKey, VersionId)>>,
    fail_assign_for: Vec<IssueKey>,
}

impl FakeTracker {
    fn with_epic(epic: Epic, versions: Vec<FixVersion>) -> Self {
        FakeTracker {
            epic: RefCell::new(Some(epic)),
            versions,
            assigned: RefCell::new(vec![]),
            fail_assign_for: vec![],
        }
    }

    fn empty() -> Self {
        FakeTracker {
            epic: RefCell::new(None),
            versions: vec![],
            assigned: RefCell::new(vec![]),
            fail_assign_for: vec![],
        }
    }

    fn assigned_keys(&self) -> Vec<IssueKey> {
        self.assigned.borrow().iter().map(|(k, _)| k.clone()).collect()
    }
}

impl TrackerGateway for FakeTracker {
    fn get_epic(&self, key: &IssueKey) -> Result<Epic, TrackerError> {
        match self.epic.borrow().as_ref() {
            Some(epic) if epic.key() == key => Ok(epic.clone()),
            _ => Err(TrackerError::not_found(key.0.clone())),
        }
    }

    fn get_fix_version(&self, key: &IssueKey) -> Result<Option<FixVersion>, TrackerError> {
        Ok(self.epic.borrow().as_ref().and_then(|epic| {
            epic.stories
                .iter()
                .find(|s| &s.key == key)
                .and_then(|s| s.fix_version.clone())
        }))
    }

    fn assign_fix_version(&self, key: &IssueKey, version: &VersionId) -> Result<(), TrackerError> {
        if self.fail_assign_for.contains(key) {
            return Err(TrackerError::unavailable("scripted outage"));
        }
        let resolved = self
            .versions
            .iter()
            .find(|v| &v.id == version)
            .cloned()
            .ok_or_else(|| TrackerError::InvalidVersion {
                key: key.clone(),
                version: version.clone(),
            })?;
        // Mirror the write into the stored epic so a re-fetch sees it.
        if let Some(epic) = self.epic.borrow_mut().as_mut() {
            for story in &mut epic.stories {
                if &story.key == key {
                    story.fix_version = Some(resolved.clone());
                }
            }
        }
        self.assigned.borrow_mut().push((key.clone(), version.clone()));
        Ok(())
    }

    fn list_unreleased_versions(
        &self,
        _project: &ProjectKey,
    ) -> Result<Vec<FixVersion>, TrackerError> {
        Ok(self.versions.iter().filter(|v| !v.released).cloned().collect())
    }

    fn list_epics_for_version(
        &self,
        _project: &ProjectKey,
        _version: &VersionId,
    ) -> Result<Vec<Epic>, TrackerError> {
        Ok(self.epic.borrow().clone().into_iter().collect())
    }

    fn add_comment(&self, _key: &IssueKey, _body: &str) -> Result<(), TrackerError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn version(id: &str, released: bool) -> FixVersion {
    FixVersion {
        id: VersionId::from(id),
        name: id.to_string(),
        released,
        release_date: None,
    }
}

fn story(key: &str, fix_version: Option<FixVersion>) -> Issue {
    Issue {
        key: IssueKey::from(key),
        kind: IssueKind::Story,
        summary: format!("story {key}"),
        status: IssueStatus::Open,
        labels: vec![],
        fix_version,
    }
}

fn mixed_epic() -> (Epic, Vec<FixVersion>) {
    let v2 = version("v2.0", false);
    let released_v1 = version("v1.0", true);
    let epic = Epic {
        issue: Issue {
            key: IssueKey::from("PROJ-1"),
            kind: IssueKind::Epic,
            summary: "epic PROJ-1".to_string(),
            status: IssueStatus::Open,
            labels: vec![],
            fix_version: Some(v2.clone()),
        },
        stories: vec![
            story("PROJ-2", None),
            story("PROJ-3", Some(v2.clone())),
            story("PROJ-4", Some(released_v1.clone())),
        ],
    };
    (epic, vec![v2, released_v1])
}

// ---------------------------------------------------------------------------
// plan_epic
// ---------------------------------------------------------------------------

#[test]
fn plan_epic_surfaces_not_found() {
    let tracker = FakeTracker::empty();
    let err = plan_epic(&tracker, &IssueKey::from("NOPE-1")).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Tracker(TrackerError::NotFound { .. })
    ));
}

#[test]
fn plan_epic_matches_pure_compute() {
    let (epic, versions) = mixed_epic();
    let tracker = FakeTracker::with_epic(epic.clone(), versions);
    let plan = plan_epic(&tracker, &IssueKey::from("PROJ-1")).expect("plan");
    assert_eq!(plan.actions, compute_actions(&epic));
    assert!(!plan.is_clean());
}

// ---------------------------------------------------------------------------
// apply_actions
// ---------------------------------------------------------------------------

#[test]
fn conflicts_are_never_sent_to_the_tracker() {
    let (epic, versions) = mixed_epic();
    let tracker = FakeTracker::with_epic(epic, versions);
    let plan = plan_epic(&tracker, &IssueKey::from("PROJ-1")).expect("plan");

    // Only the mutating subset goes to apply; the CLI does the same split.
    let mutating: Vec<Action> = plan
        .actions
        .iter()
        .filter(|a| !a.is_informational())
        .cloned()
        .collect();
    let report = apply_actions(&tracker, &mutating);

    assert!(!report.has_failures());
    assert_eq!(tracker.assigned_keys(), vec![IssueKey::from("PROJ-2")]);
}

#[test]
fn informational_action_in_apply_is_a_precondition_failure() {
    let (epic, versions) = mixed_epic();
    let tracker = FakeTracker::with_epic(epic, versions);
    let conflict = Action::FlagConflict {
        key: IssueKey::from("PROJ-4"),
        from: VersionId::from("v1.0"),
        to: VersionId::from("v2.0"),
        reason: "cannot move released work".to_string(),
    };

    let report = apply_actions(&tracker, &[conflict]);

    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcomes[0].result,
        Err(EngineError::PreconditionFailed { .. })
    ));
    assert!(tracker.assigned_keys().is_empty(), "no gateway call expected");
}

#[test]
fn middle_failure_does_not_abort_the_batch() {
    let v2 = version("v2.0", false);
    let epic = Epic {
        issue: Issue {
            key: IssueKey::from("PROJ-1"),
            kind: IssueKind::Epic,
            summary: "epic".to_string(),
            status: IssueStatus::Open,
            labels: vec![],
            fix_version: Some(v2.clone()),
        },
        stories: vec![
            story("PROJ-2", None),
            story("PROJ-3", None),
            story("PROJ-4", None),
        ],
    };
    let mut tracker = FakeTracker::with_epic(epic, vec![v2]);
    tracker.fail_assign_for = vec![IssueKey::from("PROJ-3")];

    let plan = plan_epic(&tracker, &IssueKey::from("PROJ-1")).expect("plan");
    let report = apply_actions(&tracker, &plan.actions);

    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes[0].succeeded());
    assert!(!report.outcomes[1].succeeded());
    assert!(report.outcomes[2].succeeded());
    assert_eq!(
        report.summary(),
        Err(EngineError::PartialApply { failed: 1, total: 3 })
    );
    assert_eq!(
        tracker.assigned_keys(),
        vec![IssueKey::from("PROJ-2"), IssueKey::from("PROJ-4")]
    );
}

#[test]
fn invalid_version_is_reported_per_action() {
    let v2 = version("v2.0", false);
    let epic = Epic {
        issue: Issue {
            key: IssueKey::from("PROJ-1"),
            kind: IssueKind::Epic,
            summary: "epic".to_string(),
            status: IssueStatus::Open,
            labels: vec![],
            fix_version: Some(v2),
        },
        stories: vec![story("PROJ-2", None)],
    };
    // Tracker knows no versions at all, so the assign must fail.
    let tracker = FakeTracker::with_epic(epic, vec![]);

    let report = apply_actions(
        &tracker,
        &[Action::Assign {
            key: IssueKey::from("PROJ-2"),
            to: VersionId::from("v2.0"),
        }],
    );

    assert!(matches!(
        report.outcomes[0].result,
        Err(EngineError::Tracker(TrackerError::InvalidVersion { .. }))
    ));
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn replanning_after_apply_leaves_only_conflicts() {
    let (epic, versions) = mixed_epic();
    let tracker = FakeTracker::with_epic(epic, versions);

    let first = plan_epic(&tracker, &IssueKey::from("PROJ-1")).expect("plan");
    let mutating: Vec<Action> = first
        .actions
        .iter()
        .filter(|a| !a.is_informational())
        .cloned()
        .collect();
    let report = apply_actions(&tracker, &mutating);
    assert!(!report.has_failures());

    // The fake mirrors writes into its stored epic, so a fresh plan sees
    // the post-apply state.
    let second = plan_epic(&tracker, &IssueKey::from("PROJ-1")).expect("replan");
    assert!(
        second
            .actions
            .iter()
            .all(|a| matches!(a, Action::FlagConflict { .. })),
        "only released-version conflicts may persist, got {:?}",
        second.actions
    );
    assert_eq!(second.actions.len(), 1);
}
