//! Manifest assembly tests against a scripted tracker fake.
//!
//! Each test builds its own fake — no shared state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rstest::rstest;

use switchyard_core::{
    Epic, FixVersion, Issue, IssueKey, IssueKind, IssueStatus, ProjectKey, TrackerError,
    TrackerGateway, VersionId,
};
use switchyard_renderer::{render_manifest, RenderError};

// ---------------------------------------------------------------------------
// Fake tracker
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeTracker {
    versions: BTreeMap<ProjectKey, Vec<FixVersion>>,
    epics: BTreeMap<(ProjectKey, VersionId), Vec<Epic>>,
    unreachable: Vec<ProjectKey>,
}

impl FakeTracker {
    fn add_version(&mut self, project: &str, version: FixVersion) {
        self.versions
            .entry(ProjectKey::from(project))
            .or_default()
            .push(version);
    }

    fn add_epic(&mut self, project: &str, version: &str, epic: Epic) {
        self.epics
            .entry((ProjectKey::from(project), VersionId::from(version)))
            .or_default()
            .push(epic);
    }
}

impl TrackerGateway for FakeTracker {
    fn get_epic(&self, key: &IssueKey) -> Result<Epic, TrackerError> {
        Err(TrackerError::not_found(key.0.clone()))
    }

    fn get_fix_version(&self, _key: &IssueKey) -> Result<Option<FixVersion>, TrackerError> {
        Ok(None)
    }

    fn assign_fix_version(&self, _key: &IssueKey, _version: &VersionId) -> Result<(), TrackerError> {
        Ok(())
    }

    fn list_unreleased_versions(
        &self,
        project: &ProjectKey,
    ) -> Result<Vec<FixVersion>, TrackerError> {
        if self.unreachable.contains(project) {
            return Err(TrackerError::unavailable("scripted outage"));
        }
        Ok(self.versions.get(project).cloned().unwrap_or_default())
    }

    fn list_epics_for_version(
        &self,
        project: &ProjectKey,
        version: &VersionId,
    ) -> Result<Vec<Epic>, TrackerError> {
        Ok(self
            .epics
            .get(&(project.clone(), version.clone()))
            .cloned()
            .unwrap_or_default())
    }

    fn add_comment(&self, _key: &IssueKey, _body: &str) -> Result<(), TrackerError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn version(id: &str, date: Option<(i32, u32, u32)>) -> FixVersion {
    FixVersion {
        id: VersionId::from(id),
        name: id.to_string(),
        released: false,
        release_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
    }
}

fn epic(key: &str, summary: &str, stories: &[(&str, &str)]) -> Epic {
    Epic {
        issue: Issue {
            key: IssueKey::from(key),
            kind: IssueKind::Epic,
            summary: summary.to_string(),
            status: IssueStatus::Open,
            labels: vec![],
            fix_version: None,
        },
        stories: stories
            .iter()
            .map(|(k, s)| Issue {
                key: IssueKey::from(*k),
                kind: IssueKind::Story,
                summary: (*s).to_string(),
                status: IssueStatus::Open,
                labels: vec![],
                fix_version: None,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn entries_sort_by_date_with_dateless_last() {
    let mut tracker = FakeTracker::default();
    tracker.add_version("PROJ", version("march", Some((2024, 3, 1))));
    tracker.add_version("PROJ", version("undated", None));
    tracker.add_version("PROJ", version("january", Some((2024, 1, 1))));

    let manifest = render_manifest(&tracker, &[ProjectKey::from("PROJ")]).expect("render");
    let ids: Vec<&str> = manifest.entries.iter().map(|e| e.version.0.as_str()).collect();
    assert_eq!(ids, ["january", "march", "undated"]);
}

#[rstest]
#[case("a-train", "b-train", &["a-train", "b-train"])]
#[case("b-train", "a-train", &["a-train", "b-train"])]
fn same_date_ties_break_by_version_id(
    #[case] first: &str,
    #[case] second: &str,
    #[case] expected: &[&str],
) {
    let mut tracker = FakeTracker::default();
    tracker.add_version("PROJ", version(first, Some((2024, 6, 1))));
    tracker.add_version("PROJ", version(second, Some((2024, 6, 1))));

    let manifest = render_manifest(&tracker, &[ProjectKey::from("PROJ")]).expect("render");
    let ids: Vec<&str> = manifest.entries.iter().map(|e| e.version.0.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn same_id_versions_stay_separate_per_project() {
    let mut tracker = FakeTracker::default();
    tracker.add_version("PROJ", version("v3", None));
    tracker.add_version("OPS", version("v3", None));

    let manifest = render_manifest(
        &tracker,
        &[ProjectKey::from("PROJ"), ProjectKey::from("OPS")],
    )
    .expect("render");

    assert_eq!(manifest.entries.len(), 2);
    let projects: Vec<&str> = manifest
        .entries
        .iter()
        .map(|e| e.project.0.as_str())
        .collect();
    // Date and id tie; the project key breaks it deterministically.
    assert_eq!(projects, ["OPS", "PROJ"]);
}

#[test]
fn epics_sorted_by_key_stories_keep_tracker_order() {
    let mut tracker = FakeTracker::default();
    tracker.add_version("PROJ", version("v2", Some((2024, 6, 1))));
    tracker.add_epic(
        "PROJ",
        "v2",
        epic("PROJ-9", "later epic", &[("PROJ-11", "zeta"), ("PROJ-10", "alpha")]),
    );
    tracker.add_epic("PROJ", "v2", epic("PROJ-1", "earlier epic", &[]));

    let manifest = render_manifest(&tracker, &[ProjectKey::from("PROJ")]).expect("render");
    let entry = &manifest.entries[0];
    assert_eq!(entry.epics[0].key, IssueKey::from("PROJ-1"));
    assert_eq!(entry.epics[1].key, IssueKey::from("PROJ-9"));

    let story_keys: Vec<&str> = entry.epics[1]
        .stories
        .iter()
        .map(|s| s.key.0.as_str())
        .collect();
    assert_eq!(story_keys, ["PROJ-11", "PROJ-10"], "tracker order, not sorted");
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn version_with_zero_epics_still_appears() {
    let mut tracker = FakeTracker::default();
    tracker.add_version("PROJ", version("empty-train", None));

    let manifest = render_manifest(&tracker, &[ProjectKey::from("PROJ")]).expect("render");
    assert_eq!(manifest.entries.len(), 1);
    assert!(manifest.entries[0].epics.is_empty());
}

#[test]
fn no_projects_renders_empty_manifest() {
    let tracker = FakeTracker::default();
    let manifest = render_manifest(&tracker, &[]).expect("render");
    assert!(manifest.entries.is_empty());
}

#[test]
fn unreachable_project_fails_fast_and_is_named() {
    let mut tracker = FakeTracker::default();
    tracker.add_version("PROJ", version("v2", None));
    tracker.unreachable = vec![ProjectKey::from("OPS")];

    let err = render_manifest(
        &tracker,
        &[ProjectKey::from("PROJ"), ProjectKey::from("OPS")],
    )
    .unwrap_err();

    match err {
        RenderError::Tracker { project, source } => {
            assert_eq!(project, ProjectKey::from("OPS"));
            assert!(matches!(source, TrackerError::TrackerUnavailable { .. }));
        }
        other => panic!("expected tracker error, got {other:?}"),
    }
}
