//! Manifest assembly — fetch, group, and deterministically order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use switchyard_core::{IssueKey, ProjectKey, TrackerGateway, VersionId};

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Manifest model
// ---------------------------------------------------------------------------

/// A grouped release report across one or more projects.
///
/// Built fresh on every render call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

/// One unreleased version and the epics assigned to it.
///
/// Versions are scoped to their project by the tracker, so same-named
/// versions in two projects stay separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub project: ProjectKey,
    pub version: VersionId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    pub epics: Vec<EpicGroup>,
}

impl ManifestEntry {
    /// Human-readable release date, `unscheduled` when the version has none.
    pub fn release_label(&self) -> String {
        match self.release_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "unscheduled".to_string(),
        }
    }
}

/// An epic within a manifest entry, with its stories in tracker order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicGroup {
    pub key: IssueKey,
    pub summary: String,
    pub stories: Vec<StoryLine>,
}

/// A single story line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryLine {
    pub key: IssueKey,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the release manifest for `projects`.
///
/// Per project: every unreleased version, each with its epics (key order)
/// and their stories (tracker order). A version with zero epics still gets
/// an entry — an upcoming-but-empty release is signal, not noise.
///
/// Entries are ordered by release date ascending with dateless versions
/// last; ties break by version identifier, then project key. The ordering
/// is total, so repeated renders over the same tracker state are identical.
///
/// Fails fast on the first unreachable project — no partial manifest.
pub fn render_manifest(
    gateway: &dyn TrackerGateway,
    projects: &[ProjectKey],
) -> Result<Manifest, RenderError> {
    let mut entries = Vec::new();
    for project in projects {
        let versions = gateway
            .list_unreleased_versions(project)
            .map_err(|source| RenderError::Tracker {
                project: project.clone(),
                source,
            })?;
        for version in versions {
            let epics = gateway
                .list_epics_for_version(project, &version.id)
                .map_err(|source| RenderError::Tracker {
                    project: project.clone(),
                    source,
                })?;

            let mut groups: Vec<EpicGroup> = epics
                .into_iter()
                .map(|epic| EpicGroup {
                    key: epic.issue.key.clone(),
                    summary: epic.issue.summary.clone(),
                    stories: epic
                        .stories
                        .iter()
                        .map(|story| StoryLine {
                            key: story.key.clone(),
                            summary: story.summary.clone(),
                        })
                        .collect(),
                })
                .collect();
            groups.sort_by(|a, b| a.key.cmp(&b.key));

            entries.push(ManifestEntry {
                project: project.clone(),
                version: version.id,
                name: version.name,
                release_date: version.release_date,
                epics: groups,
            });
        }
    }

    entries.sort_by(|a, b| {
        (a.release_date.is_none(), a.release_date, &a.version, &a.project)
            .cmp(&(b.release_date.is_none(), b.release_date, &b.version, &b.project))
    });

    Ok(Manifest { entries })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
