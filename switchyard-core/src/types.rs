//! Domain types for the switchyard version model.
//!
//! Everything here is read from the tracker on demand, held in memory for a
//! single command invocation, and discarded. The tracker is the sole source
//! of truth; none of these types are persisted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed tracker project key (e.g. `PROJ`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectKey(pub String);

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed issue key (e.g. `PROJ-42`), unique within the tracker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueKey(pub String);

impl IssueKey {
    /// The project portion of the key — everything before the last `-`.
    ///
    /// Returns `None` for keys without a project prefix.
    pub fn project(&self) -> Option<ProjectKey> {
        self.0
            .rsplit_once('-')
            .map(|(prefix, _)| ProjectKey::from(prefix))
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for IssueKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed fix version identifier, unique within a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionId(pub String);

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for VersionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VersionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The work-item type of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Epic,
    Story,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Epic => write!(f, "epic"),
            IssueKind::Story => write!(f, "story"),
        }
    }
}

/// Workflow status of an issue. Informational only — reconciliation never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueStatus::Open => write!(f, "open"),
            IssueStatus::Closed => write!(f, "closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A fix version (release train) within a project.
///
/// Released versions are immutable targets: reconciliation never moves an
/// issue away from, or into, a released version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixVersion {
    pub id: VersionId,
    pub name: String,
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}

/// A single tracker work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: IssueKey,
    pub kind: IssueKind,
    pub summary: String,
    pub status: IssueStatus,
    #[serde(default)]
    pub labels: Vec<String>,
    /// The full assigned version, so callers can see the released flag
    /// without a second fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_version: Option<FixVersion>,
}

/// An epic with its child stories, in tracker-reported order.
///
/// The story order is preserved as delivered by the gateway; it drives the
/// deterministic ordering of computed actions and rendered manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    pub issue: Issue,
    #[serde(default)]
    pub stories: Vec<Issue>,
}

impl Epic {
    /// The epic's own declared fix version — the canonical version its
    /// stories are reconciled against.
    pub fn canonical_version(&self) -> Option<&FixVersion> {
        self.issue.fix_version.as_ref()
    }

    pub fn key(&self) -> &IssueKey {
        &self.issue.key
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A proposed or applied fix-version mutation.
///
/// Actions are immutable value objects; applying one is a gateway side
/// effect, never a mutation of the action itself. The two `Flag*` variants
/// are informational and must never be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Give a version-less story the canonical version.
    Assign { key: IssueKey, to: VersionId },
    /// Move a story from a non-released version to the canonical one.
    Reassign {
        key: IssueKey,
        from: VersionId,
        to: VersionId,
    },
    /// The story sits on a released version; moving it needs a human.
    FlagConflict {
        key: IssueKey,
        from: VersionId,
        to: VersionId,
        reason: String,
    },
    /// The epic itself cannot be reconciled.
    FlagBlocked { key: IssueKey, reason: String },
}

impl Action {
    /// The issue this action targets.
    pub fn key(&self) -> &IssueKey {
        match self {
            Action::Assign { key, .. }
            | Action::Reassign { key, .. }
            | Action::FlagConflict { key, .. }
            | Action::FlagBlocked { key, .. } => key,
        }
    }

    /// True for `FlagConflict` / `FlagBlocked` — actions that only inform
    /// and are never sent to the tracker.
    pub fn is_informational(&self) -> bool {
        matches!(self, Action::FlagConflict { .. } | Action::FlagBlocked { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
