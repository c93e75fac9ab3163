//! The tracker gateway capability contract.
//!
//! The reconciliation engine and the manifest renderer depend on this trait
//! and nothing else about the tracker. Implementations live outside the
//! core (see the `switchyard-jira` crate) and map the tracker's wire shapes
//! to the typed model at this boundary, so the core never sees them.

use crate::error::TrackerError;
use crate::types::{Epic, FixVersion, IssueKey, ProjectKey, VersionId};

/// Read/write access to the issue tracker, narrowed to what the core needs.
///
/// All calls are synchronous and may be issued sequentially; no ordering
/// guarantees beyond those documented per method. Timeout and retry policy
/// belong to implementations (or decorators around them), never to callers.
pub trait TrackerGateway {
    /// Fetch an epic with all child stories populated, in tracker-reported
    /// order. Fails with [`TrackerError::NotFound`] if `key` does not
    /// resolve to an epic.
    fn get_epic(&self, key: &IssueKey) -> Result<Epic, TrackerError>;

    /// Point lookup of an issue's assigned fix version, if any.
    fn get_fix_version(&self, key: &IssueKey) -> Result<Option<FixVersion>, TrackerError>;

    /// Set the issue's fix version, replacing any previous assignment.
    ///
    /// Fails with [`TrackerError::InvalidVersion`] if the version does not
    /// exist in the issue's project.
    fn assign_fix_version(&self, key: &IssueKey, version: &VersionId) -> Result<(), TrackerError>;

    /// All unreleased (and unarchived) versions of a project.
    fn list_unreleased_versions(
        &self,
        project: &ProjectKey,
    ) -> Result<Vec<FixVersion>, TrackerError>;

    /// All epics assigned to a version, each with children populated.
    fn list_epics_for_version(
        &self,
        project: &ProjectKey,
        version: &VersionId,
    ) -> Result<Vec<Epic>, TrackerError>;

    /// Post a comment on an issue. Pure pass-through; no core logic.
    fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), TrackerError>;
}
