//! Fixed-backoff retry decorator for tracker gateways.
//!
//! Wraps any [`TrackerGateway`] and retries calls that fail with
//! `TrackerUnavailable`. Every other error kind passes through untouched:
//! `NotFound`, `PermissionDenied`, and `InvalidVersion` will not heal on a
//! retry. Keeping this at the gateway boundary keeps reconciliation and
//! rendering free of transport concerns.

use std::time::Duration;

use switchyard_core::{
    Epic, FixVersion, IssueKey, ProjectKey, TrackerError, TrackerGateway, VersionId,
};

/// Decorator retrying `TrackerUnavailable` failures with a fixed pause.
pub struct RetryGateway<G> {
    inner: G,
    attempts: u32,
    backoff: Duration,
}

impl<G> RetryGateway<G> {
    /// `attempts` is the total call budget per operation, including the
    /// first try; values below 1 are treated as 1.
    pub fn new(inner: G, attempts: u32, backoff: Duration) -> Self {
        RetryGateway {
            inner,
            attempts: attempts.max(1),
            backoff,
        }
    }
}

impl<G: TrackerGateway> RetryGateway<G> {
    fn with_retry<T>(
        &self,
        mut op: impl FnMut() -> Result<T, TrackerError>,
    ) -> Result<T, TrackerError> {
        let mut attempt = 1;
        loop {
            match op() {
                Err(TrackerError::TrackerUnavailable { detail }) if attempt < self.attempts => {
                    tracing::warn!(attempt, "tracker unavailable, retrying: {detail}");
                    attempt += 1;
                    std::thread::sleep(self.backoff);
                }
                other => return other,
            }
        }
    }
}

impl<G: TrackerGateway> TrackerGateway for RetryGateway<G> {
    fn get_epic(&self, key: &IssueKey) -> Result<Epic, TrackerError> {
        self.with_retry(|| self.inner.get_epic(key))
    }

    fn get_fix_version(&self, key: &IssueKey) -> Result<Option<FixVersion>, TrackerError> {
        self.with_retry(|| self.inner.get_fix_version(key))
    }

    fn assign_fix_version(&self, key: &IssueKey, version: &VersionId) -> Result<(), TrackerError> {
        self.with_retry(|| self.inner.assign_fix_version(key, version))
    }

    fn list_unreleased_versions(
        &self,
        project: &ProjectKey,
    ) -> Result<Vec<FixVersion>, TrackerError> {
        self.with_retry(|| self.inner.list_unreleased_versions(project))
    }

    fn list_epics_for_version(
        &self,
        project: &ProjectKey,
        version: &VersionId,
    ) -> Result<Vec<Epic>, TrackerError> {
        self.with_retry(|| self.inner.list_epics_for_version(project, version))
    }

    fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), TrackerError> {
        self.with_retry(|| self.inner.add_comment(key, body))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
