//! `switchyard comment` — pass a comment through to the tracker.

use anyhow::{Context, Result};
use clap::Args;

use switchyard_core::{IssueKey, TrackerGateway};

/// Arguments for `switchyard comment`.
#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue to comment on (e.g. PROJ-42).
    pub issue: String,

    /// Comment body.
    pub text: String,
}

impl CommentArgs {
    pub fn run(self) -> Result<()> {
        let (_, gateway) = super::connect()?;
        let key = IssueKey::from(self.issue.as_str());
        gateway
            .add_comment(&key, &self.text)
            .with_context(|| format!("failed to comment on '{key}'"))?;
        println!("✓ commented on '{key}'");
        Ok(())
    }
}
