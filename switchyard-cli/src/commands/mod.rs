//! Subcommand implementations.

pub mod apply;
pub mod comment;
pub mod init;
pub mod manifest;
pub mod plan;

use std::time::Duration;

use anyhow::{Context, Result};

use switchyard_jira::{config, JiraConfig, JiraGateway, RetryGateway};

/// Load the config and build the retrying gateway every command shares.
pub(crate) fn connect() -> Result<(JiraConfig, RetryGateway<JiraGateway>)> {
    let config = config::load().context("failed to load switchyard config")?;
    let gateway = RetryGateway::new(JiraGateway::new(&config), 3, Duration::from_millis(500));
    Ok((config, gateway))
}
