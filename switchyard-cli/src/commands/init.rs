//! `switchyard init` — scaffold the local config file.

use anyhow::{Context, Result};
use clap::Args;

use switchyard_jira::{config, JiraConfig};

/// Arguments for `switchyard init`.
#[derive(Args, Debug)]
pub struct InitArgs {}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let path = config::config_path_at(&home);
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }

        config::save_at(&home, &JiraConfig::example())
            .context("failed to write starter config")?;
        println!("✎  wrote {}", path.display());
        println!("Fill in host, user_email, api_token and projects before running other commands.");
        Ok(())
    }
}
