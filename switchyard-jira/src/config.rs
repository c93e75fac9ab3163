//! Local YAML configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.switchyard/
//!   config.yaml   (mode 0600 — holds the API token)
//! ```
//!
//! # API pattern
//!
//! Every function touching the filesystem has two forms:
//! - `fn_at(home: &Path)` — explicit home; used in tests with `TempDir`
//! - `fn()` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.
//!
//! The API token may be overridden by the `SWITCHYARD_API_TOKEN` environment
//! variable, so the file can be shared without the secret in it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use switchyard_core::ProjectKey;

use crate::error::ConfigError;

/// Environment variable that overrides the `api_token` field.
pub const TOKEN_ENV_VAR: &str = "SWITCHYARD_API_TOKEN";

/// Connection settings and the project list for manifest rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL, e.g. `https://your-domain.atlassian.net`.
    pub host: String,
    /// Account email used for basic auth.
    pub user_email: String,
    /// API token paired with the email. Overridable via env.
    pub api_token: String,
    /// Projects the `manifest` command covers by default.
    #[serde(default)]
    pub projects: Vec<ProjectKey>,
}

impl JiraConfig {
    /// Placeholder config written by `switchyard init`.
    pub fn example() -> Self {
        JiraConfig {
            host: "https://your-domain.atlassian.net".to_string(),
            user_email: "you@example.com".to_string(),
            api_token: "your-api-token".to_string(),
            projects: vec![],
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.switchyard/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".switchyard").join("config.yaml")
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the config from `<home>/.switchyard/config.yaml`.
///
/// Returns `ConfigError::ConfigNotFound` if absent, `ConfigError::Parse`
/// (with path + line context) if malformed. Applies the env-var token
/// override before returning.
pub fn load_at(home: &Path) -> Result<JiraConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    let mut config: JiraConfig =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })?;
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            config.api_token = token;
        }
    }
    Ok(config)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<JiraConfig, ConfigError> {
    load_at(&home()?)
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the config to `<home>/.switchyard/config.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
/// The parent directory is created with mode `0700` if absent.
pub fn save_at(home: &Path, config: &JiraConfig) -> Result<(), ConfigError> {
    let dir = home.join(".switchyard");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    let path = config_path_at(home);
    let tmp_path = path.with_file_name("config.yaml.tmp");

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(config: &JiraConfig) -> Result<(), ConfigError> {
    save_at(&home()?, config)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
