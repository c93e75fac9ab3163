//! Error types for switchyard-jira configuration handling.
//!
//! Transport and tracker errors use [`switchyard_core::TrackerError`]; this
//! enum only covers loading and saving the local config file.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.switchyard/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}; run `switchyard init` first")]
    ConfigNotFound { path: PathBuf },
}
