//! # switchyard-jira
//!
//! Jira-backed implementation of the tracker gateway contract, plus the
//! configuration it needs and a retry decorator for flaky transports.
//!
//! The core crates never see Jira's wire shapes: everything is mapped to
//! `switchyard-core` types at this boundary.

pub mod client;
pub mod config;
pub mod error;
pub mod retry;

pub use client::JiraGateway;
pub use config::JiraConfig;
pub use error::ConfigError;
pub use retry::RetryGateway;
