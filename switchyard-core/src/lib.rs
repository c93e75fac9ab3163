//! Switchyard core library — version model, gateway contract, errors.
//!
//! Public API surface:
//! - [`types`] — key newtypes and domain structs
//! - [`gateway`] — the [`TrackerGateway`] capability trait
//! - [`error`] — [`TrackerError`]

pub mod error;
pub mod gateway;
pub mod types;

pub use error::TrackerError;
pub use gateway::TrackerGateway;
pub use types::{
    Action, Epic, FixVersion, Issue, IssueKey, IssueKind, IssueStatus, ProjectKey, VersionId,
};
