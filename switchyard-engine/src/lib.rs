//! # switchyard-engine
//!
//! Fix-version reconciliation engine.
//!
//! Call [`plan_epic`] to fetch an epic and compute the corrective actions
//! for its stories, then [`apply_actions`] to push the non-informational
//! ones through the tracker gateway. [`compute_actions`] is the pure core
//! both entrypoints agree on.

pub mod apply;
pub mod error;
pub mod reconcile;

pub use apply::{apply_actions, ActionOutcome, ApplyReport};
pub use error::EngineError;
pub use reconcile::{compute_actions, plan_epic, Plan};
