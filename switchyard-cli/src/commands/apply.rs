//! `switchyard apply` — apply the corrective actions for an epic.
//!
//! Actions are applied independently; a failure mid-batch leaves earlier
//! successes in place (the tracker has no multi-issue transaction). The
//! command prints every per-action outcome and then fails with a partial
//! summary if anything went wrong, so a rerun retries only what a fresh
//! plan still proposes.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use switchyard_core::{Action, IssueKey};
use switchyard_engine::{apply_actions, plan_epic, ApplyReport};

use super::plan::{print_json, print_plan};

/// Arguments for `switchyard apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Key of the epic to reconcile (e.g. PROJ-1).
    pub epic: String,

    /// Show what would be applied without touching the tracker.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    pub fn run(self) -> Result<()> {
        let (_, gateway) = super::connect()?;
        let key = IssueKey::from(self.epic.as_str());
        let plan =
            plan_epic(&gateway, &key).with_context(|| format!("planning failed for '{key}'"))?;

        if self.dry_run {
            if self.json {
                return print_json(&plan);
            }
            print_plan(&plan, "[dry-run] ");
            return Ok(());
        }

        // Informational flags never go to apply; they are surfaced instead.
        let (flags, mutating): (Vec<Action>, Vec<Action>) = plan
            .actions
            .iter()
            .cloned()
            .partition(|action| action.is_informational());
        let report = apply_actions(&gateway, &mutating);

        if self.json {
            print_report_json(&key, &report, &flags)?;
        } else {
            print_report(&key, &report, &flags);
        }

        report
            .summary()
            .with_context(|| format!("apply incomplete for '{key}'"))
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_report(key: &IssueKey, report: &ApplyReport, flags: &[Action]) {
    if report.outcomes.is_empty() && flags.is_empty() {
        println!("✓ '{key}' — nothing to do");
        return;
    }

    println!(
        "'{key}': {} applied, {} failed, {} flagged",
        report.applied(),
        report.failed(),
        flags.len()
    );
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => println!("  ✎  {} {}", outcome.action.key(), describe(&outcome.action)),
            Err(err) => println!("  ✗  {} {err}", outcome.action.key()),
        }
    }
    for flag in flags {
        println!("  ⚑  {} {}", flag.key(), flag_note(flag));
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::Assign { to, .. } => format!("→ {to}"),
        Action::Reassign { from, to, .. } => format!("{from} → {to}"),
        Action::FlagConflict { .. } | Action::FlagBlocked { .. } => String::new(),
    }
}

fn flag_note(action: &Action) -> &str {
    match action {
        Action::FlagConflict { reason, .. } | Action::FlagBlocked { reason, .. } => reason,
        Action::Assign { .. } | Action::Reassign { .. } => "",
    }
}

#[derive(Serialize)]
struct ApplyReportJson {
    epic: String,
    applied: usize,
    failed: usize,
    outcomes: Vec<OutcomeJson>,
    flags: Vec<Action>,
}

#[derive(Serialize)]
struct OutcomeJson {
    action: Action,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_report_json(key: &IssueKey, report: &ApplyReport, flags: &[Action]) -> Result<()> {
    let payload = ApplyReportJson {
        epic: key.to_string(),
        applied: report.applied(),
        failed: report.failed(),
        outcomes: report
            .outcomes
            .iter()
            .map(|outcome| OutcomeJson {
                action: outcome.action.clone(),
                ok: outcome.succeeded(),
                error: outcome.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect(),
        flags: flags.to_vec(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize apply JSON")?
    );
    Ok(())
}
