//! `switchyard plan` — list the corrective actions for an epic.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use switchyard_core::{Action, IssueKey};
use switchyard_engine::{plan_epic, Plan};

/// Arguments for `switchyard plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Key of the epic to reconcile (e.g. PROJ-1).
    pub epic: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let (_, gateway) = super::connect()?;
        let key = IssueKey::from(self.epic.as_str());
        let plan =
            plan_epic(&gateway, &key).with_context(|| format!("planning failed for '{key}'"))?;

        if self.json {
            print_json(&plan)?;
            return Ok(());
        }

        print_plan(&plan, "");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PlanJson<'a> {
    epic: String,
    canonical_version: Option<String>,
    actions: &'a [Action],
}

pub(crate) fn print_json(plan: &Plan) -> Result<()> {
    let payload = PlanJson {
        epic: plan.epic.key().to_string(),
        canonical_version: plan.epic.canonical_version().map(|v| v.id.to_string()),
        actions: &plan.actions,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize plan JSON")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Table output — shared with `apply --dry-run`
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "issue")]
    issue: String,
    #[tabled(rename = "from")]
    from: String,
    #[tabled(rename = "to")]
    to: String,
    #[tabled(rename = "note")]
    note: String,
}

pub(crate) fn print_plan(plan: &Plan, prefix: &str) {
    let key = plan.epic.key();
    if plan.is_clean() {
        println!("{prefix}✓ '{key}' — all stories match the epic's fix version");
        return;
    }

    match plan.epic.canonical_version() {
        Some(version) => println!(
            "{prefix}'{key}' against '{}': {} action(s)",
            version.name,
            plan.actions.len()
        ),
        None => println!("{prefix}'{key}': {} action(s)", plan.actions.len()),
    }

    let rows: Vec<ActionRow> = plan.actions.iter().map(action_row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn action_row(action: &Action) -> ActionRow {
    match action {
        Action::Assign { key, to } => ActionRow {
            action: action_label(action),
            issue: key.to_string(),
            from: String::new(),
            to: to.to_string(),
            note: String::new(),
        },
        Action::Reassign { key, from, to } => ActionRow {
            action: action_label(action),
            issue: key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            note: String::new(),
        },
        Action::FlagConflict {
            key,
            from,
            to,
            reason,
        } => ActionRow {
            action: action_label(action),
            issue: key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            note: reason.clone(),
        },
        Action::FlagBlocked { key, reason } => ActionRow {
            action: action_label(action),
            issue: key.to_string(),
            from: String::new(),
            to: String::new(),
            note: reason.clone(),
        },
    }
}

fn action_label(action: &Action) -> String {
    match action {
        Action::Assign { .. } => format!("{} assign", "■".green().bold()),
        Action::Reassign { .. } => format!("{} reassign", "■".yellow().bold()),
        Action::FlagConflict { .. } => format!("{} conflict", "■".red().bold()),
        Action::FlagBlocked { .. } => format!("{} blocked", "■".magenta().bold()),
    }
}
