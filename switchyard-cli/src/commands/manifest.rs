//! `switchyard manifest` — release visibility across projects.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use switchyard_core::ProjectKey;
use switchyard_renderer::{render_manifest, Manifest, ManifestEntry, MarkdownRenderer};

/// Arguments for `switchyard manifest`.
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Project keys to include (defaults to the configured projects).
    #[arg(long = "project")]
    pub projects: Vec<String>,

    /// Emit machine-readable JSON.
    #[arg(long, conflicts_with = "markdown")]
    pub json: bool,

    /// Render as markdown.
    #[arg(long)]
    pub markdown: bool,
}

impl ManifestArgs {
    pub fn run(self) -> Result<()> {
        let (config, gateway) = super::connect()?;

        let projects: Vec<ProjectKey> = if self.projects.is_empty() {
            config.projects.clone()
        } else {
            self.projects
                .iter()
                .map(|p| ProjectKey::from(p.as_str()))
                .collect()
        };
        if projects.is_empty() {
            bail!("no projects to render; add `projects:` to the config or pass --project");
        }

        let manifest =
            render_manifest(&gateway, &projects).context("manifest rendering failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&manifest)
                    .context("failed to serialize manifest JSON")?
            );
            return Ok(());
        }

        if self.markdown {
            let renderer = MarkdownRenderer::new()?;
            print!("{}", renderer.render(&manifest)?);
            return Ok(());
        }

        print_table(&manifest);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct ManifestRow {
    #[tabled(rename = "epic")]
    epic: String,
    #[tabled(rename = "story")]
    story: String,
    #[tabled(rename = "summary")]
    summary: String,
}

fn print_table(manifest: &Manifest) {
    let total_epics: usize = manifest.entries.iter().map(|e| e.epics.len()).sum();
    println!(
        "Switchyard v{} | {} versions | {} epics",
        env!("CARGO_PKG_VERSION"),
        manifest.entries.len(),
        total_epics,
    );

    if manifest.entries.is_empty() {
        println!("No unreleased versions found.");
        return;
    }

    let separator = "■".repeat(67).bright_black().to_string();
    for entry in &manifest.entries {
        println!("{separator}");
        println!(
            "{} {} ({})",
            entry.name.to_uppercase().bold(),
            entry.release_label(),
            entry.project,
        );
        if entry.epics.is_empty() {
            println!("  (no epics assigned)");
            continue;
        }
        let mut table = Table::new(entry_rows(entry));
        table.with(Style::rounded());
        println!("{table}");
    }
    println!("{separator}");
}

fn entry_rows(entry: &ManifestEntry) -> Vec<ManifestRow> {
    let mut rows = Vec::new();
    for epic in &entry.epics {
        if epic.stories.is_empty() {
            rows.push(ManifestRow {
                epic: epic.key.to_string(),
                story: String::new(),
                summary: epic.summary.clone(),
            });
            continue;
        }
        for (index, story) in epic.stories.iter().enumerate() {
            rows.push(ManifestRow {
                epic: if index == 0 {
                    epic.key.to_string()
                } else {
                    String::new()
                },
                story: story.key.to_string(),
                summary: story.summary.clone(),
            });
        }
    }
    rows
}
