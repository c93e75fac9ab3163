//! Tera-backed markdown presentation of a [`Manifest`].
//!
//! The template is embedded at compile time via `include_str!`; the domain
//! model is flattened into a small serializable context first so the
//! template never needs to know about `Option<NaiveDate>` handling.

use serde::Serialize;
use tera::Tera;

use crate::error::RenderError;
use crate::manifest::Manifest;

// ---------------------------------------------------------------------------
// Embedded template
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[(
    "manifest/manifest.md.tera",
    include_str!("templates/manifest.md.tera"),
)];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    let items: Vec<(String, String)> = TPLS
        .iter()
        .map(|(name, content)| (name.to_string(), (*content).to_string()))
        .collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct ManifestCtx {
    entries: Vec<EntryCtx>,
}

#[derive(Debug, Clone, Serialize)]
struct EntryCtx {
    project: String,
    name: String,
    release: String,
    epics: Vec<EpicCtx>,
}

#[derive(Debug, Clone, Serialize)]
struct EpicCtx {
    key: String,
    summary: String,
    stories: Vec<StoryCtx>,
}

#[derive(Debug, Clone, Serialize)]
struct StoryCtx {
    key: String,
    summary: String,
}

impl ManifestCtx {
    fn from_manifest(manifest: &Manifest) -> Self {
        ManifestCtx {
            entries: manifest
                .entries
                .iter()
                .map(|entry| EntryCtx {
                    project: entry.project.to_string(),
                    name: entry.name.clone(),
                    release: entry.release_label(),
                    epics: entry
                        .epics
                        .iter()
                        .map(|epic| EpicCtx {
                            key: epic.key.to_string(),
                            summary: epic.summary.clone(),
                            stories: epic
                                .stories
                                .iter()
                                .map(|story| StoryCtx {
                                    key: story.key.to_string(),
                                    summary: story.summary.clone(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// MarkdownRenderer
// ---------------------------------------------------------------------------

/// Renders a [`Manifest`] to markdown using the embedded template.
///
/// Create once with [`MarkdownRenderer::new`] and reuse.
pub struct MarkdownRenderer {
    tera: Tera,
}

impl MarkdownRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(MarkdownRenderer { tera: build_tera()? })
    }

    /// Render the manifest. Output ordering is whatever the manifest
    /// carries — the template adds no ordering of its own.
    pub fn render(&self, manifest: &Manifest) -> Result<String, RenderError> {
        let ctx = ManifestCtx::from_manifest(manifest);
        let tera_ctx = tera::Context::from_value(serde_json::to_value(&ctx)?)?;
        Ok(self.tera.render("manifest/manifest.md.tera", &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
