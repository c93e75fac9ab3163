//! # switchyard-renderer
//!
//! Groups unreleased fix versions and their epics/stories into a
//! deterministic, serializable [`Manifest`], plus a tera-backed markdown
//! presentation over that structured form. Callers that want other formats
//! (JSON, tables) serialize the manifest themselves.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use switchyard_core::{ProjectKey, TrackerGateway};
//! use switchyard_renderer::{render_manifest, MarkdownRenderer};
//!
//! fn print_manifest(gateway: &dyn TrackerGateway) {
//!     let projects = [ProjectKey::from("PROJ")];
//!     if let Ok(manifest) = render_manifest(gateway, &projects) {
//!         if let Ok(renderer) = MarkdownRenderer::new() {
//!             if let Ok(markdown) = renderer.render(&manifest) {
//!                 println!("{markdown}");
//!             }
//!         }
//!     }
//! }
//! ```

pub mod error;
pub mod manifest;
pub mod markdown;

pub use error::RenderError;
pub use manifest::{render_manifest, EpicGroup, Manifest, ManifestEntry, StoryLine};
pub use markdown::MarkdownRenderer;
