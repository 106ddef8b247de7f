//! The export entry point.
//!
//! Wires the whole pipeline: parse, lift state, run the solution,
//! publish. Every failure anywhere inside surfaces as one structured
//! [`ExportError`]; nothing past this boundary panics, and the failure
//! path returns no partial output.

use maquette_armature::{PageSource, SchemaParser};
use maquette_croquis::lift_states;
use maquette_musea::{builtin_registry, MaterialRegistry};
use maquette_relief::SchemaNode;
use tracing::info;

use crate::error::ExportError;
use crate::publish::{Artifact, PublisherKind};
use crate::solution::{default_solution, Solution};

/// Options for one export run.
#[derive(Default)]
pub struct ExportOptions {
    /// Project (and archive) name. Empty falls back to `maquette-app`.
    pub project_name: String,

    pub publisher: PublisherKind,

    /// Custom pipeline; the stock React + Vite solution when absent.
    pub solution: Option<Solution>,
}

impl ExportOptions {
    fn project_name(&self) -> &str {
        if self.project_name.is_empty() {
            "maquette-app"
        } else {
            &self.project_name
        }
    }
}

/// Export a single-page schema against the built-in material catalog.
pub fn export_source_code(
    schema: &[SchemaNode],
    options: ExportOptions,
) -> Result<Artifact, ExportError> {
    let registry = builtin_registry();
    export_pages(
        &registry,
        vec![PageSource::new("index", schema.to_vec())],
        options,
    )
}

/// Export a multi-page project against a caller-provided registry.
pub fn export_pages(
    registry: &MaterialRegistry,
    pages: Vec<PageSource>,
    options: ExportOptions,
) -> Result<Artifact, ExportError> {
    let project_name = options.project_name().to_string();

    let parser = SchemaParser::new(registry);
    let mut project = parser.parse_project(&pages);
    lift_states(&mut project, registry);

    let solution = options
        .solution
        .unwrap_or_else(|| default_solution(&project_name));
    let files = solution.run(&mut project)?;
    info!(project = %project_name, files = files.len(), "generation complete");

    let publisher = options.publisher.create();
    Ok(publisher.publish(&project_name, files)?)
}
