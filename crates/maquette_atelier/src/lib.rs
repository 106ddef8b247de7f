//! Atelier - The code generation workshop for Maquette.
//!
//! Orchestrates many small, independent generators against a shared,
//! growing file set: component plugins run once per page over that
//! page's IR tree, project plugins run once per project in weight
//! order, post-processors normalize the output, and a publisher turns
//! the file set into a deliverable. Execution is strictly sequential —
//! later plugins depend on earlier ones' effects on the shared
//! builders, so order is a correctness mechanism, not an optimization.

mod actions;
mod builder;
mod context;
mod error;
mod export;
mod plugins;
mod postprocess;
mod publish;
mod solution;
mod template;

#[cfg(test)]
mod snapshot_tests;

pub use actions::{js_string_literal, ActionRegistry};
pub use builder::{GeneratedFile, ModuleBuilder, ProjectBuilder};
pub use context::CodegenContext;
pub use error::{ExportError, GenerateError, PublishError};
pub use export::{export_pages, export_source_code, ExportOptions};
pub use plugins::{
    ComponentsPlugin, CssModulesPlugin, EntryPlugin, JsxPlugin, ManifestPlugin, RouterPlugin,
};
pub use postprocess::OutputNormalizer;
pub use publish::{Artifact, NonePublisher, Publisher, PublisherKind, ZipPublisher};
pub use solution::{default_solution, ComponentPlugin, PluginPhase, PostProcessor, ProjectPlugin, Solution};
pub use template::vite_react_template;
