//! # Maquette
//!
//! The core engine of a visual page builder: a schema-to-source
//! compiler pipeline and the host/canvas synchronization protocol.
//!
//! This crate re-exports all Maquette sub-crates for unified
//! documentation.
//!
//! ## Crates
//!
//! - [`relief`] - Schema and IR data model
//! - [`musea`] - Component material registry
//! - [`armature`] - Schema parser
//! - [`croquis`] - State-lifting semantic pass
//! - [`atelier`] - Code generation pipeline
//! - [`vitrine`] - Canvas synchronization protocol

/// Schema and IR data model.
pub use maquette_relief as relief;

/// Component material registry.
pub use maquette_musea as musea;

/// Schema parser.
pub use maquette_armature as armature;

/// State-lifting semantic pass.
pub use maquette_croquis as croquis;

/// Code generation pipeline.
pub use maquette_atelier as atelier;

/// Canvas synchronization protocol.
pub use maquette_vitrine as vitrine;

pub use maquette_atelier::{export_source_code, ExportOptions};
