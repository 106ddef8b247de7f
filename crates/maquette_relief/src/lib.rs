//! Relief - The sculptured data-model surface for Maquette.
//!
//! This crate defines the two tree shapes the rest of the toolchain moves
//! between: the declarative component tree produced by the visual editor
//! (the Schema) and the normalized intermediate representation (IR) the
//! code generators consume. Both are plain serde data; no behavior lives
//! here beyond construction and traversal helpers.

mod dependency;
mod ir;
mod schema;

pub use dependency::{dedup_dependencies, IrDependency};
pub use ir::{ActionValue, IrNode, IrPage, IrProject, PropValue};
pub use schema::{NodeId, SchemaNode};

/// Re-exported map type used across the toolchain.
pub use rustc_hash::{FxHashMap, FxHashSet};
