//! Croquis - Semantic analysis for Maquette.
//!
//! Generated source has no live component instances, so a declarative
//! "call the Modal's `open` method" action cannot survive code
//! generation as a method call. The state-lifting pass rewrites each
//! such action into page-level state, a generated handler that sets it,
//! and a prop binding on the target node — plus automatic wiring of the
//! target's close affordances.

mod state_lift;

pub use state_lift::lift_states;
