//! Vitrine - The display case for Maquette.
//!
//! The editor renders its live canvas inside a sandboxed frame for
//! style isolation. This crate is the synchronization layer across that
//! boundary: a sealed message protocol, a host-side manager that owns
//! the authoritative store and pushes state snapshots, and a
//! renderer-side manager that mirrors them into a disposable replica
//! and forwards interactions back. The host is the only writer; the
//! replica is rebuilt from a full sync on every (re)connect.

mod host;
mod keyboard;
mod protocol;
mod renderer;
mod transport;

pub use host::{HostStore, HostSyncManager};
pub use keyboard::should_forward;
pub use protocol::{
    ComponentsState, DragMetadata, KeyboardEventPayload, SyncMessage, UiState,
};
pub use renderer::{RendererSyncManager, ReplicaStore};
pub use transport::{pair, Duplex, Inbound, MessagePort, PortId, TransportError};
