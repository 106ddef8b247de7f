//! The renderer-side synchronization manager.
//!
//! A read-only mirror plus interaction forwarder. State snapshots from
//! the host write straight into the local replica; everything the user
//! does in the canvas goes back to the host as a one-way message. No
//! optimistic updates: correctness depends on the round trip.

use maquette_relief::NodeId;
use serde_json::Value;
use tracing::{debug, error};

use crate::keyboard::should_forward;
use crate::protocol::{KeyboardEventPayload, SyncMessage};
use crate::transport::{Inbound, MessagePort};

/// The disposable replica store inside the canvas.
pub trait ReplicaStore {
    fn apply_components(&mut self, state: crate::protocol::ComponentsState);

    fn apply_ui(&mut self, state: crate::protocol::UiState);

    fn set_drag_metadata(&mut self, metadata: Option<crate::protocol::DragMetadata>);
}

/// Renderer synchronization manager.
pub struct RendererSyncManager<R: ReplicaStore> {
    store: R,
    port: MessagePort,
}

impl<R: ReplicaStore> RendererSyncManager<R> {
    /// Bind the replica and announce readiness to the host. The READY
    /// handshake triggers the host's full-state push.
    pub fn init(store: R, port: MessagePort) -> Self {
        let manager = Self { store, port };
        manager.post(SyncMessage::Ready);
        manager
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut R {
        &mut self.store
    }

    /// Inbound state writes. The replica never originates writes
    /// anywhere else.
    pub fn handle_message(&mut self, inbound: Inbound) {
        match inbound.message {
            SyncMessage::SyncComponentsState(state) => self.store.apply_components(state),
            SyncMessage::SyncUiState(state) => self.store.apply_ui(state),
            SyncMessage::DragStartMetadata(metadata) => {
                self.store.set_drag_metadata(Some(metadata))
            }
            SyncMessage::DragEnd => self.store.set_drag_metadata(None),
            other => debug!(?other, "renderer ignoring host-bound message"),
        }
    }

    /// Ask the host to run a named store action.
    pub fn dispatch_action(&self, name: impl Into<String>, args: Vec<Value>) {
        self.post(SyncMessage::DispatchAction {
            name: name.into(),
            args,
        });
    }

    pub fn select_component(&self, id: Option<NodeId>) {
        self.post(SyncMessage::SelectComponent { id });
    }

    pub fn hover_component(&self, id: Option<NodeId>) {
        self.post(SyncMessage::HoverComponent { id });
    }

    /// Forward a keyboard event if the policy allows it. Returns
    /// whether the event was sent.
    pub fn forward_keyboard(&self, event: KeyboardEventPayload, in_editable: bool) -> bool {
        if !should_forward(&event, in_editable) {
            return false;
        }
        self.post(SyncMessage::ForwardKeyboardEvent(event));
        true
    }

    fn post(&self, message: SyncMessage) {
        if let Err(err) = self.port.post(message) {
            error!(%err, "dropping renderer message, host channel closed");
        }
    }
}
