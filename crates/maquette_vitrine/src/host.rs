//! The host-side synchronization manager.
//!
//! Bridges the authoritative, mutable editor store to the sandboxed
//! canvas. The canvas never writes directly: everything it wants
//! changed comes back through here as a message, and every state change
//! on this side goes out as a push.

use std::collections::VecDeque;

use maquette_relief::{FxHashMap, NodeId, SchemaNode};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::protocol::{ComponentsState, DragMetadata, KeyboardEventPayload, SyncMessage};
use crate::transport::{Inbound, MessagePort, PortId};

/// Clipboard dispatch handled inline by the manager rather than the
/// store's action table.
const COPY_TO_CLIPBOARD: &str = "__copyToClipboard";

/// The authoritative store the manager fronts.
pub trait HostStore {
    fn components_snapshot(&self) -> ComponentsState;

    fn ui_snapshot(&self) -> crate::protocol::UiState;

    /// Invoke a named store action. Returns `false` for unknown names;
    /// the manager logs and drops those.
    fn dispatch(&mut self, name: &str, args: &[Value]) -> bool;

    fn set_selected(&mut self, id: Option<NodeId>);

    fn set_hovered(&mut self, id: Option<NodeId>);

    fn set_clipboard(&mut self, node: SchemaNode);

    /// Replay a keyboard event forwarded from the canvas into the host
    /// environment, so global shortcuts fire no matter where focus was.
    fn replay_keyboard(&mut self, event: &KeyboardEventPayload);
}

struct Connection {
    port: MessagePort,
    /// The renderer port identity we accept messages from. Anything
    /// else on the channel is ignored.
    expected_source: PortId,
    ready: bool,
    queue: VecDeque<SyncMessage>,
}

impl Connection {
    fn post(&self, message: SyncMessage) {
        if let Err(err) = self.port.post(message) {
            error!(%err, "dropping outbound sync message");
        }
    }
}

/// Host synchronization manager.
pub struct HostSyncManager<S: HostStore> {
    store: S,
    connection: Option<Connection>,
}

impl<S: HostStore> HostSyncManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            connection: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Bind a renderer. Resets readiness and the queue — the renderer
    /// will announce itself with READY and receive a full sync.
    pub fn connect(&mut self, port: MessagePort, expected_source: PortId) {
        self.connection = Some(Connection {
            port,
            expected_source,
            ready: false,
            queue: VecDeque::new(),
        });
    }

    /// Tear down. Idempotent; queued messages are discarded, because a
    /// fresh connect always re-syncs full state.
    pub fn disconnect(&mut self) {
        if self.connection.take().is_some() {
            debug!("renderer disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn is_ready(&self) -> bool {
        self.connection.as_ref().is_some_and(|c| c.ready)
    }

    /// Store subscription entry: push the component tree.
    pub fn sync_components(&mut self) {
        let message = SyncMessage::SyncComponentsState(self.store.components_snapshot());
        self.send(message);
    }

    /// Store subscription entry: push the UI state.
    pub fn sync_ui(&mut self) {
        let message = SyncMessage::SyncUiState(self.store.ui_snapshot());
        self.send(message);
    }

    pub fn sync_drag_start(&mut self, metadata: DragMetadata) {
        self.send(SyncMessage::DragStartMetadata(metadata));
    }

    pub fn sync_drag_end(&mut self) {
        self.send(SyncMessage::DragEnd);
    }

    /// Queue until the renderer is ready, send immediately after. FIFO:
    /// nothing is dropped or reordered while the renderer boots.
    fn send(&mut self, message: SyncMessage) {
        let Some(conn) = self.connection.as_mut() else {
            debug!("no renderer connected, dropping sync message");
            return;
        };
        if conn.ready {
            conn.post(message);
        } else {
            conn.queue.push_back(message);
        }
    }

    /// Inbound dispatch. Messages from any source other than the
    /// connected renderer are ignored.
    pub fn handle_message(&mut self, inbound: Inbound) {
        let Some(conn) = self.connection.as_ref() else {
            warn!("inbound message while disconnected, ignoring");
            return;
        };
        if inbound.source != conn.expected_source {
            warn!(source = ?inbound.source, "message from unexpected source, ignoring");
            return;
        }

        match inbound.message {
            SyncMessage::Ready => self.on_ready(),
            SyncMessage::DispatchAction { name, args } => self.on_dispatch(&name, &args),
            SyncMessage::SelectComponent { id } => self.store.set_selected(id),
            SyncMessage::HoverComponent { id } => self.store.set_hovered(id),
            SyncMessage::ForwardKeyboardEvent(event) => self.store.replay_keyboard(&event),
            other => debug!(?other, "host ignoring renderer-bound message"),
        }
    }

    /// READY handshake: full state push first, then the queue in order.
    /// The replica must have a base state before any queued increment
    /// lands on it.
    fn on_ready(&mut self) {
        let components = SyncMessage::SyncComponentsState(self.store.components_snapshot());
        let ui = SyncMessage::SyncUiState(self.store.ui_snapshot());

        let Some(conn) = self.connection.as_mut() else {
            return;
        };
        conn.ready = true;
        conn.post(components);
        conn.post(ui);
        while let Some(queued) = conn.queue.pop_front() {
            conn.post(queued);
        }
    }

    fn on_dispatch(&mut self, name: &str, args: &[Value]) {
        if name == COPY_TO_CLIPBOARD {
            self.copy_to_clipboard(args);
            return;
        }
        if !self.store.dispatch(name, args) {
            warn!(action = name, "unknown store action, ignoring dispatch");
        }
    }

    /// Build a detached subtree snapshot out of the flat components map
    /// and hand it to the store's clipboard.
    fn copy_to_clipboard(&mut self, args: &[Value]) {
        let Some(id) = args.first().and_then(parse_id) else {
            warn!("copyToClipboard dispatched without a node id");
            return;
        };

        let state = self.store.components_snapshot();
        match detach_subtree(&state.components, &id) {
            Some(snapshot) => self.store.set_clipboard(snapshot),
            None => warn!(%id, "copyToClipboard target not found"),
        }
    }
}

fn parse_id(value: &Value) -> Option<NodeId> {
    serde_json::from_value(value.clone()).ok()
}

/// Rebuild the subtree rooted at `id` from the flat map, following
/// `parent_id` links. The result is detached: no parent pointer, and
/// children ordered by id for determinism.
fn detach_subtree(components: &FxHashMap<String, SchemaNode>, id: &NodeId) -> Option<SchemaNode> {
    let node = components.get(id.as_str())?;
    let mut snapshot = node.clone();
    snapshot.parent_id = None;
    snapshot.children = collect_children(components, id);
    Some(snapshot)
}

fn collect_children(components: &FxHashMap<String, SchemaNode>, id: &NodeId) -> Vec<SchemaNode> {
    let mut direct: Vec<&SchemaNode> = components
        .values()
        .filter(|node| node.parent_id.as_ref() == Some(id))
        .collect();
    direct.sort_by(|a, b| a.id.cmp(&b.id));

    direct
        .into_iter()
        .map(|child| {
            let mut child = child.clone();
            child.children = collect_children(components, &child.id);
            child
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::UiState;
    use crate::transport::{forged_port, pair};
    use serde_json::json;

    /// Minimal recording store.
    #[derive(Default)]
    struct TestStore {
        components: FxHashMap<String, SchemaNode>,
        root_id: Option<NodeId>,
        selected: Option<NodeId>,
        hovered: Option<NodeId>,
        clipboard: Option<SchemaNode>,
        dispatched: Vec<(String, Vec<Value>)>,
        replayed: Vec<KeyboardEventPayload>,
    }

    impl TestStore {
        fn with_tree() -> Self {
            let mut store = Self::default();
            let mut page = SchemaNode::new("1", "Page");
            page.parent_id = None;
            let mut row = SchemaNode::new("2", "Grid");
            row.parent_id = Some(NodeId::new("1"));
            let mut button = SchemaNode::new("3", "Button");
            button.parent_id = Some(NodeId::new("2"));

            for node in [page, row, button] {
                store.components.insert(node.id.to_string(), node);
            }
            store.root_id = Some(NodeId::new("1"));
            store
        }
    }

    impl HostStore for TestStore {
        fn components_snapshot(&self) -> ComponentsState {
            ComponentsState {
                components: self.components.clone(),
                root_id: self.root_id.clone(),
            }
        }

        fn ui_snapshot(&self) -> UiState {
            UiState {
                selected_id: self.selected.clone(),
                hovered_id: self.hovered.clone(),
                dragging: false,
            }
        }

        fn dispatch(&mut self, name: &str, args: &[Value]) -> bool {
            if name != "deleteComponent" {
                return false;
            }
            self.dispatched.push((name.to_string(), args.to_vec()));
            true
        }

        fn set_selected(&mut self, id: Option<NodeId>) {
            self.selected = id;
        }

        fn set_hovered(&mut self, id: Option<NodeId>) {
            self.hovered = id;
        }

        fn set_clipboard(&mut self, node: SchemaNode) {
            self.clipboard = Some(node);
        }

        fn replay_keyboard(&mut self, event: &KeyboardEventPayload) {
            self.replayed.push(event.clone());
        }
    }

    #[test]
    fn test_queue_then_flush_ordering() {
        let mut duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        // Two messages before the renderer is ready: queued, not sent.
        host.sync_drag_start(DragMetadata {
            name: "Button".into(),
            source_id: None,
        });
        host.sync_drag_end();
        assert!(duplex.renderer_rx.try_recv().is_err());

        // Renderer announces readiness.
        duplex.renderer_port.post(SyncMessage::Ready).unwrap();
        let inbound = duplex.host_rx.try_recv().unwrap();
        host.handle_message(inbound);

        // Exact order: full components sync, ui sync, then the queue.
        let mut received = Vec::new();
        while let Ok(inbound) = duplex.renderer_rx.try_recv() {
            received.push(inbound.message);
        }
        assert!(matches!(received[0], SyncMessage::SyncComponentsState(_)));
        assert!(matches!(received[1], SyncMessage::SyncUiState(_)));
        assert!(matches!(received[2], SyncMessage::DragStartMetadata(_)));
        assert!(matches!(received[3], SyncMessage::DragEnd));
        assert_eq!(received.len(), 4);
    }

    #[test]
    fn test_messages_from_unexpected_source_are_ignored() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        // A forged sender on the same channel.
        let intruder = forged_port(duplex.renderer_port.raw_sender());
        intruder
            .post(SyncMessage::SelectComponent {
                id: Some(NodeId::new("3")),
            })
            .unwrap();

        let mut rx = duplex.host_rx;
        let inbound = rx.try_recv().unwrap();
        host.handle_message(inbound);

        assert_eq!(host.store().selected, None);
    }

    #[test]
    fn test_select_and_hover_update_host_state_directly() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        host.handle_message(Inbound {
            source: duplex.renderer_port.id(),
            message: SyncMessage::SelectComponent {
                id: Some(NodeId::new("2")),
            },
        });
        host.handle_message(Inbound {
            source: duplex.renderer_port.id(),
            message: SyncMessage::HoverComponent {
                id: Some(NodeId::new("3")),
            },
        });

        assert_eq!(host.store().selected, Some(NodeId::new("2")));
        assert_eq!(host.store().hovered, Some(NodeId::new("3")));
    }

    #[test]
    fn test_unknown_dispatch_is_a_logged_noop() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        host.handle_message(Inbound {
            source: duplex.renderer_port.id(),
            message: SyncMessage::DispatchAction {
                name: "explode".into(),
                args: vec![],
            },
        });

        assert!(host.store().dispatched.is_empty());
    }

    #[test]
    fn test_known_dispatch_reaches_store() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        host.handle_message(Inbound {
            source: duplex.renderer_port.id(),
            message: SyncMessage::DispatchAction {
                name: "deleteComponent".into(),
                args: vec![json!(3)],
            },
        });

        assert_eq!(host.store().dispatched.len(), 1);
    }

    #[test]
    fn test_copy_to_clipboard_builds_detached_subtree() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        host.handle_message(Inbound {
            source: duplex.renderer_port.id(),
            message: SyncMessage::DispatchAction {
                name: COPY_TO_CLIPBOARD.into(),
                args: vec![json!("2")],
            },
        });

        let clipboard = host.store().clipboard.as_ref().unwrap();
        assert_eq!(clipboard.id, NodeId::new("2"));
        assert_eq!(clipboard.parent_id, None);
        assert_eq!(clipboard.children.len(), 1);
        assert_eq!(clipboard.children[0].id, NodeId::new("3"));
    }

    #[test]
    fn test_keyboard_forwarding_replays_into_host() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        host.handle_message(Inbound {
            source: duplex.renderer_port.id(),
            message: SyncMessage::ForwardKeyboardEvent(KeyboardEventPayload {
                key: "z".into(),
                meta_key: true,
                ..Default::default()
            }),
        });

        assert_eq!(host.store().replayed.len(), 1);
        assert_eq!(host.store().replayed[0].key, "z");
    }

    #[test]
    fn test_disconnect_is_idempotent_and_discards_queue() {
        let duplex = pair();
        let mut host = HostSyncManager::new(TestStore::with_tree());
        host.connect(duplex.host_port.clone(), duplex.renderer_port.id());

        host.sync_ui();
        host.disconnect();
        host.disconnect();
        assert!(!host.is_connected());

        // Reconnect starts from a clean slate: nothing from the old
        // queue leaks.
        let mut duplex2 = pair();
        host.connect(duplex2.host_port.clone(), duplex2.renderer_port.id());
        host.handle_message(Inbound {
            source: duplex2.renderer_port.id(),
            message: SyncMessage::Ready,
        });

        let mut received = Vec::new();
        while let Ok(inbound) = duplex2.renderer_rx.try_recv() {
            received.push(inbound.message);
        }
        // Full sync only; the pre-disconnect ui push is gone.
        assert_eq!(received.len(), 2);
    }
}
