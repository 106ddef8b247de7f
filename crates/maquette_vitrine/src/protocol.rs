//! The wire protocol.
//!
//! Every message crossing the canvas boundary is one [`SyncMessage`],
//! serialized as `{ "type": <tag>, "payload": <json> }`. The enum is
//! sealed: receivers validate shape by deserializing before acting,
//! never by poking at loose JSON.

use maquette_relief::{FxHashMap, NodeId, SchemaNode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of the host's normalized component tree: flat map keyed by
/// node id, children linked through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentsState {
    pub components: FxHashMap<String, SchemaNode>,
    pub root_id: Option<NodeId>,
}

/// Editor UI state mirrored into the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub selected_id: Option<NodeId>,
    pub hovered_id: Option<NodeId>,
    #[serde(default)]
    pub dragging: bool,
}

/// What is being dragged, announced at drag start so the canvas can
/// render placement hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DragMetadata {
    /// Component name from the palette.
    pub name: String,

    /// Set when an existing node is being moved rather than a new one
    /// inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<NodeId>,
}

/// Keyboard event forwarded from the canvas to the host window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardEventPayload {
    pub key: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub meta_key: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub alt_key: bool,
}

/// The sealed message set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SyncMessage {
    /// Renderer boot handshake. The host answers with a full state
    /// push, then flushes anything queued.
    #[serde(rename = "READY")]
    Ready,

    #[serde(rename = "SYNC_COMPONENTS_STATE")]
    SyncComponentsState(ComponentsState),

    #[serde(rename = "SYNC_UI_STATE")]
    SyncUiState(UiState),

    /// Renderer asks the host to invoke a named store action.
    #[serde(rename = "DISPATCH_ACTION")]
    DispatchAction {
        name: String,
        #[serde(default)]
        args: Vec<Value>,
    },

    #[serde(rename = "SELECT_COMPONENT")]
    SelectComponent { id: Option<NodeId> },

    #[serde(rename = "HOVER_COMPONENT")]
    HoverComponent { id: Option<NodeId> },

    #[serde(rename = "DRAG_START_METADATA")]
    DragStartMetadata(DragMetadata),

    #[serde(rename = "DRAG_END")]
    DragEnd,

    #[serde(rename = "FORWARD_KEYBOARD_EVENT")]
    ForwardKeyboardEvent(KeyboardEventPayload),
}

impl SyncMessage {
    /// Shape-validate loose JSON into a message. `None` for anything
    /// that is not ours — other scripts post to the same window.
    pub fn parse(value: &Value) -> Option<SyncMessage> {
        if !is_sync_message(value) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

/// Cheap guard: an object with one of our type tags.
pub fn is_sync_message(value: &Value) -> bool {
    const TAGS: &[&str] = &[
        "READY",
        "SYNC_COMPONENTS_STATE",
        "SYNC_UI_STATE",
        "DISPATCH_ACTION",
        "SELECT_COMPONENT",
        "HOVER_COMPONENT",
        "DRAG_START_METADATA",
        "DRAG_END",
        "FORWARD_KEYBOARD_EVENT",
    ];
    value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|tag| TAGS.contains(&tag))
}
