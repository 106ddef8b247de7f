//! Keyboard forwarding policy.

use crate::protocol::KeyboardEventPayload;

/// Whether a keyboard event caught inside the canvas should be
/// forwarded to the host. Only shortcut-shaped input crosses the
/// boundary: modifier combinations (ctrl/cmd) and the delete keys —
/// and never while focus sits in an editable element, so normal typing
/// is not hijacked.
pub fn should_forward(event: &KeyboardEventPayload, in_editable: bool) -> bool {
    if in_editable {
        return false;
    }
    if event.ctrl_key || event.meta_key {
        return true;
    }
    matches!(event.key.as_str(), "Delete" | "Backspace")
}
