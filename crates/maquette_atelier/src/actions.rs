//! Action-to-code handlers.
//!
//! Each declarative event action becomes one statement of generated
//! code. The registry is open: solutions can register their own action
//! types, and unknown types degrade to a diagnostic `console.log` line
//! instead of failing the export.

use maquette_relief::{ActionValue, IrDependency};
use serde_json::Value;
use tracing::warn;

use crate::builder::ModuleBuilder;

/// Emits one statement for one action, optionally registering imports
/// on the page's module builder.
pub type ActionHandler = fn(&ActionValue, &mut ModuleBuilder) -> String;

/// Dispatch table keyed by `actionType`.
pub struct ActionRegistry {
    handlers: maquette_relief::FxHashMap<&'static str, ActionHandler>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        let mut registry = Self {
            handlers: Default::default(),
        };
        registry.register("callMethod", call_method);
        registry.register("goToLink", go_to_link);
        registry.register("showMessage", show_message);
        registry
    }
}

impl ActionRegistry {
    pub fn register(&mut self, action_type: &'static str, handler: ActionHandler) {
        self.handlers.insert(action_type, handler);
    }

    /// Emit the statement for one action. Unknown action types produce
    /// a diagnostic statement, never an error.
    pub fn emit(&self, action: &ActionValue, module: &mut ModuleBuilder) -> String {
        match self.handlers.get(action.action_type.as_str()) {
            Some(handler) => handler(action, module),
            None => {
                warn!(action_type = %action.action_type, "unsupported action type");
                format!(
                    "console.log({});",
                    js_string_literal(&format!("unsupported action: {}", action.action_type))
                )
            }
        }
    }
}

/// Call a handler generated by the state-lifting pass.
fn call_method(action: &ActionValue, _module: &mut ModuleBuilder) -> String {
    match action.config.get("method").and_then(Value::as_str) {
        Some(method) if is_js_identifier(method) => format!("{method}();"),
        _ => {
            warn!("callMethod action without a valid method name");
            "console.log(\"unsupported action: callMethod\");".to_string()
        }
    }
}

/// Open a URL. The URL goes through the string-literal builder, so a
/// quote in editor input stays data instead of breaking out of the
/// generated call.
fn go_to_link(action: &ActionValue, _module: &mut ModuleBuilder) -> String {
    let url = action
        .config
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or("");
    let target = action
        .config
        .get("openInNewTab")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    if target {
        format!("window.open({});", js_string_literal(url))
    } else {
        format!("window.location.href = {};", js_string_literal(url))
    }
}

/// Toast via antd `message`; registers the import.
fn show_message(action: &ActionValue, module: &mut ModuleBuilder) -> String {
    module.add_import("message", &IrDependency::destructured("antd", "message"));

    let kind = match action.config.get("type").and_then(Value::as_str) {
        Some(kind @ ("success" | "error" | "warning" | "info")) => kind,
        _ => "info",
    };
    let text = action
        .config
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or("");
    format!("message.{kind}({});", js_string_literal(text))
}

/// Quote and escape a string for emission into generated JavaScript.
pub fn js_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
