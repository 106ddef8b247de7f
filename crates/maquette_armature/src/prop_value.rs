//! Prop value classification.
//!
//! Every prop on every schema node classifies into exactly one
//! [`PropValue`] variant. The chain is total: whatever JSON shape the
//! editor hands us, classification returns a value and never panics.

use maquette_musea::MaterialRegistry;
use maquette_relief::{ActionValue, PropValue};
use serde_json::Value;
use tracing::warn;

const EXPRESSION_TAG: &str = "JSExpression";
const FUNCTION_TAG: &str = "JSFunction";

/// Classify one prop value. Priority chain: component-specific prop
/// mapper, action detection, tagged expression/function detection,
/// literal fallback. Returns the (possibly renamed) key and the
/// classified value.
pub fn parse_prop_value(
    registry: &MaterialRegistry,
    schema_name: &str,
    key: &str,
    value: &Value,
) -> (String, PropValue) {
    if let Some(mapper) = registry.logic(schema_name).and_then(|l| l.prop_mapper) {
        if let Some(mapped) = mapper(key, value) {
            return mapped;
        }
    }

    if let Some(actions) = detect_actions(value) {
        if actions.is_empty() {
            warn!(component = schema_name, prop = key, "empty action list, demoting to null");
            return (key.to_string(), PropValue::null());
        }
        return (key.to_string(), PropValue::Action { actions });
    }

    if let Some(tagged) = detect_tagged(schema_name, key, value) {
        return (key.to_string(), tagged);
    }

    // Literal fallback: deep copy of the schema value.
    (key.to_string(), PropValue::literal(value.clone()))
}

/// Action shape: `{ "actions": [...] }` as authored by the event panel,
/// or a bare array where every element is an action object.
fn detect_actions(value: &Value) -> Option<Vec<ActionValue>> {
    let raw = match value {
        Value::Object(map) => map.get("actions")?.as_array()?,
        Value::Array(items) if !items.is_empty() && items.iter().all(is_action_object) => items,
        _ => return None,
    };

    let mut actions = Vec::with_capacity(raw.len());
    for item in raw {
        match serde_json::from_value::<ActionValue>(item.clone()) {
            Ok(action) if !action.action_type.is_empty() => actions.push(action),
            _ => warn!(?item, "malformed action entry, skipping"),
        }
    }
    Some(actions)
}

fn is_action_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.get("actionType").is_some_and(Value::is_string))
}

/// Tagged expression shape: `{ "type": "JSExpression" | "JSFunction",
/// "value": "..." }`. A matching tag with a malformed payload demotes
/// to a null literal; an unknown tag falls through to the literal path.
fn detect_tagged(schema_name: &str, key: &str, value: &Value) -> Option<PropValue> {
    let map = value.as_object()?;
    let tag = map.get("type")?.as_str()?;
    if tag != EXPRESSION_TAG && tag != FUNCTION_TAG {
        return None;
    }

    match map.get("value").and_then(Value::as_str) {
        Some(code) if tag == EXPRESSION_TAG => Some(PropValue::expression(code)),
        Some(code) => Some(PropValue::function(code)),
        None => {
            warn!(
                component = schema_name,
                prop = key,
                tag,
                "tagged value without string payload, demoting to null"
            );
            Some(PropValue::null())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_musea::builtin_registry;
    use serde_json::json;

    fn classify(key: &str, value: Value) -> PropValue {
        let registry = MaterialRegistry::new();
        parse_prop_value(&registry, "Button", key, &value).1
    }

    #[test]
    fn test_classification_is_total() {
        // Every JSON shape lands in exactly one variant.
        assert!(classify("a", json!(null)).is_literal());
        assert!(classify("a", json!(1.5)).is_literal());
        assert!(classify("a", json!("text")).is_literal());
        assert!(classify("a", json!([1, 2])).is_literal());
        assert!(classify("a", json!({ "nested": { "deep": true } })).is_literal());

        assert_eq!(
            classify("a", json!({ "type": "JSExpression", "value": "count + 1" })),
            PropValue::expression("count + 1")
        );
        assert_eq!(
            classify("a", json!({ "type": "JSFunction", "value": "() => {}" })),
            PropValue::function("() => {}")
        );

        let actions = classify(
            "onClick",
            json!({ "actions": [{ "actionType": "goToLink", "config": { "url": "/home" } }] }),
        );
        assert_eq!(actions.as_actions().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_type_tag_is_a_literal() {
        let value = classify("a", json!({ "type": "Gradient", "value": "red" }));
        assert_eq!(
            value.as_literal().unwrap(),
            &json!({ "type": "Gradient", "value": "red" })
        );
    }

    #[test]
    fn test_malformed_tagged_value_demotes_to_null() {
        assert_eq!(
            classify("a", json!({ "type": "JSExpression", "value": 5 })),
            PropValue::null()
        );
    }

    #[test]
    fn test_empty_action_list_demotes_to_null() {
        assert_eq!(classify("onClick", json!({ "actions": [] })), PropValue::null());
    }

    #[test]
    fn test_bare_action_array_is_detected() {
        let value = classify(
            "onClick",
            json!([{ "actionType": "showMessage", "config": { "text": "hi" } }]),
        );
        assert_eq!(value.as_actions().unwrap()[0].action_type, "showMessage");
    }

    #[test]
    fn test_prop_mapper_takes_priority() {
        let registry = builtin_registry();
        let (key, value) = parse_prop_value(&registry, "Button", "text", &json!("Click"));
        assert_eq!(key, "children");
        assert_eq!(value, PropValue::literal("Click"));
    }
}
