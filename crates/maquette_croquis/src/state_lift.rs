//! The state-lifting pass.
//!
//! References generated here stay in the abstract `this.state.<name>` /
//! `this.methods.<name>` form; the JSX emitter rewrites them into hook
//! bindings. Names are keyed by the target component id, so running the
//! pass twice generates the same names and duplicates nothing.

use maquette_musea::{MaterialRegistry, MethodMeta};
use maquette_relief::{ActionValue, IrNode, IrPage, IrProject, NodeId, PropValue};
use serde_json::Value;
use tracing::warn;

const COMPONENT_METHOD: &str = "componentMethod";
const CALL_METHOD: &str = "callMethod";

/// Rewrite every `componentMethod` action in the project.
pub fn lift_states(project: &mut IrProject, registry: &MaterialRegistry) {
    for page in &mut project.pages {
        lift_page(page, registry);
    }
}

/// One pending rewrite, recorded during the scan phase.
struct Lift {
    source_id: NodeId,
    prop_key: String,
    action_index: usize,
    target_id: NodeId,
    method: String,
}

fn lift_page(page: &mut IrPage, registry: &MaterialRegistry) {
    // Scan first: the borrow checker will not let us rewrite arbitrary
    // target nodes while iterating the tree, and the original's
    // mutate-while-walking order is not semantically significant.
    let mut lifts = Vec::new();
    collect_lifts(&page.node, &mut lifts);

    for lift in lifts {
        apply_lift(page, registry, &lift);
    }
}

fn collect_lifts(node: &IrNode, lifts: &mut Vec<Lift>) {
    for (key, value) in node.props_sorted() {
        let Some(actions) = value.as_actions() else {
            continue;
        };
        for (index, action) in actions.iter().enumerate() {
            if action.action_type != COMPONENT_METHOD {
                continue;
            }
            let target_id = action.config.get("componentId").and_then(parse_id);
            let method = action
                .config
                .get("method")
                .and_then(Value::as_str)
                .map(str::to_string);
            match (target_id, method) {
                (Some(target_id), Some(method)) => lifts.push(Lift {
                    source_id: node.id.clone(),
                    prop_key: key.clone(),
                    action_index: index,
                    target_id,
                    method,
                }),
                _ => warn!(
                    source = %node.id,
                    prop = %key,
                    "componentMethod action without componentId/method, leaving as-is"
                ),
            }
        }
    }

    for child in &node.children {
        collect_lifts(child, lifts);
    }
}

fn parse_id(value: &Value) -> Option<NodeId> {
    serde_json::from_value(value.clone()).ok()
}

fn apply_lift(page: &mut IrPage, registry: &MaterialRegistry, lift: &Lift) {
    // Resolve the target's material and the method's state binding.
    // Either missing drops this single action, nothing else.
    let Some(target) = page.node.find(&lift.target_id) else {
        warn!(target_id = %lift.target_id, method = %lift.method, "lift target not found, dropping action");
        return;
    };

    let Some(meta) = registry.find_by_component_name(&target.component_name) else {
        warn!(component = %target.component_name, "no material metadata for lift target, dropping action");
        return;
    };

    let Some(method_meta) = meta.method(&lift.method) else {
        warn!(
            component = %target.component_name,
            method = %lift.method,
            "no state binding registered for method, dropping action"
        );
        return;
    };

    let prop = method_meta.state_binding.prop.clone();
    let state = state_name(&prop, &lift.target_id);
    let handler = handler_name(&lift.method, &lift.target_id);

    // Page state, initial false. or-insert keeps reruns from resetting
    // anything a previous run produced.
    page.states
        .entry(state.clone())
        .or_insert_with(initial_state);

    page.methods
        .entry(handler.clone())
        .or_insert_with(|| setter_function(&state, &method_meta.state_binding.value));

    // Close affordances on the same prop are wired automatically, so a
    // Modal opened from a button can also be dismissed.
    let closers: Vec<MethodMeta> = meta.closing_methods(&prop).cloned().collect();

    let state_expr = PropValue::expression(format!("this.state.{state}"));
    if let Some(target) = page.node.find_mut(&lift.target_id) {
        target.props.insert(prop.clone(), state_expr);

        for closer in &closers {
            let close_handler = handler_name(&closer.name, &lift.target_id);
            let event = closer.event_binding.clone().unwrap_or_default();
            target
                .props
                .entry(event)
                .or_insert_with(|| PropValue::expression(format!("this.methods.{close_handler}")));
        }
    }

    for closer in &closers {
        let close_handler = handler_name(&closer.name, &lift.target_id);
        page.methods
            .entry(close_handler)
            .or_insert_with(|| setter_function(&state, &closer.state_binding.value));
    }

    // Finally swap the declarative action for a call to the generated
    // handler.
    if let Some(source) = page.node.find_mut(&lift.source_id) {
        if let Some(PropValue::Action { actions }) = source.props.get_mut(&lift.prop_key) {
            if let Some(action) = actions.get_mut(lift.action_index) {
                *action =
                    ActionValue::new(CALL_METHOD, serde_json::json!({ "method": handler }));
            }
        }
    }
}

fn state_name(prop: &str, target_id: &NodeId) -> String {
    format!("{prop}_{target_id}")
}

fn handler_name(method: &str, target_id: &NodeId) -> String {
    format!("handle{}_{}", capitalize(method), target_id)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `() => { this.setState({ <name>: <value> }) }` in the abstract form
/// the JSX emitter rewrites to hook setters.
fn setter_function(state_name: &str, value: &Value) -> PropValue {
    PropValue::function(format!(
        "() => {{ this.setState({{ {state_name}: {value} }}) }}"
    ))
}

/// Lifted state always starts closed.
fn initial_state() -> PropValue {
    PropValue::literal(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_armature::{PageSource, SchemaParser};
    use maquette_musea::builtin_registry;
    use serde_json::json;

    fn project_with_modal_trigger() -> IrProject {
        let registry = builtin_registry();
        let parser = SchemaParser::new(&registry);
        parser.parse_project(&[PageSource::new(
            "index",
            serde_json::from_value(json!([
                {
                    "id": 1,
                    "name": "Page",
                    "props": {},
                    "children": [
                        {
                            "id": 2,
                            "name": "Button",
                            "props": {
                                "text": "Open",
                                "onClick": {
                                    "actions": [
                                        {
                                            "actionType": "componentMethod",
                                            "config": { "componentId": 3, "method": "open" }
                                        }
                                    ]
                                }
                            }
                        },
                        { "id": 3, "name": "Modal", "props": { "title": "Hello" } }
                    ]
                }
            ]))
            .unwrap(),
        )])
    }

    #[test]
    fn test_modal_open_close_wiring() {
        let registry = builtin_registry();
        let mut project = project_with_modal_trigger();
        lift_states(&mut project, &registry);

        let page = &project.pages[0];

        // State generated with initial false.
        assert_eq!(page.states["open_3"], PropValue::literal(false));

        // Open handler sets the configured value.
        let PropValue::JsFunction { value } = &page.methods["handleOpen_3"] else {
            panic!("handler is not a function");
        };
        assert!(value.contains("open_3: true"));

        // Modal's open prop bound to the lifted state.
        let modal = page.node.find(&NodeId::new("3")).unwrap();
        assert_eq!(
            modal.props["open"],
            PropValue::expression("this.state.open_3")
        );

        // Close affordances wired to generated handlers.
        assert_eq!(
            modal.props["onCancel"],
            PropValue::expression("this.methods.handleClose_3")
        );
        assert_eq!(
            modal.props["onOk"],
            PropValue::expression("this.methods.handleOk_3")
        );
        assert!(page.methods.contains_key("handleClose_3"));
        assert!(page.methods.contains_key("handleOk_3"));

        // Original action rewritten to a callMethod.
        let button = page.node.find(&NodeId::new("2")).unwrap();
        let actions = button.props["onClick"].as_actions().unwrap();
        assert_eq!(actions[0].action_type, "callMethod");
        assert_eq!(actions[0].config["method"], "handleOpen_3");
    }

    #[test]
    fn test_lift_is_idempotent() {
        let registry = builtin_registry();
        let mut project = project_with_modal_trigger();

        lift_states(&mut project, &registry);
        let once = project.clone();
        lift_states(&mut project, &registry);

        assert_eq!(once, project);
    }

    #[test]
    fn test_missing_target_drops_single_action() {
        let registry = builtin_registry();
        let parser = SchemaParser::new(&registry);
        let mut project = parser.parse_project(&[PageSource::new(
            "index",
            serde_json::from_value(json!([
                {
                    "id": 1,
                    "name": "Page",
                    "props": {},
                    "children": [
                        {
                            "id": 2,
                            "name": "Button",
                            "props": {
                                "onClick": {
                                    "actions": [
                                        {
                                            "actionType": "componentMethod",
                                            "config": { "componentId": 99, "method": "open" }
                                        },
                                        {
                                            "actionType": "showMessage",
                                            "config": { "text": "hi" }
                                        }
                                    ]
                                }
                            }
                        }
                    ]
                }
            ]))
            .unwrap(),
        )]);

        lift_states(&mut project, &registry);
        let page = &project.pages[0];

        assert!(page.states.is_empty());
        assert!(page.methods.is_empty());

        // The unresolvable action is left as-is; its sibling is untouched.
        let button = page.node.find(&NodeId::new("2")).unwrap();
        let actions = button.props["onClick"].as_actions().unwrap();
        assert_eq!(actions[0].action_type, "componentMethod");
        assert_eq!(actions[1].action_type, "showMessage");
    }

    #[test]
    fn test_unknown_method_drops_action() {
        let registry = builtin_registry();
        let parser = SchemaParser::new(&registry);
        let mut project = parser.parse_project(&[PageSource::new(
            "index",
            serde_json::from_value(json!([
                {
                    "id": 1,
                    "name": "Page",
                    "props": {},
                    "children": [
                        {
                            "id": 2,
                            "name": "Button",
                            "props": {
                                "onClick": {
                                    "actions": [
                                        {
                                            "actionType": "componentMethod",
                                            "config": { "componentId": 3, "method": "levitate" }
                                        }
                                    ]
                                }
                            }
                        },
                        { "id": 3, "name": "Modal", "props": {} }
                    ]
                }
            ]))
            .unwrap(),
        )]);

        lift_states(&mut project, &registry);
        assert!(project.pages[0].states.is_empty());
    }
}
