//! Built-in material catalog.
//!
//! Covers the antd components the editor ships with, plus the two
//! abstract page materials that render through local runtime wrappers.
//! The catalog is a constructor, not a static: callers own their
//! registry instance.

use maquette_relief::{IrDependency, IrNode, PropValue, SchemaNode};
use serde_json::Value;

use crate::logic::CodegenLogic;
use crate::material::{MaterialMeta, MaterialRegistry, MethodMeta, StateBinding};

const ANTD_VERSION: &str = "^5.21.0";

fn antd(export_name: &str) -> IrDependency {
    IrDependency::destructured("antd", export_name).with_version(ANTD_VERSION)
}

fn local(component: &str) -> IrDependency {
    IrDependency::default_import(format!("../components/{component}"), component)
}

fn open_close_methods(close_event: &str) -> [MethodMeta; 2] {
    [
        MethodMeta {
            name: "open".into(),
            state_binding: StateBinding {
                prop: "open".into(),
                value: Value::Bool(true),
            },
            event_binding: None,
        },
        MethodMeta {
            name: "close".into(),
            state_binding: StateBinding {
                prop: "open".into(),
                value: Value::Bool(false),
            },
            event_binding: Some(close_event.into()),
        },
    ]
}

/// `text` is authored as a prop but renders as JSX children.
fn button_prop_mapper(key: &str, value: &Value) -> Option<(String, PropValue)> {
    (key == "text").then(|| ("children".to_string(), PropValue::literal(value.clone())))
}

/// Synthesize the Table node: editor column config becomes the antd
/// `columns` structure, with `key`/`dataIndex` filled in where the
/// editor omitted them.
fn table_transformer(node: &SchemaNode) -> IrNode {
    let mut ir = IrNode {
        id: node.id.clone(),
        component_name: "Table".into(),
        dependency: Some(antd("Table")),
        ..Default::default()
    };

    let columns = node
        .props
        .get("columns")
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .map(|col| match col {
                    Value::String(title) => serde_json::json!({
                        "title": title,
                        "dataIndex": title,
                        "key": title,
                    }),
                    Value::Object(map) => {
                        let mut map = map.clone();
                        let data_index = map
                            .get("dataIndex")
                            .cloned()
                            .or_else(|| map.get("title").cloned())
                            .unwrap_or(Value::Null);
                        map.entry("dataIndex").or_insert(data_index.clone());
                        map.entry("key").or_insert(data_index);
                        Value::Object(map)
                    }
                    other => other.clone(),
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    ir.props
        .insert("columns".into(), PropValue::literal(Value::Array(columns)));

    let data_source = node
        .props
        .get("dataSource")
        .cloned()
        .unwrap_or(Value::Array(Vec::new()));
    ir.props
        .insert("dataSource".into(), PropValue::literal(data_source));

    ir
}

/// Registry preloaded with the built-in catalog.
pub fn builtin_registry() -> MaterialRegistry {
    let mut registry = MaterialRegistry::new();

    // Abstract page materials, rendered through local runtime wrappers.
    registry.register(
        "Page",
        MaterialMeta::new("Page", local("Page")).container(),
    );
    registry.register("PageHeader", MaterialMeta::new("PageHeader", local("PageHeader")));

    // Layout.
    registry.register("Grid", MaterialMeta::new("Row", antd("Row")).container());
    registry.register("Col", MaterialMeta::new("Col", antd("Col")).container());
    registry.register("Divider", MaterialMeta::new("Divider", antd("Divider")));

    // Basic widgets.
    registry.register("Button", MaterialMeta::new("Button", antd("Button")));
    registry.register_logic(
        "Button",
        CodegenLogic::default().with_prop_mapper(button_prop_mapper),
    );
    registry.register(
        "Text",
        MaterialMeta::new("Typography.Text", antd("Typography").with_sub_name("Text")),
    );
    registry.register("Image", MaterialMeta::new("Image", antd("Image")));

    // Form widgets.
    registry.register("Input", MaterialMeta::new("Input", antd("Input")));
    registry.register("Select", MaterialMeta::new("Select", antd("Select")));
    registry.register("Form", MaterialMeta::new("Form", antd("Form")).container());

    // Data display.
    registry.register("Table", MaterialMeta::new("Table", antd("Table")));
    registry.register_logic(
        "Table",
        CodegenLogic::default().with_transformer(table_transformer),
    );

    // Overlays with imperative open/close methods.
    let [modal_open, modal_close] = open_close_methods("onCancel");
    registry.register(
        "Modal",
        MaterialMeta::new("Modal", antd("Modal"))
            .container()
            .with_method(modal_open)
            .with_method(modal_close)
            .with_method(MethodMeta {
                name: "ok".into(),
                state_binding: StateBinding {
                    prop: "open".into(),
                    value: Value::Bool(false),
                },
                event_binding: Some("onOk".into()),
            }),
    );

    let [tooltip_open, tooltip_close] = open_close_methods("onOpenChange");
    registry.register(
        "Tooltip",
        MaterialMeta::new("Tooltip", antd("Tooltip"))
            .container()
            .with_method(tooltip_open)
            .with_method(tooltip_close),
    );

    let [dropdown_open, dropdown_close] = open_close_methods("onOpenChange");
    registry.register(
        "Dropdown",
        MaterialMeta::new("Dropdown", antd("Dropdown"))
            .container()
            .with_method(dropdown_open)
            .with_method(dropdown_close),
    );

    registry
}
