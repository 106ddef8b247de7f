//! CSS-module extraction.
//!
//! Editor styles live as a JSON map on each node. This plugin moves
//! them into one CSS-module file per page — one class per styled node —
//! and leaves the class name on the node for the JSX emitter. Runs
//! before JSX emission; the order is load-bearing.

use maquette_relief::{IrNode, IrPage};
use serde_json::Value;

use crate::builder::{ModuleBuilder, ProjectBuilder};
use crate::error::GenerateError;
use crate::solution::ComponentPlugin;

/// Properties whose numeric values carry no unit.
const UNITLESS: &[&str] = &[
    "opacity",
    "zIndex",
    "fontWeight",
    "lineHeight",
    "flex",
    "flexGrow",
    "flexShrink",
    "order",
];

#[derive(Default)]
pub struct CssModulesPlugin;

impl ComponentPlugin for CssModulesPlugin {
    fn name(&self) -> &'static str {
        "css-modules"
    }

    fn run(
        &self,
        page: &mut IrPage,
        module: &mut ModuleBuilder,
        project: &mut ProjectBuilder,
    ) -> Result<(), GenerateError> {
        extract(&mut page.node, module);

        if !module.styles().is_empty() {
            project.add_file(
                format!("src/pages/{}.module.css", page.file_name),
                module.styles().join("\n"),
            );
        }
        Ok(())
    }
}

fn extract(node: &mut IrNode, module: &mut ModuleBuilder) {
    if let Some(styles) = node.styles.take() {
        if let Some(rule) = render_rule(node, &styles) {
            module.add_style(rule);
            node.css = Some(class_name(node));
        }
    }

    for child in &mut node.children {
        extract(child, module);
    }
}

fn class_name(node: &IrNode) -> String {
    format!("node_{}", node.id)
}

fn render_rule(node: &IrNode, styles: &Value) -> Option<String> {
    let map = styles.as_object().filter(|map| !map.is_empty())?;

    let mut rule = String::new();
    rule.push('.');
    rule.push_str(&class_name(node));
    rule.push_str(" {\n");

    let mut keys: Vec<_> = map.keys().collect();
    keys.sort();
    for key in keys {
        rule.push_str("  ");
        rule.push_str(&kebab_case(key));
        rule.push_str(": ");
        rule.push_str(&css_value(key, &map[key]));
        rule.push_str(";\n");
    }

    rule.push_str("}\n");
    Some(rule)
}

/// `fontSize` → `font-size`.
fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Bare numbers get `px` unless the property is unitless.
fn css_value(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) if !UNITLESS.contains(&key) => format!("{n}px"),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
