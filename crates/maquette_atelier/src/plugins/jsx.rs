//! JSX page emission.
//!
//! Emits one React TSX file per page: the import block from the module
//! builder, `useState` hooks for lifted page state, handler constants
//! for page methods, and the JSX tree. State-lifting leaves references
//! in the abstract `this.state.<name>` / `this.methods.<name>` /
//! `this.setState({...})` form; this emitter rewrites them into hook
//! bindings.

use maquette_relief::{IrDependency, IrNode, IrPage, PropValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::actions::ActionRegistry;
use crate::builder::{ModuleBuilder, ProjectBuilder};
use crate::context::CodegenContext;
use crate::error::GenerateError;
use crate::plugins::page_component_name;
use crate::solution::ComponentPlugin;

static SET_STATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"this\.setState\(\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*:\s*(.+?)\s*\}\)")
        .expect("setState pattern is valid")
});

#[derive(Default)]
pub struct JsxPlugin {
    actions: ActionRegistry,
}

impl ComponentPlugin for JsxPlugin {
    fn name(&self) -> &'static str {
        "jsx"
    }

    fn run(
        &self,
        page: &mut IrPage,
        module: &mut ModuleBuilder,
        project: &mut ProjectBuilder,
    ) -> Result<(), GenerateError> {
        for dep in &page.dependencies {
            module.add_import("", dep);
        }
        if !page.states.is_empty() {
            module.add_import("useState", &IrDependency::destructured("react", "useState"));
        }
        if has_css(&page.node) {
            module.add_import(
                "styles",
                &IrDependency::default_import(
                    format!("./{}.module.css", page.file_name),
                    "styles",
                ),
            );
        }

        // Emit the body first: action handlers register imports as they
        // go, and the import block has to see all of them.
        let mut body = CodegenContext::new();
        self.emit_component(&mut body, page, module);

        let mut file = module.render_imports();
        file.push('\n');
        file.push_str(body.as_str());
        file.push('\n');

        project.add_file(format!("src/pages/{}.tsx", page.file_name), file);
        Ok(())
    }
}

impl JsxPlugin {
    fn emit_component(&self, ctx: &mut CodegenContext, page: &IrPage, module: &mut ModuleBuilder) {
        let name = page_component_name(&page.file_name);
        ctx.push(&format!("function {name}() {{"));
        ctx.indent();

        let mut states: Vec<_> = page.states.iter().collect();
        states.sort_by(|a, b| a.0.cmp(b.0));
        if !states.is_empty() {
            for (state, value) in &states {
                let initial = match value {
                    PropValue::Literal { value } => value.to_string(),
                    _ => "null".to_string(),
                };
                ctx.newline();
                ctx.push(&format!(
                    "const [{state}, {setter}] = useState({initial});",
                    setter = setter_name(state)
                ));
            }
            ctx.blank_line();
        }

        let mut methods: Vec<_> = page.methods.iter().collect();
        methods.sort_by(|a, b| a.0.cmp(b.0));
        if !methods.is_empty() {
            for (method, value) in &methods {
                let body = match value {
                    PropValue::JsFunction { value } => rewrite_abstract_refs(value),
                    _ => "() => {}".to_string(),
                };
                ctx.newline();
                ctx.push(&format!("const {method} = {body};"));
            }
            ctx.blank_line();
        }

        ctx.newline();
        ctx.push("return (");
        ctx.indent();
        ctx.newline();
        self.emit_node(ctx, &page.node, module);
        ctx.deindent();
        ctx.newline();
        ctx.push(");");
        ctx.deindent();
        ctx.newline();
        ctx.push("}");
        ctx.blank_line();
        ctx.newline();
        ctx.push(&format!("export default {name};"));
    }

    fn emit_node(&self, ctx: &mut CodegenContext, node: &IrNode, module: &mut ModuleBuilder) {
        let tag = &node.component_name;
        let attrs = self.render_attrs(node, module);
        let text = text_child(node);

        if node.children.is_empty() && text.is_none() {
            ctx.push(&format!("<{tag}{attrs} />"));
            return;
        }

        ctx.push(&format!("<{tag}{attrs}>"));

        // A lone text child stays inline.
        if node.children.is_empty() {
            if let Some(text) = &text {
                ctx.push(&jsx_text(text));
            }
            ctx.push(&format!("</{tag}>"));
            return;
        }

        ctx.indent();
        if let Some(text) = &text {
            ctx.newline();
            ctx.push(&jsx_text(text));
        }
        for child in &node.children {
            ctx.newline();
            self.emit_node(ctx, child, module);
        }
        ctx.deindent();
        ctx.newline();
        ctx.push(&format!("</{tag}>"));
    }

    fn render_attrs(&self, node: &IrNode, module: &mut ModuleBuilder) -> String {
        let mut out = String::new();

        if let Some(css) = &node.css {
            out.push_str(&format!(" className={{styles.{css}}}"));
        }

        for (key, value) in node.props_sorted() {
            if key == "children" {
                continue;
            }
            match value {
                PropValue::Literal { value: Value::Null } => {}
                PropValue::Literal {
                    value: Value::String(s),
                } => out.push_str(&format!(" {key}={}", jsx_attr_string(s))),
                PropValue::Literal {
                    value: Value::Bool(true),
                } => out.push_str(&format!(" {key}")),
                PropValue::Literal { value } => out.push_str(&format!(" {key}={{{value}}}")),
                PropValue::JsExpression { value } | PropValue::JsFunction { value } => {
                    out.push_str(&format!(" {key}={{{}}}", rewrite_abstract_refs(value)))
                }
                PropValue::Action { actions } => {
                    let statements: Vec<String> = actions
                        .iter()
                        .map(|action| self.actions.emit(action, module))
                        .collect();
                    out.push_str(&format!(" {key}={{() => {{ {} }}}}", statements.join(" ")));
                }
            }
        }

        out
    }
}

/// Rewrite abstract state references into hook bindings.
fn rewrite_abstract_refs(code: &str) -> String {
    let code = SET_STATE.replace_all(code, |caps: &regex::Captures<'_>| {
        format!("{}({})", setter_name(&caps[1]), &caps[2])
    });
    code.replace("this.state.", "").replace("this.methods.", "")
}

fn setter_name(state: &str) -> String {
    let mut chars = state.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

fn has_css(node: &IrNode) -> bool {
    let mut found = false;
    node.walk(&mut |n| found |= n.css.is_some());
    found
}

/// The `children` prop rendered as JSX text, when it is a plain value.
fn text_child(node: &IrNode) -> Option<String> {
    match node.props.get("children")?.as_literal()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn jsx_attr_string(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "&quot;"))
}

fn jsx_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}
