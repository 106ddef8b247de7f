//! Intermediate representation of a parsed document.
//!
//! The IR is what the code generators consume: one node per schema node
//! with every prop classified into exactly one [`PropValue`] variant,
//! plus page- and project-level aggregates. The parser creates IR, the
//! state-lifting pass and the CSS plugin mutate it in place, and the
//! remaining plugins read it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dependency::IrDependency;
use crate::schema::NodeId;

/// Classified prop value. Classification happens once, in the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropValue {
    /// Plain JSON data, deep-copied out of the schema.
    Literal { value: Value },

    /// A raw JavaScript expression, emitted verbatim inside `{...}`.
    #[serde(rename = "JSExpression")]
    JsExpression { value: String },

    /// A JavaScript function body, emitted verbatim.
    #[serde(rename = "JSFunction")]
    JsFunction { value: String },

    /// An ordered list of declarative event actions.
    Action { actions: Vec<ActionValue> },
}

impl PropValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    pub fn null() -> Self {
        Self::Literal { value: Value::Null }
    }

    pub fn expression(value: impl Into<String>) -> Self {
        Self::JsExpression {
            value: value.into(),
        }
    }

    pub fn function(value: impl Into<String>) -> Self {
        Self::JsFunction {
            value: value.into(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// The literal payload, if this is a literal.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_actions(&self) -> Option<&[ActionValue]> {
        match self {
            Self::Action { actions } => Some(actions),
            _ => None,
        }
    }
}

/// One declarative action bound to an event prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionValue {
    pub action_type: String,

    #[serde(default)]
    pub config: Value,
}

impl ActionValue {
    pub fn new(action_type: impl Into<String>, config: Value) -> Self {
        Self {
            action_type: action_type.into(),
            config,
        }
    }
}

/// One IR node. 1:1 with the schema node it was parsed from, except
/// unknown components fall back to a placeholder `div` preserving
/// children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IrNode {
    pub id: NodeId,

    /// Render-target name. May differ from the schema name
    /// (e.g. `Grid` renders as `Row`).
    pub component_name: String,

    #[serde(default)]
    pub props: FxHashMap<String, PropValue>,

    /// Import descriptor of the render target. Placeholder nodes have
    /// none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<IrDependency>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<IrNode>,

    /// Editor style map. Taken by the CSS extraction plugin, which sets
    /// `css` in its place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,

    /// CSS-module class name assigned by the CSS extraction plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
}

impl IrNode {
    /// Depth-first search for a node by id.
    pub fn find(&self, id: &NodeId) -> Option<&IrNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth-first search for a mutable node by id.
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut IrNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Visit every node in the tree, parent before children.
    pub fn walk(&self, visit: &mut impl FnMut(&IrNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Props in key order, for deterministic emission.
    pub fn props_sorted(&self) -> Vec<(&String, &PropValue)> {
        let mut props: Vec<_> = self.props.iter().collect();
        props.sort_by(|a, b| a.0.cmp(b.0));
        props
    }
}

/// One parsed page: the IR tree plus everything page-local the
/// generators need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IrPage {
    pub id: NodeId,

    /// Output file stem, e.g. `index` becomes `src/pages/index.tsx`.
    pub file_name: String,

    pub node: IrNode,

    /// Per-page import set collected by the parser, de-duplicated by
    /// package + export identity.
    #[serde(default)]
    pub dependencies: Vec<IrDependency>,

    /// Page state entries injected by the state-lifting pass. Values
    /// are always `PropValue::Literal`.
    #[serde(default)]
    pub states: FxHashMap<String, PropValue>,

    /// Page methods injected by the state-lifting pass. Values are
    /// always `PropValue::JsFunction`.
    #[serde(default)]
    pub methods: FxHashMap<String, PropValue>,
}

/// The aggregated root handed to the plugin pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IrProject {
    pub pages: Vec<IrPage>,

    /// Project-level npm dependency map, package name to semver range.
    #[serde(default)]
    pub dependencies: FxHashMap<String, String>,
}
