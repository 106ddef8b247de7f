//! Per-component codegen logic table.
//!
//! Some materials need more than a metadata lookup: a prop spelled one
//! way in the editor renders another way (`Button.text` becomes JSX
//! children), or the whole node is synthesized (`Table` builds its
//! column structure out of editor config). These hooks run inside the
//! parser at fixed points; everything not overridden follows the
//! generic path.

use maquette_relief::{IrDependency, IrNode, PropValue, SchemaNode};
use serde_json::Value;

/// Full node replacement. The parser still parses and appends schema
/// children afterwards, so a transformer only shapes the node itself.
pub type NodeTransformer = fn(&SchemaNode) -> IrNode;

/// Per-prop override. Returning `Some` short-circuits the generic
/// classification chain with a (possibly renamed) classified prop.
pub type PropMapper = fn(key: &str, value: &Value) -> Option<(String, PropValue)>;

/// Post-hoc mutation of a freshly parsed node.
pub type NodeMapper = fn(&mut IrNode);

/// Codegen hooks for one component name. All fields optional; an empty
/// logic entry behaves exactly like no entry.
#[derive(Default, Clone)]
pub struct CodegenLogic {
    pub transformer: Option<NodeTransformer>,
    pub prop_mapper: Option<PropMapper>,
    pub node_mapper: Option<NodeMapper>,

    /// Imports this component's generated code needs beyond its own
    /// dependency (icon packages and the like).
    pub extra_dependencies: Vec<IrDependency>,
}

impl CodegenLogic {
    pub fn with_transformer(mut self, transformer: NodeTransformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn with_prop_mapper(mut self, prop_mapper: PropMapper) -> Self {
        self.prop_mapper = Some(prop_mapper);
        self
    }

    pub fn with_node_mapper(mut self, node_mapper: NodeMapper) -> Self {
        self.node_mapper = Some(node_mapper);
        self
    }

    pub fn with_extra_dependency(mut self, dependency: IrDependency) -> Self {
        self.extra_dependencies.push(dependency);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename_text(key: &str, value: &Value) -> Option<(String, PropValue)> {
        (key == "text").then(|| ("children".to_string(), PropValue::literal(value.clone())))
    }

    #[test]
    fn test_prop_mapper_short_circuits() {
        let logic = CodegenLogic::default().with_prop_mapper(rename_text);
        let mapper = logic.prop_mapper.unwrap();

        let mapped = mapper("text", &Value::String("Click".into()));
        assert_eq!(
            mapped,
            Some(("children".to_string(), PropValue::literal("Click")))
        );
        assert_eq!(mapper("type", &Value::String("primary".into())), None);
    }
}
