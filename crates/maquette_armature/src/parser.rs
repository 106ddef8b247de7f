//! Schema tree parsing.

use maquette_musea::MaterialRegistry;
use maquette_relief::{
    FxHashSet, IrDependency, IrNode, IrPage, IrProject, PropValue, SchemaNode,
};
use tracing::{debug, error};

use crate::prop_value::parse_prop_value;

/// One page document handed to [`SchemaParser::parse_project`].
#[derive(Debug, Clone)]
pub struct PageSource {
    /// Output file stem; the page named `index` becomes the `/` route.
    pub file_name: String,
    pub nodes: Vec<SchemaNode>,
}

impl PageSource {
    pub fn new(file_name: impl Into<String>, nodes: Vec<SchemaNode>) -> Self {
        Self {
            file_name: file_name.into(),
            nodes,
        }
    }
}

/// Per-page dependency accumulator, de-duplicated by identity key in
/// first-seen order.
struct DependencySet {
    seen: FxHashSet<String>,
    deps: Vec<IrDependency>,
}

impl DependencySet {
    fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
            deps: Vec::new(),
        }
    }

    fn add(&mut self, component_name: &str, dep: &IrDependency) {
        if self.seen.insert(dep.dedup_key(component_name)) {
            self.deps.push(dep.clone());
        }
    }
}

/// Schema → IR parser. Pure aside from dependency accumulation; never
/// fails — malformed input degrades node by node.
pub struct SchemaParser<'r> {
    registry: &'r MaterialRegistry,
}

impl<'r> SchemaParser<'r> {
    pub fn new(registry: &'r MaterialRegistry) -> Self {
        Self { registry }
    }

    /// Parse every page, then aggregate the registry's full dependency
    /// set into the project manifest. The full set is deliberate: the
    /// manifest stays valid when components are added at runtime, at
    /// the cost of a slightly larger install.
    pub fn parse_project(&self, pages: &[PageSource]) -> IrProject {
        let mut project = IrProject::default();

        for page in pages {
            project
                .pages
                .push(self.parse_page(&page.file_name, &page.nodes));
        }

        for dep in self.registry.all_dependencies() {
            if let Some(version) = &dep.version {
                project
                    .dependencies
                    .insert(dep.package.clone(), version.clone());
            }
        }

        project
    }

    /// Parse one document into a page. Root selection: the first node
    /// named `Page`, else the first node.
    pub fn parse_page(&self, file_name: &str, nodes: &[SchemaNode]) -> IrPage {
        let mut deps = DependencySet::new();

        let node = match nodes.iter().find(|n| n.name == "Page").or_else(|| nodes.first()) {
            Some(root) => self.parse_node(root, &mut deps),
            None => {
                error!(page = file_name, "empty schema document, emitting empty page");
                IrNode {
                    component_name: "div".into(),
                    ..Default::default()
                }
            }
        };

        IrPage {
            id: node.id.clone(),
            file_name: file_name.to_string(),
            node,
            dependencies: deps.deps,
            ..Default::default()
        }
    }

    /// Parse one node. Resolution order: transformer override, registry
    /// metadata (placeholder fallback), prop classification, node
    /// mapper, children.
    fn parse_node(&self, node: &SchemaNode, deps: &mut DependencySet) -> IrNode {
        let logic = self.registry.logic(&node.name);

        let mut ir = match logic.and_then(|l| l.transformer) {
            Some(transformer) => transformer(node),
            None => self.resolve_node(node),
        };

        if let Some(dep) = &ir.dependency {
            deps.add(&ir.component_name, dep);
        }
        if let Some(logic) = logic {
            for extra in &logic.extra_dependencies {
                deps.add(&ir.component_name, extra);
            }
        }

        if ir.styles.is_none() {
            if let Some(styles) = &node.styles {
                debug!(id = %ir.id, "carrying styles for css extraction");
                ir.styles = Some(styles.clone());
            }
        }

        if let Some(mapper) = logic.and_then(|l| l.node_mapper) {
            mapper(&mut ir);
        }

        for child in &node.children {
            ir.children.push(self.parse_node(child, deps));
        }

        ir
    }

    /// Registry lookup plus generic prop classification. Unrecognized
    /// names become an inert `div` carrying a diagnostic prop; children
    /// are still traversed by the caller.
    fn resolve_node(&self, node: &SchemaNode) -> IrNode {
        let mut ir = match self.registry.get(&node.name) {
            Some(meta) => IrNode {
                id: node.id.clone(),
                component_name: meta.component_name.clone(),
                dependency: Some(meta.dependency.clone()),
                ..Default::default()
            },
            None => {
                error!(component = %node.name, id = %node.id, "unknown component, substituting div");
                let mut placeholder = IrNode {
                    id: node.id.clone(),
                    component_name: "div".into(),
                    ..Default::default()
                };
                placeholder.props.insert(
                    "data-unknown-component".into(),
                    PropValue::literal(node.name.clone()),
                );
                placeholder
            }
        };

        for (key, value) in &node.props {
            let (key, value) = parse_prop_value(self.registry, &node.name, key, value);
            ir.props.insert(key, value);
        }

        ir
    }
}
