//! Material metadata and the registry.

use maquette_relief::{dedup_dependencies, IrDependency};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logic::CodegenLogic;

/// Maps an imperative method to the prop that backs it once code is
/// generated. A declarative "call `open` on this Modal" becomes page
/// state bound to the Modal's `open` prop with this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBinding {
    pub prop: String,
    pub value: Value,
}

/// One imperative method a material exposes to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodMeta {
    pub name: String,

    pub state_binding: StateBinding,

    /// Event prop that should fire this method from inside the
    /// component (e.g. `onCancel` closes a Modal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_binding: Option<String>,
}

/// Static description of one material: its render target identity and
/// everything the generators need to know about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialMeta {
    /// Render-target name emitted into JSX. May differ from the schema
    /// name (`Grid` renders as `Row`, `Text` as `Typography.Text`).
    pub component_name: String,

    pub dependency: IrDependency,

    /// Whether schema children render inside this component.
    #[serde(default)]
    pub is_container: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodMeta>,
}

impl MaterialMeta {
    pub fn new(component_name: impl Into<String>, dependency: IrDependency) -> Self {
        Self {
            component_name: component_name.into(),
            dependency,
            is_container: false,
            methods: Vec::new(),
        }
    }

    pub fn container(mut self) -> Self {
        self.is_container = true;
        self
    }

    pub fn with_method(mut self, method: MethodMeta) -> Self {
        self.methods.push(method);
        self
    }

    pub fn method(&self, name: &str) -> Option<&MethodMeta> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Methods that reset `prop` to `false` and declare an event
    /// binding. These are the close affordances the state-lifting pass
    /// wires automatically.
    pub fn closing_methods<'a>(&'a self, prop: &'a str) -> impl Iterator<Item = &'a MethodMeta> {
        self.methods.iter().filter(move |m| {
            m.state_binding.prop == prop
                && m.state_binding.value == Value::Bool(false)
                && m.event_binding.is_some()
        })
    }
}

/// Immutable mapping from schema component names to material metadata
/// and per-component codegen logic.
#[derive(Default)]
pub struct MaterialRegistry {
    materials: FxHashMap<String, MaterialMeta>,
    logic: FxHashMap<String, CodegenLogic>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema_name: impl Into<String>, meta: MaterialMeta) {
        self.materials.insert(schema_name.into(), meta);
    }

    pub fn register_logic(&mut self, schema_name: impl Into<String>, logic: CodegenLogic) {
        self.logic.insert(schema_name.into(), logic);
    }

    pub fn get(&self, schema_name: &str) -> Option<&MaterialMeta> {
        self.materials.get(schema_name)
    }

    pub fn logic(&self, schema_name: &str) -> Option<&CodegenLogic> {
        self.logic.get(schema_name)
    }

    pub fn contains(&self, schema_name: &str) -> bool {
        self.materials.contains_key(schema_name)
    }

    /// Reverse lookup by render-target name. IR nodes carry the render
    /// target, not the schema name, so passes running after the parser
    /// resolve metadata through this.
    pub fn find_by_component_name(&self, component_name: &str) -> Option<&MaterialMeta> {
        self.materials
            .values()
            .find(|meta| meta.component_name == component_name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Every dependency in the catalog, de-duplicated by identity key
    /// and sorted for stable output. The project manifest takes this
    /// full set rather than a per-page reachability subset, so
    /// components added at runtime keep resolving.
    pub fn all_dependencies(&self) -> Vec<IrDependency> {
        let mut entries: Vec<(&str, &IrDependency)> = self
            .materials
            .values()
            .map(|meta| (meta.component_name.as_str(), &meta.dependency))
            .collect();
        entries.sort_by_key(|(name, dep)| dep.dedup_key(name));
        dedup_dependencies(entries)
    }
}
