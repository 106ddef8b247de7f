//! Import dependency descriptors.

use serde::{Deserialize, Serialize};

/// Fully describes how to import a render target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IrDependency {
    /// npm package, or a relative path for local runtime components.
    pub package: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// `true` emits `import { X } from "pkg"`, `false` a default import.
    pub destructuring: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,

    /// Member access on the export, e.g. `Typography.Text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
}

impl IrDependency {
    /// Destructured import from an npm package.
    pub fn destructured(package: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            destructuring: true,
            export_name: Some(export_name.into()),
            ..Default::default()
        }
    }

    /// Default import, typically a local runtime component.
    pub fn default_import(package: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            destructuring: false,
            export_name: Some(export_name.into()),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_sub_name(mut self, sub_name: impl Into<String>) -> Self {
        self.sub_name = Some(sub_name.into());
        self
    }

    /// Identity key for de-duplication: package plus export name, with
    /// the component name standing in when no export name is declared.
    pub fn dedup_key(&self, component_name: &str) -> String {
        let export = self.export_name.as_deref().unwrap_or(component_name);
        let mut key = String::with_capacity(self.package.len() + export.len() + 1);
        key.push_str(&self.package);
        key.push('-');
        key.push_str(export);
        key
    }
}

/// De-duplicate dependencies by identity key, preserving first-seen
/// order. Idempotent: feeding the output back in yields the same list.
pub fn dedup_dependencies<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a IrDependency)>,
) -> Vec<IrDependency> {
    let mut seen = rustc_hash::FxHashSet::default();
    let mut out = Vec::new();
    for (component_name, dep) in entries {
        if seen.insert(dep.dedup_key(component_name)) {
            out.push(dep.clone());
        }
    }
    out
}
