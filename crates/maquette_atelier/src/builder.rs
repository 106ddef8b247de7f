//! Module and project builders.
//!
//! The builders are the communication channel between plugins: the
//! module builder accumulates one file's imports and style fragments,
//! the project builder accumulates the global file map and the
//! dependency set plugins register along the way.

use maquette_relief::{FxHashMap, FxHashSet, IrDependency};
use tracing::warn;

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Project-relative path, forward slashes.
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Per-file import/style accumulator, de-duplicating by package +
/// export identity.
#[derive(Default)]
pub struct ModuleBuilder {
    imports: Vec<(String, IrDependency)>,
    seen: FxHashSet<String>,
    styles: Vec<String>,
    style_seen: FxHashSet<String>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_import(&mut self, component_name: &str, dependency: &IrDependency) {
        if self.seen.insert(dependency.dedup_key(component_name)) {
            self.imports
                .push((component_name.to_string(), dependency.clone()));
        }
    }

    pub fn add_style(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if self.style_seen.insert(fragment.clone()) {
            self.styles.push(fragment);
        }
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn has_imports(&self) -> bool {
        !self.imports.is_empty()
    }

    /// Render the import block: destructured imports merged per
    /// package, default imports one per line, packages in sorted order
    /// for stable output.
    pub fn render_imports(&self) -> String {
        let mut destructured: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        let mut defaults: Vec<(&str, &str)> = Vec::new();

        for (component_name, dep) in &self.imports {
            let export = dep.export_name.as_deref().unwrap_or(component_name);
            if dep.destructuring {
                destructured.entry(dep.package.as_str()).or_default().push(export);
            } else {
                defaults.push((export, dep.package.as_str()));
            }
        }

        let mut out = String::new();

        let mut packages: Vec<_> = destructured.into_iter().collect();
        packages.sort_by_key(|(package, _)| *package);
        for (package, mut exports) in packages {
            exports.sort_unstable();
            exports.dedup();
            out.push_str("import { ");
            out.push_str(&exports.join(", "));
            out.push_str(" } from \"");
            out.push_str(package);
            out.push_str("\";\n");
        }

        defaults.sort();
        for (export, package) in defaults {
            out.push_str("import ");
            out.push_str(export);
            out.push_str(" from \"");
            out.push_str(package);
            out.push_str("\";\n");
        }

        out
    }
}

/// Global file map plus the plugin-registered dependency set.
#[derive(Default)]
pub struct ProjectBuilder {
    files: FxHashMap<String, GeneratedFile>,
    dependencies: FxHashMap<String, String>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file; overwriting an existing path is allowed but
    /// logged, since it usually means two plugins disagree.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let file = GeneratedFile::new(path, content);
        if self.files.contains_key(&file.path) {
            warn!(path = %file.path, "overwriting previously generated file");
        }
        self.files.insert(file.path.clone(), file);
    }

    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.get(path)
    }

    /// Register an npm dependency for the manifest. Keyed by package
    /// name, so registration order does not matter.
    pub fn add_dependency(&mut self, package: impl Into<String>, version: impl Into<String>) {
        self.dependencies.insert(package.into(), version.into());
    }

    pub fn dependencies(&self) -> &FxHashMap<String, String> {
        &self.dependencies
    }

    /// Files in path order.
    pub fn into_files(self) -> Vec<GeneratedFile> {
        let mut files: Vec<_> = self.files.into_values().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }
}
