//! Package manifest generation.
//!
//! Runs in the finalize phase with the heaviest weight so it observes
//! every dependency registered by the plugins before it.

use std::collections::BTreeMap;

use maquette_relief::IrProject;
use serde_json::json;

use crate::builder::ProjectBuilder;
use crate::error::GenerateError;
use crate::solution::{PluginPhase, ProjectPlugin};

const REACT_VERSION: &str = "^18.3.1";

pub struct ManifestPlugin {
    project_name: String,
}

impl ManifestPlugin {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
        }
    }
}

impl ProjectPlugin for ManifestPlugin {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn phase(&self) -> PluginPhase {
        PluginPhase::Finalize
    }

    fn weight(&self) -> u32 {
        100
    }

    fn run(&self, project: &IrProject, builder: &mut ProjectBuilder) -> Result<(), GenerateError> {
        // Core runtime, then schema-parsed dependencies, then whatever
        // plugins registered. BTreeMap keeps the output sorted and the
        // merge order-independent.
        let mut dependencies: BTreeMap<String, String> = BTreeMap::new();
        dependencies.insert("react".into(), REACT_VERSION.into());
        dependencies.insert("react-dom".into(), REACT_VERSION.into());
        for (package, version) in &project.dependencies {
            dependencies.insert(package.clone(), version.clone());
        }
        for (package, version) in builder.dependencies() {
            dependencies.insert(package.clone(), version.clone());
        }

        let dev_dependencies: BTreeMap<&str, &str> = BTreeMap::from([
            ("@types/react", "^18.3.8"),
            ("@types/react-dom", "^18.3.0"),
            ("@vitejs/plugin-react", "^4.3.1"),
            ("typescript", "^5.6.2"),
            ("vite", "^5.4.7"),
        ]);

        let manifest = json!({
            "name": self.project_name,
            "private": true,
            "version": "0.0.0",
            "type": "module",
            "scripts": {
                "dev": "vite",
                "build": "tsc -b && vite build",
                "preview": "vite preview",
            },
            "dependencies": dependencies,
            "devDependencies": dev_dependencies,
        });

        let mut content = serde_json::to_string_pretty(&manifest)
            .map_err(|e| GenerateError::plugin("manifest", e.to_string()))?;
        content.push('\n');

        builder.add_file("package.json", content);
        Ok(())
    }
}
