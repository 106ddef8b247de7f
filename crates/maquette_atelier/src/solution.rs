//! Solutions: the bundled pipeline configuration.

use maquette_relief::{IrPage, IrProject};
use tracing::debug;

use crate::builder::{GeneratedFile, ModuleBuilder, ProjectBuilder};
use crate::error::GenerateError;
use crate::plugins::{ComponentsPlugin, CssModulesPlugin, EntryPlugin, JsxPlugin, ManifestPlugin, RouterPlugin};
use crate::postprocess::OutputNormalizer;
use crate::template::vite_react_template;

/// Coarse execution phase for project plugins. Within a phase, weight
/// breaks ties; across phases, earlier phases always run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PluginPhase {
    /// Scaffolding that later plugins may overwrite or extend.
    Setup,
    /// The bulk of generation.
    Generate,
    /// Observers of everything before them — the manifest lives here so
    /// it sees every registered dependency.
    Finalize,
}

/// Runs once per page, walking and possibly mutating that page's IR
/// tree. Order within the component plugin list is significant: CSS
/// extraction must precede JSX emission, because the first rewrites the
/// nodes the second reads.
pub trait ComponentPlugin {
    fn name(&self) -> &'static str;

    fn run(
        &self,
        page: &mut IrPage,
        module: &mut ModuleBuilder,
        project: &mut ProjectBuilder,
    ) -> Result<(), GenerateError>;
}

/// Runs once per project, in (phase, weight) order, lower first.
pub trait ProjectPlugin {
    fn name(&self) -> &'static str;

    fn phase(&self) -> PluginPhase {
        PluginPhase::Generate
    }

    fn weight(&self) -> u32 {
        50
    }

    fn run(&self, project: &IrProject, builder: &mut ProjectBuilder) -> Result<(), GenerateError>;
}

/// Pure file → file transform applied after all plugins.
pub trait PostProcessor {
    fn name(&self) -> &'static str;

    fn process(&self, file: GeneratedFile) -> GeneratedFile;
}

/// A template, ordered plugin lists, and post-processors. The publisher
/// is chosen separately at the export boundary.
pub struct Solution {
    /// Static scaffold files, added to the builder before any plugin
    /// runs.
    pub template: Vec<GeneratedFile>,
    pub component_plugins: Vec<Box<dyn ComponentPlugin>>,
    pub project_plugins: Vec<Box<dyn ProjectPlugin>>,
    pub post_processors: Vec<Box<dyn PostProcessor>>,
}

impl Solution {
    /// Run the full pipeline and return the generated files in path
    /// order. Strictly sequential; the first failing plugin aborts the
    /// run and no files are returned.
    pub fn run(&self, project: &mut IrProject) -> Result<Vec<GeneratedFile>, GenerateError> {
        let mut builder = ProjectBuilder::new();

        for file in &self.template {
            builder.add_file(file.path.clone(), file.content.clone());
        }

        for page in &mut project.pages {
            let mut module = ModuleBuilder::new();
            for plugin in &self.component_plugins {
                debug!(plugin = plugin.name(), page = %page.file_name, "component plugin");
                plugin.run(page, &mut module, &mut builder)?;
            }
        }

        let mut project_plugins: Vec<&dyn ProjectPlugin> =
            self.project_plugins.iter().map(Box::as_ref).collect();
        project_plugins.sort_by_key(|p| (p.phase(), p.weight()));
        for plugin in project_plugins {
            debug!(plugin = plugin.name(), "project plugin");
            plugin.run(project, &mut builder)?;
        }

        let mut files = builder.into_files();
        for processor in &self.post_processors {
            files = files
                .into_iter()
                .map(|file| processor.process(file))
                .collect();
        }

        Ok(files)
    }
}

/// The stock React + Vite solution.
pub fn default_solution(project_name: &str) -> Solution {
    Solution {
        template: vite_react_template(project_name),
        component_plugins: vec![
            Box::new(CssModulesPlugin::default()),
            Box::new(JsxPlugin::default()),
        ],
        project_plugins: vec![
            Box::new(ComponentsPlugin),
            Box::new(RouterPlugin),
            Box::new(EntryPlugin),
            Box::new(ManifestPlugin::new(project_name)),
        ],
        post_processors: vec![Box::new(OutputNormalizer)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingPlugin;

    impl ComponentPlugin for FailingPlugin {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn run(
            &self,
            _page: &mut IrPage,
            _module: &mut ModuleBuilder,
            _project: &mut ProjectBuilder,
        ) -> Result<(), GenerateError> {
            Err(GenerateError::plugin("failing", "boom"))
        }
    }

    #[test]
    fn test_failing_plugin_aborts_run() {
        let solution = Solution {
            template: Vec::new(),
            component_plugins: vec![Box::new(FailingPlugin)],
            project_plugins: Vec::new(),
            post_processors: Vec::new(),
        };

        let mut project = IrProject {
            pages: vec![IrPage::default()],
            ..Default::default()
        };

        assert!(solution.run(&mut project).is_err());
    }

    #[test]
    fn test_project_plugins_run_in_phase_weight_order() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        struct Recording {
            name: &'static str,
            phase: PluginPhase,
            weight: u32,
            counter: Arc<AtomicU32>,
            seen_at: Arc<AtomicU32>,
        }

        impl ProjectPlugin for Recording {
            fn name(&self) -> &'static str {
                self.name
            }
            fn phase(&self) -> PluginPhase {
                self.phase
            }
            fn weight(&self) -> u32 {
                self.weight
            }
            fn run(
                &self,
                _project: &IrProject,
                _builder: &mut ProjectBuilder,
            ) -> Result<(), GenerateError> {
                self.seen_at
                    .store(self.counter.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
                Ok(())
            }
        }

        let counter = Arc::new(AtomicU32::new(0));
        let manifest_at = Arc::new(AtomicU32::new(u32::MAX));
        let scaffold_at = Arc::new(AtomicU32::new(u32::MAX));

        let solution = Solution {
            template: Vec::new(),
            component_plugins: Vec::new(),
            project_plugins: vec![
                Box::new(Recording {
                    name: "manifest",
                    phase: PluginPhase::Finalize,
                    weight: 100,
                    counter: counter.clone(),
                    seen_at: manifest_at.clone(),
                }),
                Box::new(Recording {
                    name: "scaffold",
                    phase: PluginPhase::Setup,
                    weight: 0,
                    counter: counter.clone(),
                    seen_at: scaffold_at.clone(),
                }),
            ],
            post_processors: Vec::new(),
        };

        let mut project = IrProject::default();
        solution.run(&mut project).unwrap();

        // Declared manifest-first, but phase ordering runs it last.
        assert!(scaffold_at.load(Ordering::SeqCst) < manifest_at.load(Ordering::SeqCst));
    }
}
