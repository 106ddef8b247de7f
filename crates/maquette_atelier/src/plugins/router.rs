//! Route table generation.

use maquette_relief::IrProject;

use crate::builder::ProjectBuilder;
use crate::context::CodegenContext;
use crate::error::GenerateError;
use crate::plugins::page_component_name;
use crate::solution::ProjectPlugin;

const ROUTER_VERSION: &str = "^6.26.2";

/// One lazy route per page; the page named `index` serves `/`.
pub struct RouterPlugin;

impl ProjectPlugin for RouterPlugin {
    fn name(&self) -> &'static str {
        "router"
    }

    fn run(&self, project: &IrProject, builder: &mut ProjectBuilder) -> Result<(), GenerateError> {
        builder.add_dependency("react-router-dom", ROUTER_VERSION);

        let mut pages: Vec<_> = project.pages.iter().map(|p| p.file_name.as_str()).collect();
        pages.sort_unstable();

        let mut ctx = CodegenContext::new();
        ctx.push_line("import { lazy, Suspense } from \"react\";");
        ctx.push("import { createBrowserRouter } from \"react-router-dom\";");
        ctx.blank_line();

        for page in &pages {
            ctx.newline();
            ctx.push(&format!(
                "const {} = lazy(() => import(\"../pages/{page}\"));",
                page_component_name(page)
            ));
        }
        ctx.blank_line();

        ctx.newline();
        ctx.push("export const router = createBrowserRouter([");
        ctx.indent();
        for page in &pages {
            let path = if *page == "index" {
                "/".to_string()
            } else {
                format!("/{page}")
            };
            ctx.newline();
            ctx.push("{");
            ctx.indent();
            ctx.newline();
            ctx.push(&format!("path: \"{path}\","));
            ctx.newline();
            ctx.push("element: (");
            ctx.indent();
            ctx.newline();
            ctx.push("<Suspense fallback={null}>");
            ctx.indent();
            ctx.newline();
            ctx.push(&format!("<{} />", page_component_name(page)));
            ctx.deindent();
            ctx.newline();
            ctx.push("</Suspense>");
            ctx.deindent();
            ctx.newline();
            ctx.push("),");
            ctx.deindent();
            ctx.newline();
            ctx.push("},");
        }
        ctx.deindent();
        ctx.newline();
        ctx.push_line("]);");

        builder.add_file("src/router/index.tsx", ctx.into_code());
        Ok(())
    }
}
