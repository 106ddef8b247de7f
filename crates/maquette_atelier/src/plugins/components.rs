//! Runtime wrapper components.
//!
//! Abstract materials (Page, PageHeader) have no antd counterpart; the
//! generated project carries small local components for them. Only the
//! wrappers some page actually imports are emitted.

use maquette_relief::{FxHashSet, IrProject};
use tracing::warn;

use crate::builder::ProjectBuilder;
use crate::error::GenerateError;
use crate::solution::ProjectPlugin;

const PAGE_TSX: &str = r#"import { ReactNode } from "react";

interface PageProps {
  children?: ReactNode;
  className?: string;
}

function Page({ children, className }: PageProps) {
  return <div className={className ?? "page"}>{children}</div>;
}

export default Page;
"#;

const PAGE_HEADER_TSX: &str = r#"interface PageHeaderProps {
  title?: string;
  subTitle?: string;
  className?: string;
}

function PageHeader({ title, subTitle, className }: PageHeaderProps) {
  return (
    <header className={className ?? "page-header"}>
      <h1>{title}</h1>
      {subTitle && <p>{subTitle}</p>}
    </header>
  );
}

export default PageHeader;
"#;

pub struct ComponentsPlugin;

impl ProjectPlugin for ComponentsPlugin {
    fn name(&self) -> &'static str {
        "components"
    }

    fn phase(&self) -> crate::solution::PluginPhase {
        crate::solution::PluginPhase::Setup
    }

    fn run(&self, project: &IrProject, builder: &mut ProjectBuilder) -> Result<(), GenerateError> {
        let mut wanted = FxHashSet::default();
        for page in &project.pages {
            for dep in &page.dependencies {
                if let Some(component) = dep.package.strip_prefix("../components/") {
                    wanted.insert(component.to_string());
                }
            }
        }

        let mut wanted: Vec<_> = wanted.into_iter().collect();
        wanted.sort_unstable();
        for component in wanted {
            let source = match component.as_str() {
                "Page" => PAGE_TSX,
                "PageHeader" => PAGE_HEADER_TSX,
                other => {
                    warn!(component = other, "no runtime wrapper template, skipping");
                    continue;
                }
            };
            builder.add_file(format!("src/components/{component}.tsx"), source);
        }
        Ok(())
    }
}
