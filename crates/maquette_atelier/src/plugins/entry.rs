//! Application entry points.

use maquette_relief::IrProject;

use crate::builder::ProjectBuilder;
use crate::error::GenerateError;
use crate::solution::ProjectPlugin;

const MAIN_TSX: &str = r#"import { StrictMode } from "react";
import { createRoot } from "react-dom/client";
import App from "./App";
import "./index.css";

createRoot(document.getElementById("root")!).render(
  <StrictMode>
    <App />
  </StrictMode>
);
"#;

const APP_TSX: &str = r#"import { RouterProvider } from "react-router-dom";
import { router } from "./router";

function App() {
  return <RouterProvider router={router} />;
}

export default App;
"#;

/// `src/main.tsx` and `src/App.tsx`.
pub struct EntryPlugin;

impl ProjectPlugin for EntryPlugin {
    fn name(&self) -> &'static str {
        "entry"
    }

    fn run(&self, _project: &IrProject, builder: &mut ProjectBuilder) -> Result<(), GenerateError> {
        builder.add_file("src/main.tsx", MAIN_TSX);
        builder.add_file("src/App.tsx", APP_TSX);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_files_generated() {
        let mut builder = ProjectBuilder::new();
        EntryPlugin.run(&IrProject::default(), &mut builder).unwrap();

        assert!(builder.file("src/main.tsx").unwrap().content.contains("createRoot"));
        assert!(builder.file("src/App.tsx").unwrap().content.contains("RouterProvider"));
    }
}
