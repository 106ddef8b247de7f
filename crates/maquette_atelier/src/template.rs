//! Static project scaffold.
//!
//! Pure files that every generated project carries unchanged, added to
//! the builder before any plugin runs.

use crate::builder::GeneratedFile;

const VITE_CONFIG: &str = r#"import { defineConfig } from "vite";
import react from "@vitejs/plugin-react";

export default defineConfig({
  plugins: [react()],
});
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "useDefineForClassFields": true,
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "skipLibCheck": true,
    "moduleResolution": "bundler",
    "allowImportingTsExtensions": true,
    "isolatedModules": true,
    "moduleDetection": "force",
    "noEmit": true,
    "jsx": "react-jsx",
    "strict": true,
    "noUnusedLocals": false,
    "noFallthroughCasesInSwitch": true
  },
  "include": ["src"]
}
"#;

const TSCONFIG_NODE: &str = r#"{
  "compilerOptions": {
    "target": "ES2022",
    "lib": ["ES2023"],
    "module": "ESNext",
    "skipLibCheck": true,
    "moduleResolution": "bundler",
    "isolatedModules": true,
    "noEmit": true
  },
  "include": ["vite.config.ts"]
}
"#;

const INDEX_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, "Segoe UI", Roboto, "Helvetica Neue", sans-serif;
  background: #f5f5f5;
}

.page {
  min-height: 100vh;
  padding: 16px;
}

.page-header {
  margin-bottom: 16px;
}
"#;

const GITIGNORE: &str = r#"node_modules
dist
*.local
"#;

/// Scaffold for the React + Vite solution. The HTML title carries the
/// project name.
pub fn vite_react_template(project_name: &str) -> Vec<GeneratedFile> {
    let index_html = format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{project_name}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#
    );

    vec![
        GeneratedFile::new("index.html", index_html),
        GeneratedFile::new("vite.config.ts", VITE_CONFIG),
        GeneratedFile::new("tsconfig.json", TSCONFIG),
        GeneratedFile::new("tsconfig.node.json", TSCONFIG_NODE),
        GeneratedFile::new("src/index.css", INDEX_CSS),
        GeneratedFile::new(".gitignore", GITIGNORE),
    ]
}
