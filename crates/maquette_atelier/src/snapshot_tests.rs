//! Snapshot tests for generated output.
//!
//! Full-file snapshots of the stock React + Vite solution, exercised
//! through the public export entry with the in-memory publisher.

use insta::assert_snapshot;
use maquette_relief::SchemaNode;
use serde_json::json;

use crate::export::{export_source_code, ExportOptions};
use crate::publish::PublisherKind;

fn export_files(schema: serde_json::Value) -> Vec<crate::builder::GeneratedFile> {
    let schema: Vec<SchemaNode> = serde_json::from_value(schema).unwrap();
    let artifact = export_source_code(
        &schema,
        ExportOptions {
            publisher: PublisherKind::None,
            ..Default::default()
        },
    )
    .unwrap();
    artifact.files().unwrap().to_vec()
}

fn file_content(files: &[crate::builder::GeneratedFile], path: &str) -> String {
    files
        .iter()
        .find(|f| f.path == path)
        .unwrap_or_else(|| panic!("missing file {path}"))
        .content
        .clone()
}

#[test]
fn snapshot_simple_page() {
    let files = export_files(json!([
        {
            "id": 1,
            "name": "Page",
            "props": {},
            "children": [
                { "id": 2, "name": "Button", "props": { "text": "Click" } }
            ]
        }
    ]));

    assert_snapshot!(file_content(&files, "src/pages/index.tsx"), @r#"
import { Button } from "antd";
import Page from "../components/Page";

function IndexPage() {
  return (
    <Page>
      <Button>Click</Button>
    </Page>
  );
}

export default IndexPage;
"#);
}

#[test]
fn snapshot_modal_page_with_lifted_state() {
    let files = export_files(json!([
        {
            "id": 1,
            "name": "Page",
            "props": {},
            "children": [
                {
                    "id": 2,
                    "name": "Button",
                    "props": {
                        "text": "Open",
                        "onClick": {
                            "actions": [
                                {
                                    "actionType": "componentMethod",
                                    "config": { "componentId": 3, "method": "open" }
                                }
                            ]
                        }
                    }
                },
                { "id": 3, "name": "Modal", "props": { "title": "Hello" } }
            ]
        }
    ]));

    assert_snapshot!(file_content(&files, "src/pages/index.tsx"), @r#"
import { Button, Modal } from "antd";
import { useState } from "react";
import Page from "../components/Page";

function IndexPage() {
  const [open_3, setOpen_3] = useState(false);

  const handleClose_3 = () => { setOpen_3(false) };
  const handleOk_3 = () => { setOpen_3(false) };
  const handleOpen_3 = () => { setOpen_3(true) };

  return (
    <Page>
      <Button onClick={() => { handleOpen_3(); }}>Open</Button>
      <Modal onCancel={handleClose_3} onOk={handleOk_3} open={open_3} title="Hello" />
    </Page>
  );
}

export default IndexPage;
"#);
}

#[test]
fn snapshot_router() {
    let files = export_files(json!([
        { "id": 1, "name": "Page", "props": {} }
    ]));

    assert_snapshot!(file_content(&files, "src/router/index.tsx"), @r#"
import { lazy, Suspense } from "react";
import { createBrowserRouter } from "react-router-dom";

const IndexPage = lazy(() => import("../pages/index"));

export const router = createBrowserRouter([
  {
    path: "/",
    element: (
      <Suspense fallback={null}>
        <IndexPage />
      </Suspense>
    ),
  },
]);
"#);
}

#[test]
fn snapshot_css_module() {
    let files = export_files(json!([
        {
            "id": 1,
            "name": "Page",
            "props": {},
            "children": [
                {
                    "id": 2,
                    "name": "Button",
                    "props": { "text": "Styled" },
                    "styles": { "fontSize": 14, "marginTop": 8, "opacity": 0.5 }
                }
            ]
        }
    ]));

    assert_snapshot!(file_content(&files, "src/pages/index.module.css"), @r#"
.node_2 {
  font-size: 14px;
  margin-top: 8px;
  opacity: 0.5;
}
"#);
}
