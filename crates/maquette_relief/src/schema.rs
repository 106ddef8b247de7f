//! Schema node types.
//!
//! The Schema is the document format of the visual editor: a tree of
//! component nodes with free-form JSON props. Editor documents address
//! nodes by numeric or string ids, so [`NodeId`] accepts both on the
//! wire and normalizes to a string.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a node within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or numeric node id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
                Ok(NodeId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
                Ok(NodeId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
                Ok(NodeId(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<NodeId, E> {
                // Editors that round-trip through JS number types may hand us
                // integral floats.
                if v.fract() == 0.0 {
                    Ok(NodeId((v as i64).to_string()))
                } else {
                    Ok(NodeId(v.to_string()))
                }
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// One component node as authored in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    pub id: NodeId,

    /// Logical component name, resolved against the material registry.
    pub name: String,

    #[serde(default)]
    pub props: FxHashMap<String, Value>,

    /// Human-readable label shown in the editor outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,

    /// Inline style map captured by the editor's style panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Value>,
}

impl SchemaNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: &NodeId) -> Option<&SchemaNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_accepts_numbers_and_strings() {
        let numeric: NodeId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric, NodeId::new("42"));

        let string: NodeId = serde_json::from_str("\"node_7\"").unwrap();
        assert_eq!(string, NodeId::new("node_7"));
    }

    #[test]
    fn test_schema_node_round_trip() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Page",
            "props": {},
            "children": [
                { "id": 2, "name": "Button", "parentId": 1, "props": { "text": "Click" } }
            ]
        });

        let node: SchemaNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.name, "Page");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].parent_id, Some(NodeId::new("1")));
    }

    #[test]
    fn test_find_descends_into_children() {
        let mut root = SchemaNode::new("1", "Page");
        let mut row = SchemaNode::new("2", "Grid");
        row.children.push(SchemaNode::new("3", "Button"));
        root.children.push(row);

        assert_eq!(root.find(&NodeId::new("3")).unwrap().name, "Button");
        assert!(root.find(&NodeId::new("9")).is_none());
    }
}
