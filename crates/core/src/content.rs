//! Content node domain types.
//!
//! A content node is one unit of authored instruction plus its optional
//! prior response and structural links to other nodes. Nodes are created
//! and persisted by an external store; this crate only reads
//! prompt/context/response and writes `meta.messages` (deterministically)
//! during assembly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// The id-indexed lookup map supplied by the content store.
///
/// All inter-node relationships (predecessor chains, folder sibling sets)
/// are expressed as id indices into this arena.
pub type ContentMap = HashMap<String, Content>;

/// A single content node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Full path of the node within the store
    pub path: String,

    /// File name (last path segment)
    pub name: String,

    /// The authored instruction text
    pub prompt: String,

    /// Previously generated text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Structural links to other nodes
    #[serde(default)]
    pub context: ContextLinks,

    /// Derived generation inputs, written by the engine
    #[serde(default)]
    pub meta: ContentMeta,
}

impl Content {
    /// Create a node with its name derived from the last path segment.
    pub fn new(path: impl Into<String>, prompt: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Self {
            path,
            name,
            prompt: prompt.into(),
            response: None,
            context: ContextLinks::default(),
            meta: ContentMeta::default(),
        }
    }

    /// The directory portion of this node's path ("" for bare names).
    pub fn dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// Whether this node's goal is to complete an existing file.
    pub fn is_edit(&self) -> bool {
        self.context.edit.is_some()
    }
}

/// Structural links a node carries to the rest of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextLinks {
    /// Id of the immediately preceding node in a linear history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<String>,

    /// Sibling ids grouped under the same directory. When present, the
    /// folder strategy is used and no predecessor traversal is performed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Vec<String>>,

    /// Ordered system-level instruction fragments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system: Vec<String>,

    /// Background code/text blocks injected as non-authoritative context
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub augment: Vec<String>,

    /// Present only when the node completes an existing file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditSpec>,
}

/// Descriptor for edit mode: which file the model should complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditSpec {
    /// Path of the file being completed
    pub file: String,
}

/// Derived generation inputs. The engine overwrites these fields on every
/// assembly pass; recomputation is idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentMeta {
    /// The resolved message sequence for this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,

    /// Explicit temperature override for this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_derived_from_path() {
        let node = Content::new("docs/intro/10_overview.md", "Write an overview");
        assert_eq!(node.name, "10_overview.md");
        assert_eq!(node.dir(), "docs/intro");
    }

    #[test]
    fn bare_name_has_empty_dir() {
        let node = Content::new("notes.md", "Take notes");
        assert_eq!(node.name, "notes.md");
        assert_eq!(node.dir(), "");
    }

    #[test]
    fn edit_detection() {
        let mut node = Content::new("src/gen.md", "Finish the file");
        assert!(!node.is_edit());
        node.context.edit = Some(EditSpec {
            file: "src/gen.py".into(),
        });
        assert!(node.is_edit());
    }

    #[test]
    fn content_serialization_skips_empty_links() {
        let node = Content::new("a.md", "prompt");
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("predecessor"));
        assert!(!json.contains("augment"));
        assert!(!json.contains("edit"));
    }
}
