//! Node representation: a specification fragment with a label and a
//! goal/interface-bearing document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
///
/// Serializes as a plain string. Generated ids are UUIDs; they are never
/// reused or recycled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new random NodeId (UUID-based)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a NodeId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A declared interface surface entry: one named, typed input or output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfacePoint {
    /// Interface name (e.g. "temperature")
    pub name: String,
    /// Interface type (e.g. "number"); an open string, not a closed enum
    #[serde(rename = "type")]
    pub type_name: String,
}

impl InterfacePoint {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// True if this entry matches `other` by both name and type.
    pub fn matches(&self, other: &InterfacePoint) -> bool {
        self.name == other.name && self.type_name == other.type_name
    }
}

/// Declared input/output interfaces on a node's composition descriptor.
///
/// Absent lists default to empty; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSpec {
    /// Interfaces this node's fragment makes available to others
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<InterfacePoint>,
    /// Interfaces this node's fragment needs from others
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<InterfacePoint>,
}

/// The specification document carried by a node.
///
/// Only `goal` and `composition` are read by the engine; everything else in
/// the document is preserved untouched in `extra` and never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    /// What this fragment is for
    #[serde(default)]
    pub goal: String,
    /// Declared provides/requires surfaces, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<CompositionSpec>,
    /// Fields the engine doesn't interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SpecDocument {
    /// Create a document with just a goal
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            composition: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the composition descriptor
    pub fn with_composition(mut self, composition: CompositionSpec) -> Self {
        self.composition = Some(composition);
        self
    }

    /// The declared provides list, empty when no descriptor is present
    pub fn provides(&self) -> &[InterfacePoint] {
        self.composition
            .as_ref()
            .map(|c| c.provides.as_slice())
            .unwrap_or(&[])
    }

    /// The declared requires list, empty when no descriptor is present
    pub fn requires(&self) -> &[InterfacePoint] {
        self.composition
            .as_ref()
            .map(|c| c.requires.as_slice())
            .unwrap_or(&[])
    }
}

/// A node in the composition graph: one unit of specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Display string
    pub label: String,
    /// The specification document
    pub spec: SpecDocument,
    /// When the node was created
    pub created_at: DateTime<Utc>,
}

impl Node {
    /// Create a new node with the given label and spec document
    pub fn new(label: impl Into<String>, spec: SpecDocument) -> Self {
        Self {
            id: NodeId::new(),
            label: label.into(),
            spec,
            created_at: Utc::now(),
        }
    }

    /// The node's provides list (empty when undeclared)
    pub fn provides(&self) -> &[InterfacePoint] {
        self.spec.provides()
    }

    /// The node's requires list (empty when undeclared)
    pub fn requires(&self) -> &[InterfacePoint] {
        self.spec.requires()
    }
}
