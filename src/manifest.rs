//! Graph manifests: declarative graph descriptions for the CLI
//!
//! A manifest names a workspace, its nodes (keyed by short human-readable
//! keys), and the edges between them. The CLI loads one from YAML or JSON
//! and builds the described graph through the engine, mapping keys to the
//! generated node ids.

use crate::graph::{GraphId, LatticeEngine, LatticeError, NodeId, SpecDocument};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or building a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node key '{0}'")]
    DuplicateKey(String),

    #[error("edge references unknown node key '{0}'")]
    UnknownKey(String),

    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// One node declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDecl {
    /// Short key other manifest entries (and CLI selections) refer to
    pub key: String,
    /// Display label
    pub label: String,
    /// The node's specification document
    pub spec: SpecDocument,
}

/// One edge declaration, endpoints by node key.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDecl {
    pub from: String,
    pub to: String,
    pub relationship: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A declarative description of one graph.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphManifest {
    /// Workspace path the graph belongs to
    pub workspace: String,
    #[serde(default)]
    pub nodes: Vec<NodeDecl>,
    #[serde(default)]
    pub edges: Vec<EdgeDecl>,
}

/// A built graph plus the key-to-id mapping the manifest established.
#[derive(Debug)]
pub struct BuiltGraph {
    pub graph_id: GraphId,
    keys: HashMap<String, NodeId>,
}

impl BuiltGraph {
    /// Look up the generated node id for a manifest key
    pub fn node_id(&self, key: &str) -> Option<&NodeId> {
        self.keys.get(key)
    }

    /// Resolve a list of manifest keys, failing on the first unknown one
    pub fn node_ids(&self, keys: &[String]) -> Result<Vec<NodeId>, ManifestError> {
        keys.iter()
            .map(|k| {
                self.keys
                    .get(k)
                    .cloned()
                    .ok_or_else(|| ManifestError::UnknownKey(k.clone()))
            })
            .collect()
    }
}

impl GraphManifest {
    /// Parse a manifest from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest from disk; `.json` parses as JSON, anything else
    /// as YAML (which also accepts JSON).
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// Build the described graph through the engine.
    pub fn build(&self, engine: &LatticeEngine) -> Result<BuiltGraph, ManifestError> {
        let graph = engine.create_graph(self.workspace.clone());
        let mut keys: HashMap<String, NodeId> = HashMap::new();

        for decl in &self.nodes {
            if keys.contains_key(&decl.key) {
                return Err(ManifestError::DuplicateKey(decl.key.clone()));
            }
            let node = engine.add_node(&graph.id, decl.label.clone(), decl.spec.clone())?;
            keys.insert(decl.key.clone(), node.id);
        }

        for decl in &self.edges {
            let from = keys
                .get(&decl.from)
                .ok_or_else(|| ManifestError::UnknownKey(decl.from.clone()))?;
            let to = keys
                .get(&decl.to)
                .ok_or_else(|| ManifestError::UnknownKey(decl.to.clone()))?;
            engine.add_edge(
                &graph.id,
                from,
                to,
                decl.relationship.clone(),
                decl.description.clone(),
            )?;
        }

        Ok(BuiltGraph {
            graph_id: graph.id,
            keys,
        })
    }
}
