//! Graph: a workspace-scoped collection of spec nodes and edges

use super::edge::Edge;
use super::engine::LatticeError;
use super::node::{Node, NodeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a graph
///
/// Serializes as a plain string (UUID-based).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    /// Create a new random GraphId (UUID-based)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a GraphId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GraphId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Metadata about a graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// When the graph was created
    pub created_at: Option<DateTime<Utc>>,
    /// When the graph was last updated
    pub updated_at: Option<DateTime<Utc>>,
}

/// A node's neighborhood, partitioned by edge direction.
///
/// `incoming` holds nodes with an edge *into* the queried node; `outgoing`
/// holds nodes the queried node has an edge *to*. Together they cover every
/// incident edge exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct Neighbors {
    pub incoming: Vec<Node>,
    pub outgoing: Vec<Node>,
}

/// A workspace-scoped container of nodes and edges.
///
/// The graph exclusively owns its contents: no node or edge is shared
/// across graphs. Structural invariants enforced here:
///
/// - no edge references a node absent from the graph (node removal
///   cascades to incident edges in the same call);
/// - no self-edges;
/// - at most one edge per ordered `(source, target)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Unique identifier
    pub id: GraphId,
    /// Opaque workspace path this graph belongs to
    pub workspace_path: String,
    nodes: HashMap<NodeId, Node>,
    /// Node insertion order; `nodes` keys and this list always agree
    node_order: Vec<NodeId>,
    edges: Vec<Edge>,
    /// Graph metadata
    pub metadata: GraphMetadata,
}

impl Graph {
    /// Create a new empty graph for the given workspace
    pub fn new(workspace_path: impl Into<String>) -> Self {
        Self {
            id: GraphId::new(),
            workspace_path: workspace_path.into(),
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            metadata: GraphMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.node_order.push(id.clone());
        self.nodes.insert(id.clone(), node);
        self.touch();
        id
    }

    /// Remove a node and every edge incident on it (as source or target).
    ///
    /// Returns the removed node and the number of cascaded edges, or None
    /// if the node is unknown.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<(Node, usize)> {
        let node = self.nodes.remove(id)?;
        self.node_order.retain(|n| n != id);
        let before = self.edges.len();
        self.edges.retain(|e| !e.is_incident_on(id));
        let cascaded = before - self.edges.len();
        self.touch();
        Some((node, cascaded))
    }

    /// Insert an edge, enforcing the structural invariants.
    ///
    /// Fails NotFound if either endpoint is unknown, Validation on a
    /// self-edge or a second edge for an already-connected ordered pair.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), LatticeError> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(LatticeError::NodeNotFound(edge.source.clone()));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(LatticeError::NodeNotFound(edge.target.clone()));
        }
        if edge.source == edge.target {
            return Err(LatticeError::Validation(format!(
                "Self-edge rejected: {} cannot link to itself",
                edge.source
            )));
        }
        if self.edges.iter().any(|e| e.connects(&edge.source, &edge.target)) {
            return Err(LatticeError::Validation(format!(
                "Duplicate edge: {} -> {} already exists",
                edge.source, edge.target
            )));
        }
        self.edges.push(edge);
        self.touch();
        Ok(())
    }

    /// Remove the edge for the given ordered pair.
    pub fn remove_edge(&mut self, source: &NodeId, target: &NodeId) -> Result<Edge, LatticeError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.connects(source, target))
            .ok_or_else(|| LatticeError::EdgeNotFound(source.clone(), target.clone()))?;
        let edge = self.edges.remove(idx);
        self.touch();
        Ok(edge)
    }

    /// Partition the queried node's incident edges by direction.
    pub fn neighbors(&self, id: &NodeId) -> Result<Neighbors, LatticeError> {
        if !self.nodes.contains_key(id) {
            return Err(LatticeError::NodeNotFound(id.clone()));
        }
        let mut incoming = Vec::new();
        let mut outgoing = Vec::new();
        for edge in &self.edges {
            if &edge.target == id {
                if let Some(node) = self.nodes.get(&edge.source) {
                    incoming.push(node.clone());
                }
            } else if &edge.source == id {
                if let Some(node) = self.nodes.get(&edge.target) {
                    outgoing.push(node.clone());
                }
            }
        }
        Ok(Neighbors { incoming, outgoing })
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check whether a node exists
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All node IDs, in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.node_order.iter()
    }

    /// All edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges whose source is the given node
    pub fn outgoing_edges<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| &e.source == id)
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Update the last modified timestamp
    fn touch(&mut self) {
        self.metadata.updated_at = Some(Utc::now());
    }
}
