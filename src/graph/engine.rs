//! LatticeEngine: the store that owns every graph

use super::edge::Edge;
use super::graph::{Graph, GraphId, Neighbors};
use super::node::{Node, NodeId, SpecDocument};
use dashmap::DashMap;
use thiserror::Error;

/// Errors that can occur in lattice operations.
///
/// Two kinds only: something referenced by id does not exist, or the
/// request is structurally illegal. Neither is ever retried internally.
#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("Graph not found: {0}")]
    GraphNotFound(GraphId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {0} -> {1}")]
    EdgeNotFound(NodeId, NodeId),

    #[error("{0}")]
    Validation(String),
}

impl LatticeError {
    /// True for the not-found family (transport maps these to 404).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GraphNotFound(_) | Self::NodeNotFound(_) | Self::EdgeNotFound(_, _)
        )
    }
}

/// Result type for lattice operations
pub type LatticeResult<T> = Result<T, LatticeError>;

/// The main lattice engine.
///
/// Owns all graphs and provides the CRUD + neighbor-query surface. Each
/// graph's mutations run inside its DashMap shard lock, so structural
/// changes to one graph are serialized while unrelated graphs stay
/// uncontended. Reads that need a consistent view clone a snapshot.
#[derive(Debug, Default)]
pub struct LatticeEngine {
    /// All graphs managed by this engine
    graphs: DashMap<GraphId, Graph>,
}

impl LatticeEngine {
    /// Create a new LatticeEngine
    pub fn new() -> Self {
        Self {
            graphs: DashMap::new(),
        }
    }

    /// Create a new empty graph for a workspace. Always succeeds.
    pub fn create_graph(&self, workspace_path: impl Into<String>) -> Graph {
        let graph = Graph::new(workspace_path);
        let snapshot = graph.clone();
        self.graphs.insert(graph.id.clone(), graph);
        snapshot
    }

    /// Get a consistent snapshot of a graph by ID
    pub fn get_graph(&self, id: &GraphId) -> LatticeResult<Graph> {
        self.graphs
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| LatticeError::GraphNotFound(id.clone()))
    }

    /// Delete a graph, discarding all contained nodes and edges
    pub fn delete_graph(&self, id: &GraphId) -> LatticeResult<Graph> {
        self.graphs
            .remove(id)
            .map(|(_, graph)| graph)
            .ok_or_else(|| LatticeError::GraphNotFound(id.clone()))
    }

    /// List all graph IDs
    pub fn list_graphs(&self) -> Vec<GraphId> {
        self.graphs.iter().map(|r| r.key().clone()).collect()
    }

    /// Get the number of graphs
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Check if a graph exists
    pub fn has_graph(&self, id: &GraphId) -> bool {
        self.graphs.contains_key(id)
    }

    /// Run a closure against a graph under its shard lock.
    ///
    /// All structural mutations route through here, which is what makes
    /// them serialized per graph.
    pub fn with_graph_mut<F, R>(&self, id: &GraphId, f: F) -> LatticeResult<R>
    where
        F: FnOnce(&mut Graph) -> R,
    {
        let mut graph = self
            .graphs
            .get_mut(id)
            .ok_or_else(|| LatticeError::GraphNotFound(id.clone()))?;
        Ok(f(&mut graph))
    }

    /// Add a node to a graph, returning the created node.
    ///
    /// Input validity (label/spec present) is the caller's concern.
    pub fn add_node(
        &self,
        graph_id: &GraphId,
        label: impl Into<String>,
        spec: SpecDocument,
    ) -> LatticeResult<Node> {
        let node = Node::new(label, spec);
        let snapshot = node.clone();
        self.with_graph_mut(graph_id, |graph| graph.add_node(node))?;
        Ok(snapshot)
    }

    /// Remove a node and, atomically with it, every incident edge.
    pub fn remove_node(&self, graph_id: &GraphId, node_id: &NodeId) -> LatticeResult<Node> {
        self.with_graph_mut(graph_id, |graph| graph.remove_node(node_id))?
            .map(|(node, _cascaded)| node)
            .ok_or_else(|| LatticeError::NodeNotFound(node_id.clone()))
    }

    /// Add an edge between two nodes of a graph.
    pub fn add_edge(
        &self,
        graph_id: &GraphId,
        from_id: &NodeId,
        to_id: &NodeId,
        relationship: impl Into<String>,
        description: Option<String>,
    ) -> LatticeResult<Edge> {
        let mut edge = Edge::new(from_id.clone(), to_id.clone(), relationship);
        edge.description = description;
        let snapshot = edge.clone();
        self.with_graph_mut(graph_id, |graph| graph.add_edge(edge))??;
        Ok(snapshot)
    }

    /// Remove the edge for an ordered pair.
    pub fn remove_edge(
        &self,
        graph_id: &GraphId,
        from_id: &NodeId,
        to_id: &NodeId,
    ) -> LatticeResult<Edge> {
        self.with_graph_mut(graph_id, |graph| graph.remove_edge(from_id, to_id))?
    }

    /// Get a node's neighborhood, partitioned by edge direction.
    pub fn neighbors(&self, graph_id: &GraphId, node_id: &NodeId) -> LatticeResult<Neighbors> {
        self.get_graph(graph_id)?.neighbors(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_engine() {
        let engine = LatticeEngine::new();
        assert_eq!(engine.graph_count(), 0);
    }

    #[test]
    fn test_create_graph() {
        let engine = LatticeEngine::new();
        let graph = engine.create_graph("/workspaces/demo");

        assert_eq!(engine.graph_count(), 1);
        assert!(engine.has_graph(&graph.id));
        assert_eq!(graph.workspace_path, "/workspaces/demo");
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_get_graph_returns_snapshot() {
        let engine = LatticeEngine::new();
        let graph = engine.create_graph("/workspaces/demo");

        let snapshot = engine.get_graph(&graph.id).unwrap();
        assert_eq!(snapshot.id, graph.id);

        // Mutating after the snapshot doesn't change it
        engine
            .add_node(&graph.id, "Sensor", SpecDocument::new("sense things"))
            .unwrap();
        assert_eq!(snapshot.node_count(), 0);
        assert_eq!(engine.get_graph(&graph.id).unwrap().node_count(), 1);
    }

    #[test]
    fn test_get_unknown_graph_fails_not_found() {
        let engine = LatticeEngine::new();
        let err = engine.get_graph(&GraphId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_delete_graph_discards_contents() {
        let engine = LatticeEngine::new();
        let graph = engine.create_graph("/workspaces/demo");
        engine
            .add_node(&graph.id, "Sensor", SpecDocument::new("sense"))
            .unwrap();

        let removed = engine.delete_graph(&graph.id).unwrap();
        assert_eq!(removed.node_count(), 1);
        assert_eq!(engine.graph_count(), 0);
        assert!(engine.get_graph(&graph.id).is_err());
    }

    #[test]
    fn test_add_node_to_unknown_graph_fails() {
        let engine = LatticeEngine::new();
        let result = engine.add_node(&GraphId::new(), "Sensor", SpecDocument::new("sense"));
        assert!(matches!(result, Err(LatticeError::GraphNotFound(_))));
    }

    #[test]
    fn test_remove_unknown_node_fails() {
        let engine = LatticeEngine::new();
        let graph = engine.create_graph("/workspaces/demo");
        let result = engine.remove_node(&graph.id, &NodeId::new());
        assert!(matches!(result, Err(LatticeError::NodeNotFound(_))));
    }

    #[test]
    fn test_add_edge_and_remove_edge() {
        let engine = LatticeEngine::new();
        let graph = engine.create_graph("/workspaces/demo");
        let a = engine.add_node(&graph.id, "A", SpecDocument::new("a")).unwrap();
        let b = engine.add_node(&graph.id, "B", SpecDocument::new("b")).unwrap();

        let edge = engine
            .add_edge(&graph.id, &a.id, &b.id, "depends_on", None)
            .unwrap();
        assert_eq!(edge.relationship, "depends_on");
        assert_eq!(engine.get_graph(&graph.id).unwrap().edge_count(), 1);

        engine.remove_edge(&graph.id, &a.id, &b.id).unwrap();
        assert_eq!(engine.get_graph(&graph.id).unwrap().edge_count(), 0);

        let err = engine.remove_edge(&graph.id, &a.id, &b.id).unwrap_err();
        assert!(matches!(err, LatticeError::EdgeNotFound(_, _)));
    }

    #[test]
    fn test_add_edge_unknown_endpoint_fails_not_found() {
        let engine = LatticeEngine::new();
        let graph = engine.create_graph("/workspaces/demo");
        let a = engine.add_node(&graph.id, "A", SpecDocument::new("a")).unwrap();

        let result = engine.add_edge(&graph.id, &a.id, &NodeId::new(), "depends_on", None);
        assert!(matches!(result, Err(LatticeError::NodeNotFound(_))));
    }

    #[test]
    fn test_graphs_are_independent() {
        let engine = LatticeEngine::new();
        let g1 = engine.create_graph("/one");
        let g2 = engine.create_graph("/two");

        let a = engine.add_node(&g1.id, "A", SpecDocument::new("a")).unwrap();

        // A node of g1 is invisible to g2
        assert!(engine.get_graph(&g2.id).unwrap().get_node(&a.id).is_none());
        let result = engine.remove_node(&g2.id, &a.id);
        assert!(matches!(result, Err(LatticeError::NodeNotFound(_))));
    }
}
