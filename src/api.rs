//! Transport-independent API layer.
//!
//! `LatticeApi` is the single entry point for all consumer-facing
//! operations. Transports (HTTP routers, session handlers, direct
//! embedding) call these methods; they never reach into `LatticeEngine`
//! or the compose algorithms directly. Each method returns either its
//! success payload or a `LatticeError`.

use std::sync::Arc;

use crate::compose::{self, ComposeResult, Composer, ImpactResult, InterfaceContract};
use crate::graph::{
    Edge, Graph, GraphId, LatticeEngine, LatticeError, LatticeResult, Neighbors, Node, NodeId,
    SpecDocument,
};
use crate::notify::EventSink;

/// Single entry point for all consumer-facing operations.
#[derive(Clone)]
pub struct LatticeApi {
    engine: Arc<LatticeEngine>,
    composer: Arc<Composer>,
}

impl LatticeApi {
    /// Create an API instance with an injected event sink.
    pub fn new(engine: Arc<LatticeEngine>, sink: Arc<dyn EventSink>) -> Self {
        let composer = Arc::new(Composer::new(engine.clone(), sink));
        Self { engine, composer }
    }

    /// Create an API instance that announces nothing.
    pub fn detached(engine: Arc<LatticeEngine>) -> Self {
        let composer = Arc::new(Composer::detached(engine.clone()));
        Self { engine, composer }
    }

    // --- Graph management ---

    /// Create a graph for a workspace. Always succeeds.
    pub fn graph_create(&self, workspace_path: &str) -> Graph {
        self.engine.create_graph(workspace_path)
    }

    /// Get a consistent snapshot of a graph.
    pub fn graph_get(&self, id: &GraphId) -> LatticeResult<Graph> {
        self.engine.get_graph(id)
    }

    /// Delete a graph, discarding its nodes and edges.
    pub fn graph_delete(&self, id: &GraphId) -> LatticeResult<()> {
        self.engine.delete_graph(id)?;
        Ok(())
    }

    /// List all graph IDs.
    pub fn graph_list(&self) -> Vec<GraphId> {
        self.engine.list_graphs()
    }

    // --- Nodes and edges ---

    /// Add a node, returning it with its generated id.
    pub fn node_add(
        &self,
        graph_id: &GraphId,
        label: &str,
        spec: SpecDocument,
    ) -> LatticeResult<Node> {
        self.engine.add_node(graph_id, label, spec)
    }

    /// Remove a node and every incident edge.
    pub fn node_remove(&self, graph_id: &GraphId, node_id: &NodeId) -> LatticeResult<()> {
        self.engine.remove_node(graph_id, node_id)?;
        Ok(())
    }

    /// Add a directed edge between two existing nodes.
    pub fn edge_add(
        &self,
        graph_id: &GraphId,
        from_id: &NodeId,
        to_id: &NodeId,
        relationship: &str,
        description: Option<String>,
    ) -> LatticeResult<Edge> {
        self.engine
            .add_edge(graph_id, from_id, to_id, relationship, description)
    }

    /// Remove the edge for an ordered pair.
    pub fn edge_remove(
        &self,
        graph_id: &GraphId,
        from_id: &NodeId,
        to_id: &NodeId,
    ) -> LatticeResult<()> {
        self.engine.remove_edge(graph_id, from_id, to_id)?;
        Ok(())
    }

    /// Get a node's neighborhood, partitioned by edge direction.
    pub fn neighbors(&self, graph_id: &GraphId, node_id: &NodeId) -> LatticeResult<Neighbors> {
        self.engine.neighbors(graph_id, node_id)
    }

    // --- Derived queries ---

    /// Resolve interface contracts across a node selection.
    pub fn resolve_interfaces(
        &self,
        graph_id: &GraphId,
        node_ids: &[NodeId],
    ) -> LatticeResult<Vec<InterfaceContract>> {
        let graph = self.engine.get_graph(graph_id)?;
        let mut nodes = Vec::with_capacity(node_ids.len());
        for id in node_ids {
            let node = graph
                .get_node(id)
                .ok_or_else(|| LatticeError::NodeNotFound(id.clone()))?;
            nodes.push(node);
        }
        Ok(compose::resolve(&nodes))
    }

    /// Grade the blast radius of a hypothetical change to one node.
    pub fn analyze_impact(
        &self,
        graph_id: &GraphId,
        node_id: &NodeId,
    ) -> LatticeResult<ImpactResult> {
        let graph = self.engine.get_graph(graph_id)?;
        compose::analyze(&graph, node_id)
    }

    /// Compose a node selection into one merged spec.
    pub async fn compose(
        &self,
        graph_id: &GraphId,
        node_ids: &[NodeId],
        session_id: Option<&str>,
    ) -> LatticeResult<ComposeResult> {
        self.composer.compose(graph_id, node_ids, session_id).await
    }
}
