//! Edge representation: a directed, kind-tagged relationship between nodes

use super::node::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed edge between two nodes in the same graph.
///
/// Edges have no identity beyond their ordered `(source, target)` pair:
/// the graph stores at most one edge per pair, irrespective of relationship
/// kind. The relationship is an open string tag ("depends_on",
/// "provides_to", "shares_interface", ...); new kinds are tolerated
/// without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Type of relationship
    pub relationship: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the edge was created
    pub created_at: DateTime<Utc>,
}

impl Edge {
    /// Create a new edge
    pub fn new(source: NodeId, target: NodeId, relationship: impl Into<String>) -> Self {
        Self {
            source,
            target,
            relationship: relationship.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True if this edge connects the given ordered pair
    pub fn connects(&self, source: &NodeId, target: &NodeId) -> bool {
        &self.source == source && &self.target == target
    }

    /// True if this edge touches the given node as source or target
    pub fn is_incident_on(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }
}
