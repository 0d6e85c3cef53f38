//! Derived result types for composition, interface resolution, and impact
//! analysis. Produced per request, never stored.

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// A resolved match between one node's provided interface and another
/// node's required interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceContract {
    pub provider_node_id: NodeId,
    pub consumer_node_id: NodeId,
    pub interface_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// The merged specification produced by a compose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedSpec {
    /// Combined goal text, referencing each component in selection order
    pub goal: String,
    /// Labels of the composed nodes, in selection order
    pub components: Vec<String>,
}

/// The full result of a compose request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeResult {
    pub composed_spec: ComposedSpec,
    pub emergent_behaviors: Vec<String>,
    pub interface_contracts: Vec<InterfaceContract>,
    pub warnings: Vec<String>,
}

/// How severely a change to one node ripples through the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No node is affected by either mechanism
    None,
    /// Affected nodes found only via interface matching
    Moderate,
    /// At least one affected node found via an explicit edge
    Breaking,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Moderate => write!(f, "moderate"),
            Self::Breaking => write!(f, "breaking"),
        }
    }
}

/// One node affected by a hypothetical change, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactedNode {
    pub node_id: NodeId,
    pub label: String,
    /// Which mechanism matched: the explicit edge or the interface overlap
    pub reason: String,
}

/// The blast radius of a change to a single node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactResult {
    pub affected_nodes: Vec<ImpactedNode>,
    pub severity: Severity,
}
