//! Impact analysis: find and grade the blast radius of a change to one node

use super::resolve::match_interfaces;
use super::types::{ImpactResult, ImpactedNode, Severity};
use crate::graph::{Graph, LatticeError, LatticeResult, NodeId};
use std::collections::HashSet;

/// Compute which nodes are affected by a hypothetical change to `node_id`.
///
/// Two mechanisms, unioned and de-duplicated:
///
/// 1. explicit dependents: one hop along the changed node's outgoing edges
///    (a source edge encodes "changed node is consumed by target");
/// 2. interface dependents: every other node in the graph whose requires
///    list matches an entry in the changed node's provides list.
///
/// A node reached both ways is reported once, with the edge as its reason.
/// Severity is `breaking` when any dependent came from an explicit edge,
/// `moderate` when dependents came only from interface matching, `none`
/// otherwise. Never mutates the graph.
pub fn analyze(graph: &Graph, node_id: &NodeId) -> LatticeResult<ImpactResult> {
    let changed = graph
        .get_node(node_id)
        .ok_or_else(|| LatticeError::NodeNotFound(node_id.clone()))?;

    let mut affected: Vec<ImpactedNode> = Vec::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut via_edge = false;

    for edge in graph.outgoing_edges(node_id) {
        // Invariant: edge targets always resolve
        if let Some(dependent) = graph.get_node(&edge.target) {
            if seen.insert(dependent.id.clone()) {
                via_edge = true;
                affected.push(ImpactedNode {
                    node_id: dependent.id.clone(),
                    label: dependent.label.clone(),
                    reason: format!(
                        "direct {} edge from {}",
                        edge.relationship, changed.label
                    ),
                });
            }
        }
    }

    for other in graph.nodes() {
        if other.id == *node_id {
            continue;
        }
        let contracts = match_interfaces(changed, other);
        if let Some(contract) = contracts.first() {
            if seen.insert(other.id.clone()) {
                affected.push(ImpactedNode {
                    node_id: other.id.clone(),
                    label: other.label.clone(),
                    reason: format!(
                        "requires interface '{}' ({}) provided by {}",
                        contract.interface_name, contract.type_name, changed.label
                    ),
                });
            }
        }
    }

    let severity = if via_edge {
        Severity::Breaking
    } else if !affected.is_empty() {
        Severity::Moderate
    } else {
        Severity::None
    };

    Ok(ImpactResult {
        affected_nodes: affected,
        severity,
    })
}
