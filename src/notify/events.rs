//! Events announced over the outbound sink during a compose

use crate::compose::{ImpactedNode, Severity};
use crate::graph::{GraphId, NodeId};
use serde::{Deserialize, Serialize};

/// A composition progress event.
///
/// Exactly two variants leave this core: the announcement that a compose
/// began, and one impact report per composed node. The `type` tag and field
/// names are the wire contract consumed by transport/session code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComposeEvent {
    /// A compose passed validation and is underway
    CompositionStarted {
        graph_id: GraphId,
        /// The composed nodes, in caller-supplied order
        node_ids: Vec<NodeId>,
    },
    /// Impact analysis finished for one composed node
    CompositionImpact {
        graph_id: GraphId,
        changed_node_id: NodeId,
        affected_nodes: Vec<ImpactedNode>,
        severity: Severity,
    },
}

impl ComposeEvent {
    /// The wire name of this event's variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CompositionStarted { .. } => "composition_started",
            Self::CompositionImpact { .. } => "composition_impact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_event_wire_shape() {
        let event = ComposeEvent::CompositionStarted {
            graph_id: GraphId::from_string("g1"),
            node_ids: vec![NodeId::from_string("a"), NodeId::from_string("b")],
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "composition_started");
        assert_eq!(value["graph_id"], "g1");
        assert_eq!(value["node_ids"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn impact_event_wire_shape() {
        let event = ComposeEvent::CompositionImpact {
            graph_id: GraphId::from_string("g1"),
            changed_node_id: NodeId::from_string("a"),
            affected_nodes: vec![],
            severity: Severity::Breaking,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "composition_impact");
        assert_eq!(value["changed_node_id"], "a");
        assert_eq!(value["severity"], "breaking");
    }

    #[test]
    fn event_roundtrip() {
        let event = ComposeEvent::CompositionStarted {
            graph_id: GraphId::from_string("g1"),
            node_ids: vec![NodeId::from_string("a")],
        };
        let text = serde_json::to_string(&event).unwrap();
        let back: ComposeEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.kind(), "composition_started");
    }
}
