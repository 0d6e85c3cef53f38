//! Composer: orchestrates a compose request end to end
//!
//! Validate → announce → merge → cross-check interfaces → impact sweep.
//! A failed validation is terminal and side-effect-free: no events leave
//! the core, nothing is mutated. Event delivery is best-effort: a failing
//! sink is logged and the result is returned anyway.

use super::impact;
use super::resolve;
use super::types::{ComposeResult, ComposedSpec};
use crate::graph::{GraphId, LatticeEngine, LatticeError, LatticeResult, Node, NodeId};
use crate::notify::{ComposeEvent, EventSink, NullSink};
use std::collections::HashMap;
use std::sync::Arc;

/// Orchestrates compose requests against a graph snapshot.
///
/// Holds the engine read-only and an injected event sink. Every send is
/// awaited before the next one starts, which is what guarantees
/// started-before-impact and impact-in-selection-order even when the sink
/// is slow or queued.
pub struct Composer {
    engine: Arc<LatticeEngine>,
    sink: Arc<dyn EventSink>,
}

impl Composer {
    /// Create a composer with an injected event sink
    pub fn new(engine: Arc<LatticeEngine>, sink: Arc<dyn EventSink>) -> Self {
        Self { engine, sink }
    }

    /// Create a composer that announces nothing
    pub fn detached(engine: Arc<LatticeEngine>) -> Self {
        Self::new(engine, Arc::new(NullSink))
    }

    /// Merge the selected nodes into one spec.
    ///
    /// With a `session_id`, progress events are emitted in order: one
    /// `composition_started`, then one `composition_impact` per selected
    /// node. The result is returned whether or not delivery succeeded.
    pub async fn compose(
        &self,
        graph_id: &GraphId,
        node_ids: &[NodeId],
        session_id: Option<&str>,
    ) -> LatticeResult<ComposeResult> {
        let graph = self.engine.get_graph(graph_id)?;

        if node_ids.is_empty() {
            return Err(LatticeError::Validation(
                "Invalid composition: node_ids must not be empty".to_string(),
            ));
        }
        let mut nodes: Vec<&Node> = Vec::with_capacity(node_ids.len());
        for id in node_ids {
            match graph.get_node(id) {
                Some(node) => nodes.push(node),
                None => {
                    return Err(LatticeError::Validation(format!(
                        "Invalid composition: node {} is not in graph {}",
                        id, graph_id
                    )))
                }
            }
        }

        if let Some(session) = session_id {
            self.emit(
                session,
                ComposeEvent::CompositionStarted {
                    graph_id: graph_id.clone(),
                    node_ids: node_ids.to_vec(),
                },
            )
            .await;
        }

        let composed_spec = merge_specs(&nodes);

        let interface_contracts = resolve::resolve(&nodes);
        let labels: HashMap<&NodeId, &str> =
            nodes.iter().map(|n| (&n.id, n.label.as_str())).collect();

        let emergent_behaviors: Vec<String> = interface_contracts
            .iter()
            .map(|c| {
                format!(
                    "{} supplies '{}' ({}) to {}",
                    labels.get(&c.provider_node_id).copied().unwrap_or_default(),
                    c.interface_name,
                    c.type_name,
                    labels.get(&c.consumer_node_id).copied().unwrap_or_default(),
                )
            })
            .collect();

        let mut warnings = Vec::new();
        for node in &nodes {
            for required in node.requires() {
                let met = interface_contracts.iter().any(|c| {
                    c.consumer_node_id == node.id
                        && c.interface_name == required.name
                        && c.type_name == required.type_name
                });
                if !met {
                    warnings.push(format!(
                        "Unmet requirement: {} requires '{}' ({}) and no composed node provides it",
                        node.label, required.name, required.type_name
                    ));
                }
            }
        }

        for id in node_ids {
            let impact = impact::analyze(&graph, id)?;
            if let Some(session) = session_id {
                self.emit(
                    session,
                    ComposeEvent::CompositionImpact {
                        graph_id: graph_id.clone(),
                        changed_node_id: id.clone(),
                        affected_nodes: impact.affected_nodes,
                        severity: impact.severity,
                    },
                )
                .await;
            }
        }

        Ok(ComposeResult {
            composed_spec,
            emergent_behaviors,
            interface_contracts,
            warnings,
        })
    }

    /// Send one event, swallowing delivery failures.
    async fn emit(&self, session_id: &str, event: ComposeEvent) {
        if let Err(err) = self.sink.send(session_id, event).await {
            tracing::warn!(session_id, error = %err, "compose event delivery failed");
        }
    }
}

/// Combine goal texts in selection order. `[A, B]` and `[B, A]` produce
/// different text.
fn merge_specs(nodes: &[&Node]) -> ComposedSpec {
    let components: Vec<String> = nodes.iter().map(|n| n.label.clone()).collect();
    let parts: Vec<String> = nodes
        .iter()
        .map(|n| format!("{} ({})", n.spec.goal.trim(), n.label))
        .collect();
    ComposedSpec {
        goal: format!("Combine {}: {}", components.join(", "), parts.join("; ")),
        components,
    }
}
