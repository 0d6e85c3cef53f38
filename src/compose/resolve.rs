//! Interface resolution: match declared provides against declared requires

use super::types::InterfaceContract;
use crate::graph::Node;

/// Contracts between one provider node and one consumer node.
///
/// Every `provides` entry of `provider` is checked against every `requires`
/// entry of `consumer`; a contract is emitted per (name, type) match, in
/// declaration order.
pub fn match_interfaces(provider: &Node, consumer: &Node) -> Vec<InterfaceContract> {
    let mut contracts = Vec::new();
    for provided in provider.provides() {
        for required in consumer.requires() {
            if provided.matches(required) {
                contracts.push(InterfaceContract {
                    provider_node_id: provider.id.clone(),
                    consumer_node_id: consumer.id.clone(),
                    interface_name: provided.name.clone(),
                    type_name: provided.type_name.clone(),
                });
            }
        }
    }
    contracts
}

/// Resolve interface contracts across a set of nodes.
///
/// For every ordered pair of distinct nodes (P, C), P's provides are matched
/// against C's requires. Pure and side-effect-free; the output order is
/// fixed by the input order (P outer, C inner, then declaration order), so
/// a given node set always resolves the same way.
pub fn resolve(nodes: &[&Node]) -> Vec<InterfaceContract> {
    let mut contracts = Vec::new();
    for provider in nodes {
        for consumer in nodes {
            if provider.id == consumer.id {
                continue;
            }
            contracts.extend(match_interfaces(provider, consumer));
        }
    }
    contracts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompositionSpec, InterfacePoint, SpecDocument};

    fn provider_node(label: &str, provides: Vec<InterfacePoint>) -> Node {
        Node::new(
            label,
            SpecDocument::new("produce data").with_composition(CompositionSpec {
                provides,
                requires: Vec::new(),
            }),
        )
    }

    fn consumer_node(label: &str, requires: Vec<InterfacePoint>) -> Node {
        Node::new(
            label,
            SpecDocument::new("consume data").with_composition(CompositionSpec {
                provides: Vec::new(),
                requires,
            }),
        )
    }

    #[test]
    fn matching_name_and_type_yields_one_contract() {
        let a = provider_node("Sensor", vec![InterfacePoint::new("temp", "number")]);
        let b = consumer_node("Display", vec![InterfacePoint::new("temp", "number")]);

        let contracts = resolve(&[&a, &b]);
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].provider_node_id, a.id);
        assert_eq!(contracts[0].consumer_node_id, b.id);
        assert_eq!(contracts[0].interface_name, "temp");
        assert_eq!(contracts[0].type_name, "number");
    }

    #[test]
    fn name_mismatch_yields_nothing() {
        let a = provider_node("Sensor", vec![InterfacePoint::new("temp", "number")]);
        let b = consumer_node("Display", vec![InterfacePoint::new("humidity", "number")]);
        assert!(resolve(&[&a, &b]).is_empty());
    }

    #[test]
    fn type_mismatch_yields_nothing() {
        let a = provider_node("Sensor", vec![InterfacePoint::new("temp", "number")]);
        let b = consumer_node("Display", vec![InterfacePoint::new("temp", "string")]);
        assert!(resolve(&[&a, &b]).is_empty());
    }

    #[test]
    fn no_self_contracts() {
        let node = Node::new(
            "Loop",
            SpecDocument::new("feeds itself").with_composition(CompositionSpec {
                provides: vec![InterfacePoint::new("x", "number")],
                requires: vec![InterfacePoint::new("x", "number")],
            }),
        );
        assert!(resolve(&[&node]).is_empty());
    }

    #[test]
    fn both_directions_are_checked() {
        let a = Node::new(
            "A",
            SpecDocument::new("a").with_composition(CompositionSpec {
                provides: vec![InterfacePoint::new("temp", "number")],
                requires: vec![InterfacePoint::new("alerts", "event")],
            }),
        );
        let b = Node::new(
            "B",
            SpecDocument::new("b").with_composition(CompositionSpec {
                provides: vec![InterfacePoint::new("alerts", "event")],
                requires: vec![InterfacePoint::new("temp", "number")],
            }),
        );

        let contracts = resolve(&[&a, &b]);
        assert_eq!(contracts.len(), 2);
        // Output order is fixed: A-as-provider first, then B-as-provider
        assert_eq!(contracts[0].provider_node_id, a.id);
        assert_eq!(contracts[0].interface_name, "temp");
        assert_eq!(contracts[1].provider_node_id, b.id);
        assert_eq!(contracts[1].interface_name, "alerts");
    }

    #[test]
    fn nodes_without_descriptors_resolve_to_nothing() {
        let a = Node::new("Plain", SpecDocument::new("nothing declared"));
        let b = Node::new("AlsoPlain", SpecDocument::new("nothing declared"));
        assert!(resolve(&[&a, &b]).is_empty());
    }

    #[test]
    fn multiple_matches_preserve_declaration_order() {
        let a = provider_node(
            "Sensor",
            vec![
                InterfacePoint::new("temp", "number"),
                InterfacePoint::new("humidity", "number"),
            ],
        );
        let b = consumer_node(
            "Display",
            vec![
                InterfacePoint::new("humidity", "number"),
                InterfacePoint::new("temp", "number"),
            ],
        );

        let contracts = resolve(&[&a, &b]);
        assert_eq!(contracts.len(), 2);
        // Provider declaration order wins
        assert_eq!(contracts[0].interface_name, "temp");
        assert_eq!(contracts[1].interface_name, "humidity");
    }
}
