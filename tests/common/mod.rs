//! Common test utilities: shared scenario graphs for composition tests

use lattice::{
    CompositionSpec, GraphId, InterfacePoint, LatticeEngine, NodeId, SpecDocument,
};

/// A spec document that provides one named, typed interface.
pub fn providing(goal: &str, name: &str, ty: &str) -> SpecDocument {
    SpecDocument::new(goal).with_composition(CompositionSpec {
        provides: vec![InterfacePoint::new(name, ty)],
        requires: Vec::new(),
    })
}

/// A spec document that requires one named, typed interface.
pub fn requiring(goal: &str, name: &str, ty: &str) -> SpecDocument {
    SpecDocument::new(goal).with_composition(CompositionSpec {
        provides: Vec::new(),
        requires: vec![InterfacePoint::new(name, ty)],
    })
}

/// Provider/Display pair: Provider provides `temperature: number`, Display
/// requires it. No edges.
pub fn provider_display(engine: &LatticeEngine) -> (GraphId, NodeId, NodeId) {
    let graph = engine.create_graph("/workspaces/iot");
    let provider = engine
        .add_node(
            &graph.id,
            "Provider",
            providing("publish sensor readings", "temperature", "number"),
        )
        .unwrap();
    let display = engine
        .add_node(
            &graph.id,
            "Display",
            requiring("render sensor readings", "temperature", "number"),
        )
        .unwrap();
    (graph.id, provider.id, display.id)
}

/// Weather/Dashboard/Alerts triangle with edges Weather→Dashboard,
/// Weather→Alerts, Dashboard→Alerts.
pub fn weather_triangle(engine: &LatticeEngine) -> (GraphId, NodeId, NodeId, NodeId) {
    let graph = engine.create_graph("/workspaces/iot");
    let weather = engine
        .add_node(&graph.id, "Weather", SpecDocument::new("collect readings"))
        .unwrap();
    let dashboard = engine
        .add_node(&graph.id, "Dashboard", SpecDocument::new("show readings"))
        .unwrap();
    let alerts = engine
        .add_node(&graph.id, "Alerts", SpecDocument::new("raise alarms"))
        .unwrap();
    engine
        .add_edge(&graph.id, &weather.id, &dashboard.id, "provides_to", None)
        .unwrap();
    engine
        .add_edge(&graph.id, &weather.id, &alerts.id, "provides_to", None)
        .unwrap();
    engine
        .add_edge(&graph.id, &dashboard.id, &alerts.id, "depends_on", None)
        .unwrap();
    (graph.id, weather.id, dashboard.id, alerts.id)
}
