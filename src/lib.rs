//! Lattice: Spec Composition Graph Engine
//!
//! A directed-graph store of specification fragments plus the three
//! algorithms layered on top of it: composition (merging a node selection
//! into one spec), interface resolution (matching declared outputs to
//! declared inputs), and impact analysis (finding and grading the blast
//! radius of a change).
//!
//! # Core Concepts
//!
//! - **Graphs**: workspace-scoped containers that exclusively own their
//!   nodes and edges
//! - **Nodes**: specification fragments with a goal and optional declared
//!   provides/requires interfaces
//! - **Edges**: directed, kind-tagged relationships, unique per ordered pair
//! - **Events**: compose progress announced through an injected async sink
//!
//! # Example
//!
//! ```
//! use lattice::{LatticeApi, LatticeEngine, SpecDocument};
//! use std::sync::Arc;
//!
//! let api = LatticeApi::detached(Arc::new(LatticeEngine::new()));
//! let graph = api.graph_create("/workspaces/demo");
//! let node = api
//!     .node_add(&graph.id, "Sensor", SpecDocument::new("collect readings"))
//!     .unwrap();
//! assert!(api.graph_get(&graph.id).unwrap().get_node(&node.id).is_some());
//! ```

mod api;
pub mod compose;
mod graph;
pub mod manifest;
pub mod notify;

pub use api::LatticeApi;
pub use compose::{
    ComposeResult, ComposedSpec, Composer, ImpactResult, ImpactedNode, InterfaceContract,
    Severity,
};
pub use graph::{
    CompositionSpec, Edge, Graph, GraphId, GraphMetadata, InterfacePoint, LatticeEngine,
    LatticeError, LatticeResult, Neighbors, Node, NodeId, SpecDocument,
};
pub use notify::{ChannelSink, ComposeEvent, EventSink, NullSink, SinkError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
