//! Lattice CLI: build a spec composition graph from a manifest and query it.
//!
//! Usage:
//!   lattice <manifest> show
//!   lattice <manifest> resolve --select key1,key2
//!   lattice <manifest> impact <key>
//!   lattice <manifest> compose --select key1,key2 [--session ID]

use clap::{Parser, Subcommand};
use lattice::manifest::{BuiltGraph, GraphManifest};
use lattice::{ChannelSink, LatticeApi, LatticeEngine};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "lattice",
    version,
    about = "Spec composition graph engine"
)]
struct Cli {
    /// Path to the graph manifest (YAML or JSON)
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the graph: nodes, edges, neighborhoods
    Show,
    /// Resolve interface contracts across a node selection
    Resolve {
        /// Comma-separated node keys
        #[arg(long, value_delimiter = ',', required = true)]
        select: Vec<String>,
    },
    /// Grade the blast radius of a change to one node
    Impact {
        /// Node key to analyze
        key: String,
    },
    /// Compose a node selection into one merged spec
    Compose {
        /// Comma-separated node keys, in composition order
        #[arg(long, value_delimiter = ',', required = true)]
        select: Vec<String>,
        /// Session to announce progress events for (printed as JSON lines)
        #[arg(long)]
        session: Option<String>,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_show(api: &LatticeApi, built: &BuiltGraph) -> i32 {
    let graph = match api.graph_get(&built.graph_id) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    println!(
        "Graph {} ({} nodes, {} edges) for workspace {}",
        graph.id,
        graph.node_count(),
        graph.edge_count(),
        graph.workspace_path
    );
    for node in graph.nodes() {
        let neighbors = match graph.neighbors(&node.id) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        };
        println!(
            "  {:<24} in:{:<3} out:{:<3} {}",
            node.label,
            neighbors.incoming.len(),
            neighbors.outgoing.len(),
            node.spec.goal
        );
    }
    0
}

fn cmd_resolve(api: &LatticeApi, built: &BuiltGraph, select: &[String]) -> i32 {
    let ids = match built.node_ids(select) {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match api.resolve_interfaces(&built.graph_id, &ids) {
        Ok(contracts) => print_json(&contracts),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_impact(api: &LatticeApi, built: &BuiltGraph, key: &str) -> i32 {
    let id = match built.node_id(key) {
        Some(id) => id.clone(),
        None => {
            eprintln!("Error: unknown node key '{}'", key);
            return 1;
        }
    };
    match api.analyze_impact(&built.graph_id, &id) {
        Ok(impact) => print_json(&impact),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_compose(
    engine: Arc<LatticeEngine>,
    built: &BuiltGraph,
    select: &[String],
    session: Option<String>,
) -> i32 {
    let ids = match built.node_ids(select) {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match session {
        Some(session) => {
            let (sink, mut rx) = ChannelSink::channel(64);
            let api = LatticeApi::new(engine, Arc::new(sink));
            let printer = tokio::spawn(async move {
                while let Some((session_id, event)) = rx.recv().await {
                    match serde_json::to_string(&event) {
                        Ok(line) => println!("[{}] {}", session_id, line),
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
            });

            let result = api.compose(&built.graph_id, &ids, Some(&session)).await;
            // Closing the sink ends the printer once the queue drains
            drop(api);
            let _ = printer.await;

            match result {
                Ok(result) => print_json(&result),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        None => {
            let api = LatticeApi::detached(engine);
            match api.compose(&built.graph_id, &ids, None).await {
                Ok(result) => print_json(&result),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let manifest = match GraphManifest::from_path(&cli.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let engine = Arc::new(LatticeEngine::new());
    let built = match manifest.build(&engine) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Show => cmd_show(&LatticeApi::detached(engine.clone()), &built),
        Commands::Resolve { select } => {
            cmd_resolve(&LatticeApi::detached(engine.clone()), &built, &select)
        }
        Commands::Impact { key } => {
            cmd_impact(&LatticeApi::detached(engine.clone()), &built, &key)
        }
        Commands::Compose { select, session } => {
            cmd_compose(engine, &built, &select, session).await
        }
    };
    std::process::exit(code);
}
