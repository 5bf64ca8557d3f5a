//! Algotrace Visualization Server binary
//!
//! Serves a breadth-first search demo until a client asks for another trace.

use algotrace_core::{Graph, NodeId, Snapshot};
use algotrace_generators::bfs;
use algotrace_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Two squares joined by a bridge, with one diagonal.
fn demo_graph() -> Result<Graph, algotrace_core::TraceError> {
    let mut graph = Graph::with_nodes(false, 8);
    for (from, to) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (2, 4), (4, 5), (5, 6), (6, 7), (7, 4)] {
        graph.add_edge(NodeId(from), NodeId(to), 1)?;
    }
    Ok(graph)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algotrace_vis=info,algotrace_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;

    let trace = bfs(&demo_graph()?, NodeId(0))?.map(Snapshot::from);

    println!("Algotrace Visualizer");
    println!("====================");
    println!();
    println!("Demo: breadth-first search, {} steps", trace.len());
    println!("Listening on http://{}", config.addr);
    println!();

    let mut server = VisServer::new(trace, "bfs", config.tick);
    if let Some(dir) = &config.static_dir {
        server = server.with_static_dir(dir);
    }
    server.serve(config.addr).await?;

    Ok(())
}
