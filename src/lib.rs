//! Graph extraction, external auto-layout, and positional round trip for
//! remote experiment documents.
//!
//! An experiment document is JSON whose `Graph` and `WebService` sections
//! each embed, as a plain string field, an XML fragment carrying node screen
//! positions. This crate parses that hybrid document into a directed graph,
//! merges explicit wiring, implicit dataset bindings, and web-service
//! boundary bindings into one edge set, asks an external HTTP service for
//! fresh coordinates, and splices them back into the original document text
//! without disturbing any other byte of it.

pub mod builder;
pub mod document;
pub mod error;
pub mod graph;
pub mod layout;
pub mod patch;
pub mod positions;
pub mod service;

pub use builder::build_graph;
pub use document::ExperimentDocument;
pub use error::{Error, Result};
pub use graph::{Graph, GraphEdge, GraphNode, split_port_key};
pub use layout::LayoutClient;
pub use patch::apply_positions;
pub use service::ExperimentsClient;

use tracing::info;

/// Footprint assigned to every node before the layout service has spoken.
pub const DEFAULT_NODE_WIDTH: i64 = 300;
pub const DEFAULT_NODE_HEIGHT: i64 = 100;

/// Runs the whole pipeline over one raw document: parse, build the graph,
/// one layout round trip, splice the new positions back in.
///
/// All or nothing: any failure surfaces before a single byte of the caller's
/// document is produced, so a failed layout is never partially applied.
pub async fn auto_layout(raw_document: &str, client: &LayoutClient) -> Result<String> {
    let doc = ExperimentDocument::parse(raw_document)?;
    let mut graph = build_graph(&doc)?;
    client.layout(&mut graph).await?;
    let patched = apply_positions(raw_document, &graph)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "experiment re-laid out"
    );
    Ok(patched)
}
