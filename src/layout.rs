use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::Graph;
use crate::{Error, Result};

const LAYOUT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the external auto-layout service.
///
/// One POST per call, no retries here; anything beyond a single round trip
/// belongs to the transport layer. On failure nothing is applied to the
/// graph.
#[derive(Debug, Clone)]
pub struct LayoutClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireGraph {
    id: String,
    nodes: Vec<WireNode>,
    edges: Vec<WireEdge>,
    user_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireNode {
    id: String,
    center_x: f64,
    center_y: f64,
    width: i64,
    height: i64,
    user_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireEdge {
    source_node: String,
    destination_node: String,
}

impl LayoutClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(LAYOUT_TIMEOUT).build()?;
        Ok(LayoutClient {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Submits the graph for layout and applies the returned coordinates in
    /// place. Topology is never modified, only node positions and sizes.
    pub async fn layout(&self, graph: &mut Graph) -> Result<()> {
        let request = WireGraph::from_graph(graph);
        debug!(nodes = request.nodes.len(), endpoint = %self.endpoint, "requesting layout");

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LayoutService { status, body });
        }

        let laid_out: WireGraph = response.json().await?;
        apply_wire_positions(graph, &laid_out);
        Ok(())
    }
}

impl WireGraph {
    fn from_graph(graph: &Graph) -> Self {
        WireGraph {
            id: String::new(),
            nodes: graph
                .nodes()
                .map(|node| WireNode {
                    id: node.id.clone(),
                    center_x: node.center_x,
                    center_y: node.center_y,
                    width: node.width,
                    height: node.height,
                    user_data: node.user_data.clone(),
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|edge| WireEdge {
                    source_node: edge.source.clone(),
                    destination_node: edge.destination.clone(),
                })
                .collect(),
            user_data: String::new(),
        }
    }
}

fn apply_wire_positions(graph: &mut Graph, laid_out: &WireGraph) {
    for wire_node in &laid_out.nodes {
        match graph.node_mut(&wire_node.id) {
            Some(node) => {
                node.center_x = wire_node.center_x;
                node.center_y = wire_node.center_y;
                node.width = wire_node.width;
                node.height = wire_node.height;
            }
            None => {
                warn!(node_id = %wire_node.id, "layout response references unknown node, skipping");
            }
        }
    }
}
