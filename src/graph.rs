use indexmap::IndexMap;

use crate::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, Error, Result};

/// Splits a composite port key `"<nodeId>:<portIndex>"` at the first `:`.
///
/// The port index is returned for completeness but nothing downstream
/// consumes it, so it is not validated numerically.
pub fn split_port_key(key: &str) -> Result<(&str, &str)> {
    key.split_once(':').ok_or_else(|| Error::MalformedKey {
        key: key.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub center_x: f64,
    pub center_y: f64,
    pub width: i64,
    pub height: i64,
    pub user_data: String,
}

impl GraphNode {
    /// A node at the origin with the default footprint and `user_data`
    /// mirroring the id, the state every node starts in before layout.
    pub fn with_defaults(id: impl Into<String>) -> Self {
        let id = id.into();
        GraphNode {
            user_data: id.clone(),
            id,
            center_x: 0.0,
            center_y: 0.0,
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

/// Directed edge by node id; direction encodes data flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub destination: String,
}

/// The in-memory experiment graph.
///
/// Nodes are unique by id and keep insertion order so that rendering the
/// position block back out is deterministic. Edges keep insertion order and
/// are never de-duplicated here; parallel edges are legal.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Inserts a node, keeping the existing one on id collision. Returns
    /// whether the node was actually inserted.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub fn add_edge(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.edges.push(GraphEdge {
            source: source.into(),
            destination: destination.into(),
        });
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.get_mut(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
