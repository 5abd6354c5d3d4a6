use std::collections::HashSet;

use tracing::{debug, warn};

use crate::document::{ExperimentDocument, WebServiceSection};
use crate::graph::{Graph, GraphNode, split_port_key};
use crate::positions::extract_node_ids;
use crate::{Error, Result};

/// Builds the in-memory graph from a parsed experiment document.
///
/// Nodes are seeded from the position XML of both sections, then three edge
/// sources are merged: implicit dataset bindings, the explicit internal edge
/// list, and web-service boundary bindings.
pub fn build_graph(doc: &ExperimentDocument) -> Result<Graph> {
    let mut graph = Graph::new();

    seed_section_nodes(&mut graph, &doc.graph.serialized_client_data)?;
    if let Some(web_service) = &doc.web_service {
        seed_section_nodes(&mut graph, &web_service.serialized_client_data)?;
    }

    add_dataset_edges(&mut graph, doc);
    add_internal_edges(&mut graph, doc)?;
    if let Some(web_service) = &doc.web_service {
        add_boundary_edges(&mut graph, web_service)?;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "experiment graph assembled"
    );
    Ok(graph)
}

fn seed_section_nodes(graph: &mut Graph, client_data: &str) -> Result<()> {
    for id in extract_node_ids(client_data)? {
        if !graph.add_node(GraphNode::with_defaults(id.as_str())) {
            // A node id is supposed to be unique across both sections.
            warn!(node_id = %id, "duplicate node id across sections, keeping first");
        }
    }
    Ok(())
}

/// An input port with a dataset reference implies a dataset node feeding the
/// owning module. Dataset ids never appear in the position XML, so the node
/// is created on first sight; repeated references from the same module
/// collapse to a single edge.
fn add_dataset_edges(graph: &mut Graph, doc: &ExperimentDocument) {
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for module in &doc.graph.module_nodes {
        for port in &module.input_ports_internal {
            let Some(dataset_id) = port.data_source_id.as_deref() else {
                continue;
            };
            if dataset_id.is_empty() {
                continue;
            }
            if !seen.insert((module.id.clone(), dataset_id.to_string())) {
                continue;
            }

            graph.add_node(GraphNode::with_defaults(dataset_id));
            graph.add_edge(dataset_id, module.id.as_str());
        }
    }
}

fn add_internal_edges(graph: &mut Graph, doc: &ExperimentDocument) -> Result<()> {
    for edge in &doc.graph.edges_internal {
        let (source, _) = split_port_key(&edge.source_output_port_id)?;
        let (destination, _) = split_port_key(&edge.destination_input_port_id)?;

        require_node(graph, source)?;
        require_node(graph, destination)?;
        graph.add_edge(source, destination);
    }
    Ok(())
}

/// Web-service inputs feed into their connected module; outputs drain out of
/// it. Output edges therefore point *into* the boundary node, the reverse of
/// input edges.
fn add_boundary_edges(graph: &mut Graph, web_service: &WebServiceSection) -> Result<()> {
    for input in &web_service.inputs {
        let Some(port_id) = input.port_id.as_deref() else {
            continue;
        };
        if port_id.is_empty() {
            continue;
        }
        let (module, _) = split_port_key(port_id)?;
        require_node(graph, &input.id)?;
        require_node(graph, module)?;
        graph.add_edge(input.id.as_str(), module);
    }

    for output in &web_service.outputs {
        let Some(port_id) = output.port_id.as_deref() else {
            continue;
        };
        if port_id.is_empty() {
            continue;
        }
        let (module, _) = split_port_key(port_id)?;
        require_node(graph, module)?;
        require_node(graph, &output.id)?;
        graph.add_edge(module, output.id.as_str());
    }

    Ok(())
}

fn require_node(graph: &Graph, id: &str) -> Result<()> {
    if graph.contains_node(id) {
        return Ok(());
    }
    Err(Error::GraphConsistency {
        node_id: id.to_string(),
    })
}
