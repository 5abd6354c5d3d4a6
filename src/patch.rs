use tracing::debug;

use crate::document::ExperimentDocument;
use crate::graph::Graph;
use crate::positions::{extract_node_ids, position_span, render_positions_xml};
use crate::{Error, Result};

/// Splices the graph's positions back into the raw document text, returning
/// a new document string that is byte-identical outside the two
/// `<NodePositions>` spans.
///
/// Membership of a node in a section is positional: it is re-derived from
/// where the id appears in that section's position XML, never cached from an
/// earlier extraction. Sections are patched sequentially against the
/// accumulating result, `Graph` first, then `WebService` when present.
pub fn apply_positions(raw_document: &str, graph: &Graph) -> Result<String> {
    let doc = ExperimentDocument::parse(raw_document)?;

    let mut patched = raw_document.to_string();
    patched = patch_section(patched, "Graph", &doc.graph.serialized_client_data, graph)?;
    if let Some(web_service) = &doc.web_service {
        patched = patch_section(
            patched,
            "WebService",
            &web_service.serialized_client_data,
            graph,
        )?;
    }
    Ok(patched)
}

fn patch_section(
    document: String,
    section: &str,
    client_data: &str,
    graph: &Graph,
) -> Result<String> {
    let section_ids = extract_node_ids(client_data)?;
    if section_ids.is_empty() {
        // No position data yet, nothing to replace.
        debug!(section, "section has no positioned nodes, skipping");
        return Ok(document);
    }

    let replacement = render_positions_xml(
        section_ids
            .iter()
            .filter_map(|id| graph.node(id)),
    );

    let old_span = position_span(client_data)?;
    let Some(start) = document.find(old_span) else {
        return Err(Error::PatchTargetNotFound {
            section: section.to_string(),
        });
    };

    debug!(section, nodes = section_ids.len(), "replacing position span");
    let mut patched = document;
    patched.replace_range(start..start + old_span.len(), &replacement);
    Ok(patched)
}
