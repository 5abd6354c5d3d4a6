use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, GraphNode, Result};

const POSITIONS_ELEMENT: &str = "NodePositions";
const POSITION_ELEMENT: &str = "NodePosition";
const NODE_ATTR: &str = "Node";

fn span_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<NodePositions>(.*?)</NodePositions>").expect("span pattern is valid")
    })
}

/// Parses the embedded layout XML and returns the `Node` attribute of every
/// `<NodePosition>` child of the required `<NodePositions>` element, in
/// document order.
pub fn extract_node_ids(xml: &str) -> Result<Vec<String>> {
    let doc = roxmltree::Document::parse(xml).map_err(|err| Error::InvalidPositionXml {
        detail: err.to_string(),
    })?;

    let positions = doc
        .descendants()
        .find(|node| node.has_tag_name(POSITIONS_ELEMENT))
        .ok_or_else(|| Error::InvalidPositionXml {
            detail: format!("missing <{POSITIONS_ELEMENT}> element"),
        })?;

    Ok(positions
        .children()
        .filter(|child| child.has_tag_name(POSITION_ELEMENT))
        .filter_map(|child| child.attribute(NODE_ATTR))
        .map(str::to_string)
        .collect())
}

/// Returns the exact text between the first `<NodePositions>` and
/// `</NodePositions>` pair. This is the literal search key the patcher
/// replaces, so extraction and replacement share this one scan.
pub fn position_span(xml: &str) -> Result<&str> {
    span_pattern()
        .captures(xml)
        .and_then(|captures| captures.get(1))
        .map(|span| span.as_str())
        .ok_or_else(|| Error::InvalidPositionXml {
            detail: format!("missing <{POSITIONS_ELEMENT}> span"),
        })
}

/// Renders the replacement position block: one element per node, no
/// separators, in the given order.
///
/// Attribute values are single-quoted on purpose. The fragment lives inside
/// a JSON string field, and double quotes would be JSON-escaped there,
/// breaking the literal text-splice contract.
pub fn render_positions_xml<'a>(nodes: impl IntoIterator<Item = &'a GraphNode>) -> String {
    let mut xml = String::new();
    for node in nodes {
        xml.push_str(&format!(
            "<NodePosition Node='{}' Position='{},{},{},{}'/>",
            node.id, node.center_x, node.center_y, node.width, node.height
        ));
    }
    xml
}
