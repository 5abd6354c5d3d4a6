use serde::Deserialize;

use crate::Result;

/// Typed view of the raw experiment document.
///
/// The document is parsed only to the depth this engine needs; everything
/// else, including fields unknown to this crate, stays untouched because
/// patching splices the original text instead of re-serializing this model.
/// The embedded `SerializedClientData` strings are carried verbatim and only
/// ever interpreted by the position codec.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExperimentDocument {
    pub graph: GraphSection,
    #[serde(default)]
    pub web_service: Option<WebServiceSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GraphSection {
    #[serde(default)]
    pub module_nodes: Vec<ModuleNode>,
    #[serde(default)]
    pub edges_internal: Vec<EdgeInternal>,
    #[serde(default)]
    pub serialized_client_data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleNode {
    pub id: String,
    #[serde(default)]
    pub module_id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub input_ports_internal: Vec<InputPort>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputPort {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data_source_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EdgeInternal {
    pub source_output_port_id: String,
    pub destination_input_port_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebServiceSection {
    #[serde(default)]
    pub inputs: Vec<BoundaryPort>,
    #[serde(default)]
    pub outputs: Vec<BoundaryPort>,
    #[serde(default)]
    pub serialized_client_data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundaryPort {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub port_id: Option<String>,
}

impl ExperimentDocument {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
