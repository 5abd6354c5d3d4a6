use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the extract / layout / patch pipeline. None of these are
/// recovered locally: the pipeline either returns a fully patched document
/// or leaves the caller's document untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// A composite port key did not contain the `:` separator.
    #[error("malformed port key '{key}': expected '<nodeId>:<portIndex>'")]
    MalformedKey { key: String },

    /// The embedded position XML failed to parse or lacks `<NodePositions>`.
    #[error("invalid position XML: {detail}")]
    InvalidPositionXml { detail: String },

    /// An edge references a node id that is not in the node set.
    #[error("edge references unknown node '{node_id}'")]
    GraphConsistency { node_id: String },

    /// The layout service answered with a non-success status.
    #[error("layout service returned {status}: {body}")]
    LayoutService { status: u16, body: String },

    /// The literal position span to replace was not found in the document.
    #[error("position span for section '{section}' not found in document")]
    PatchTargetNotFound { section: String },

    #[error("failed to parse experiment document: {0}")]
    DocumentParse(#[from] serde_json::Error),

    #[error("layout service transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}
