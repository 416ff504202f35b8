use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// Failure to dereference a single `$ref` pointer. Both cases are
/// recoverable: the expander degrades them to inline markers instead of
/// aborting the pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("unsupported reference format: {pointer} (only '#/components/' references are supported)")]
    UnsupportedFormat { pointer: String },

    #[error("could not resolve segment '{segment}' in pointer '{pointer}'")]
    MissingSegment { pointer: String, segment: String },
}
