pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod server;
pub mod spec;

use crate::error::LoadError;
use spec::RawDocument;

/// Parse a raw document from YAML.
pub fn from_yaml(input: &str) -> Result<RawDocument, LoadError> {
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse a raw document from JSON.
pub fn from_json(input: &str) -> Result<RawDocument, LoadError> {
    Ok(serde_json::from_str(input)?)
}
