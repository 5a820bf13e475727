use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::MediaType;
use super::schema::SchemaOrRef;

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    /// Schema of the body, preferring `application/json` and falling back to
    /// the first declared media type.
    pub fn schema(&self) -> Option<&SchemaOrRef> {
        self.content
            .get("application/json")
            .or_else(|| self.content.first().map(|(_, mt)| mt))
            .and_then(|mt| mt.schema.as_ref())
    }
}

/// A reference or inline request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}

impl RequestBodyOrRef {
    /// The inline body, or `None` for an unresolved reference.
    pub fn as_request_body(&self) -> Option<&RequestBody> {
        match self {
            RequestBodyOrRef::RequestBody(b) => Some(b),
            RequestBodyOrRef::Ref { .. } => None,
        }
    }
}
