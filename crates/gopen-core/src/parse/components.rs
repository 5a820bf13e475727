use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::SchemaOrRef;

/// Components object holding reusable definitions.
///
/// `schemas` is left as an `Option` so a strict load can tell an absent
/// section from an empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, SchemaOrRef>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,
}

impl Components {
    /// Iterate named schemas in document order.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &SchemaOrRef)> {
        self.schemas.iter().flat_map(|s| s.iter())
    }

    /// Look up a named schema.
    pub fn schema(&self, name: &str) -> Option<&SchemaOrRef> {
        self.schemas.as_ref().and_then(|s| s.get(name))
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.as_ref().map_or(0, IndexMap::len)
    }
}
