use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::components::Components;
use super::operation::{HttpMethod, Operation, PathItem};
use super::server::Server;
use crate::error::LoadError;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How strictly a document's top-level layout is checked on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Absent sections become empty collections.
    #[default]
    Lenient,
    /// `openapi`, `info`, `paths` and `components.schemas` must be present.
    Strict,
}

/// The document exactly as deserialized, before any section is defaulted.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawDocument {
    pub openapi: Option<String>,
    pub info: Option<Info>,
    #[serde(default)]
    pub servers: Vec<Server>,
    pub paths: Option<IndexMap<String, PathItem>>,
    pub components: Option<Components>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl RawDocument {
    /// Turn the raw document into a [`Specification`], checking required
    /// sections when `mode` is [`LoadMode::Strict`].
    pub fn into_specification(self, mode: LoadMode) -> Result<Specification, LoadError> {
        if mode == LoadMode::Strict {
            if self.openapi.is_none() {
                return Err(LoadError::MissingSection("openapi"));
            }
            if self.info.is_none() {
                return Err(LoadError::MissingSection("info"));
            }
            if self.paths.is_none() {
                return Err(LoadError::MissingSection("paths"));
            }
            match &self.components {
                None => return Err(LoadError::MissingSection("components")),
                Some(c) if c.schemas.is_none() => {
                    return Err(LoadError::MissingSection("components.schemas"));
                }
                Some(_) => {}
            }
        }

        Ok(Specification {
            openapi: self.openapi,
            info: self.info.unwrap_or_default(),
            servers: self.servers,
            paths: self.paths.unwrap_or_default(),
            components: self.components.unwrap_or_default(),
            tags: self.tags,
        })
    }
}

/// The in-memory model of an API description.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Specification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    pub info: Info,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    pub paths: IndexMap<String, PathItem>,

    pub components: Components,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Specification {
    /// Every operation as `(path, method, operation)`, paths in document
    /// order and methods in [`HttpMethod::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    pub fn operation_count(&self) -> usize {
        self.operations().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_defaults_missing_sections() {
        let raw: RawDocument = serde_yaml_ng::from_str("openapi: 3.0.0\n").unwrap();
        let spec = raw.into_specification(LoadMode::Lenient).unwrap();
        assert!(spec.paths.is_empty());
        assert_eq!(spec.components.schema_count(), 0);
        assert_eq!(spec.info.title, "");
    }

    #[test]
    fn test_strict_reports_first_missing_section() {
        let yaml = r#"
openapi: 3.0.0
info:
  title: Test
  version: "1.0"
paths: {}
components:
  parameters: {}
"#;
        let raw: RawDocument = serde_yaml_ng::from_str(yaml).unwrap();
        let err = raw.into_specification(LoadMode::Strict).unwrap_err();
        assert!(matches!(err, LoadError::MissingSection("components.schemas")));
    }

    #[test]
    fn test_strict_accepts_complete_document() {
        let yaml = r#"
openapi: 3.0.0
info:
  title: Test
  version: "1.0"
paths: {}
components:
  schemas: {}
"#;
        let raw: RawDocument = serde_yaml_ng::from_str(yaml).unwrap();
        let spec = raw.into_specification(LoadMode::Strict).unwrap();
        assert_eq!(spec.info.title, "Test");
    }
}
