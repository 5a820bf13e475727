use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::ResolveError;
use crate::naming::ref_name;
use crate::parse::components::Components;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType};
use crate::parse::spec::Specification;

/// Go type used when nothing more specific can be said about a node.
pub const DYNAMIC: &str = "interface{}";

/// Maps schema nodes to Go type expressions.
///
/// Resolution never fails: anything the matrix does not cover becomes
/// `interface{}`.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    qualifier: Option<String>,
}

impl TypeResolver {
    /// Resolver for code that lives in the models package itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver whose references are prefixed with `qualifier`, e.g. `models.`.
    pub fn qualified(qualifier: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
        }
    }

    pub fn resolve(&self, node: &SchemaOrRef) -> String {
        match node {
            SchemaOrRef::Ref { ref_path } => self.reference(ref_path),
            SchemaOrRef::Schema(schema) => self.resolve_schema(schema),
        }
    }

    pub fn resolve_schema(&self, schema: &Schema) -> String {
        let format = schema.format.as_deref();
        match schema.primary_type() {
            Some(SchemaType::String) => match format {
                Some("date" | "date-time") => "time.Time".to_string(),
                Some("byte" | "binary") => "[]byte".to_string(),
                _ => "string".to_string(),
            },
            Some(SchemaType::Integer) => match format {
                Some("int32") => "int32".to_string(),
                Some("int64") => "int64".to_string(),
                _ => "int".to_string(),
            },
            Some(SchemaType::Number) => match format {
                Some("float") => "float32".to_string(),
                _ => "float64".to_string(),
            },
            Some(SchemaType::Boolean) => "bool".to_string(),
            Some(SchemaType::Array) => match &schema.items {
                Some(items) => format!("[]{}", self.resolve(items)),
                None => format!("[]{DYNAMIC}"),
            },
            Some(SchemaType::Object) => format!("map[string]{DYNAMIC}"),
            Some(SchemaType::Null | SchemaType::Other(_)) | None => DYNAMIC.to_string(),
        }
    }

    fn reference(&self, ref_path: &str) -> String {
        let name = ref_name(ref_path);
        match &self.qualifier {
            Some(q) => format!("{q}{name}"),
            None => name.to_string(),
        }
    }
}

/// Whether a resolved Go type mentions `time.Time`.
pub fn uses_time(go_type: &str) -> bool {
    go_type.contains("time.Time")
}

/// Name → component schema lookup, built once per run.
#[derive(Debug)]
pub struct SchemaIndex<'a> {
    schemas: IndexMap<&'a str, &'a SchemaOrRef>,
}

impl<'a> SchemaIndex<'a> {
    pub fn new(components: &'a Components) -> Self {
        Self {
            schemas: components
                .schemas()
                .map(|(name, node)| (name.as_str(), node))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a SchemaOrRef> {
        self.schemas.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Check every schema reference in `spec`.
    ///
    /// Dangling references are logged and otherwise ignored. A cycle made of
    /// by-value edges fails with [`ResolveError::CircularRef`]. Arrays and
    /// maps are indirections and break cycles.
    ///
    /// Returns the number of dangling references found.
    pub fn check(&self, spec: &Specification) -> Result<usize, ResolveError> {
        let mut dangling = 0;
        let mut report = |ref_path: &str, site: &str| {
            if !self.contains(ref_name(ref_path)) {
                warn!("{site}: reference {ref_path} does not name a component schema");
                dangling += 1;
            }
        };

        for (name, node) in &self.schemas {
            walk_refs(node, &mut |r| report(r, &format!("component {name}")));
        }
        for (path, method, op) in spec.operations() {
            let site = format!("{method} {path}");
            for param in op.parameters.iter().filter_map(|p| p.as_parameter()) {
                if let Some(schema) = &param.schema {
                    walk_refs(schema, &mut |r| report(r, &site));
                }
            }
            if let Some(schema) = op
                .request_body
                .as_ref()
                .and_then(|b| b.as_request_body())
                .and_then(|b| b.schema())
            {
                walk_refs(schema, &mut |r| report(r, &site));
            }
        }

        let mut done = HashSet::new();
        for name in self.schemas.keys() {
            let mut stack = Vec::new();
            self.visit(*name, &mut stack, &mut done)?;
        }

        debug!(
            "checked {} component schemas, {dangling} dangling references",
            self.len()
        );
        Ok(dangling)
    }

    fn visit(
        &self,
        name: &'a str,
        stack: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<(), ResolveError> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(start) = stack.iter().position(|n| *n == name) {
            let mut chain: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
            chain.push(name.to_string());
            return Err(ResolveError::CircularRef(chain));
        }
        let Some(node) = self.get(name) else {
            return Ok(());
        };

        stack.push(name);
        for target in by_value_targets(node) {
            if let Some((key, _)) = self.schemas.get_key_value(target) {
                self.visit(*key, stack, done)?;
            }
        }
        stack.pop();
        done.insert(name);
        Ok(())
    }
}

/// Component names a node embeds directly: an alias reference, or an object
/// property that is itself a reference.
fn by_value_targets(node: &SchemaOrRef) -> Vec<&str> {
    match node {
        SchemaOrRef::Ref { ref_path } => vec![ref_name(ref_path)],
        SchemaOrRef::Schema(schema) => schema
            .properties
            .values()
            .filter_map(|prop| match prop {
                SchemaOrRef::Ref { ref_path } => Some(ref_name(ref_path)),
                SchemaOrRef::Schema(_) => None,
            })
            .collect(),
    }
}

/// Call `f` with every reference string below `node`.
fn walk_refs(node: &SchemaOrRef, f: &mut impl FnMut(&str)) {
    match node {
        SchemaOrRef::Ref { ref_path } => f(ref_path),
        SchemaOrRef::Schema(schema) => {
            for prop in schema.properties.values() {
                walk_refs(prop, f);
            }
            if let Some(items) = &schema.items {
                walk_refs(items, f);
            }
            if let Some(AdditionalProperties::Schema(inner)) = &schema.additional_properties {
                walk_refs(inner, f);
            }
            for sub in schema
                .all_of
                .iter()
                .chain(&schema.one_of)
                .chain(&schema.any_of)
            {
                walk_refs(sub, f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(schema: Schema) -> String {
        TypeResolver::new().resolve(&SchemaOrRef::inline(schema))
    }

    fn array_of(items: SchemaOrRef) -> Schema {
        Schema {
            items: Some(Box::new(items)),
            ..Schema::of_type(SchemaType::Array)
        }
    }

    #[test]
    fn test_string_formats() {
        assert_eq!(resolve(Schema::of_type(SchemaType::String)), "string");
        assert_eq!(
            resolve(Schema::with_format(SchemaType::String, "date-time")),
            "time.Time"
        );
        assert_eq!(
            resolve(Schema::with_format(SchemaType::String, "date")),
            "time.Time"
        );
        assert_eq!(
            resolve(Schema::with_format(SchemaType::String, "byte")),
            "[]byte"
        );
        assert_eq!(
            resolve(Schema::with_format(SchemaType::String, "binary")),
            "[]byte"
        );
        assert_eq!(
            resolve(Schema::with_format(SchemaType::String, "email")),
            "string"
        );
    }

    #[test]
    fn test_numeric_formats() {
        assert_eq!(resolve(Schema::of_type(SchemaType::Integer)), "int");
        assert_eq!(
            resolve(Schema::with_format(SchemaType::Integer, "int32")),
            "int32"
        );
        assert_eq!(
            resolve(Schema::with_format(SchemaType::Integer, "int64")),
            "int64"
        );
        assert_eq!(resolve(Schema::of_type(SchemaType::Number)), "float64");
        assert_eq!(
            resolve(Schema::with_format(SchemaType::Number, "float")),
            "float32"
        );
        assert_eq!(
            resolve(Schema::with_format(SchemaType::Number, "double")),
            "float64"
        );
        assert_eq!(resolve(Schema::of_type(SchemaType::Boolean)), "bool");
    }

    #[test]
    fn test_containers() {
        assert_eq!(resolve(Schema::of_type(SchemaType::Array)), "[]interface{}");
        assert_eq!(
            resolve(array_of(SchemaOrRef::inline(Schema::of_type(
                SchemaType::String
            )))),
            "[]string"
        );
        assert_eq!(
            resolve(Schema::of_type(SchemaType::Object)),
            "map[string]interface{}"
        );
    }

    #[test]
    fn test_nested_array_of_refs() {
        let inner = array_of(SchemaOrRef::reference("#/components/schemas/Profile"));
        let outer = array_of(SchemaOrRef::inline(inner));
        assert_eq!(resolve(outer), "[][]Profile");
    }

    #[test]
    fn test_fallback_is_dynamic() {
        assert_eq!(resolve(Schema::default()), "interface{}");
        assert_eq!(
            resolve(Schema::of_type(SchemaType::Other("uuid".to_string()))),
            "interface{}"
        );
        assert_eq!(resolve(Schema::of_type(SchemaType::Null)), "interface{}");
    }

    #[test]
    fn test_reference_uses_last_segment() {
        let node = SchemaOrRef::reference("#/components/schemas/api/v2/user/Profile");
        assert_eq!(TypeResolver::new().resolve(&node), "Profile");
        assert_eq!(
            TypeResolver::qualified("models.").resolve(&node),
            "models.Profile"
        );
    }

    #[test]
    fn test_qualifier_reaches_nested_refs() {
        let node = SchemaOrRef::inline(array_of(SchemaOrRef::reference(
            "#/components/schemas/Pet",
        )));
        assert_eq!(
            TypeResolver::qualified("models.").resolve(&node),
            "[]models.Pet"
        );
    }

    fn spec_from(yaml: &str) -> Specification {
        let raw: crate::parse::spec::RawDocument = serde_yaml_ng::from_str(yaml).unwrap();
        raw.into_specification(crate::parse::spec::LoadMode::Lenient)
            .unwrap()
    }

    #[test]
    fn test_by_value_self_reference_is_rejected() {
        let spec = spec_from(
            r#"
components:
  schemas:
    Node:
      type: object
      properties:
        next:
          $ref: '#/components/schemas/Node'
"#,
        );
        let index = SchemaIndex::new(&spec.components);
        let err = index.check(&spec).unwrap_err();
        let ResolveError::CircularRef(chain) = err;
        assert_eq!(chain, vec!["Node".to_string(), "Node".to_string()]);
    }

    #[test]
    fn test_alias_cycle_is_rejected() {
        let spec = spec_from(
            r#"
components:
  schemas:
    A:
      $ref: '#/components/schemas/B'
    B:
      $ref: '#/components/schemas/A'
"#,
        );
        let index = SchemaIndex::new(&spec.components);
        assert!(matches!(
            index.check(&spec),
            Err(ResolveError::CircularRef(chain)) if chain == ["A", "B", "A"]
        ));
    }

    #[test]
    fn test_self_reference_through_array_is_accepted() {
        let spec = spec_from(
            r#"
components:
  schemas:
    Tree:
      type: object
      properties:
        children:
          type: array
          items:
            $ref: '#/components/schemas/Tree'
"#,
        );
        let index = SchemaIndex::new(&spec.components);
        assert_eq!(index.check(&spec).unwrap(), 0);
    }

    #[test]
    fn test_dangling_reference_is_counted_not_fatal() {
        let spec = spec_from(
            r#"
paths:
  /pets:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Missing'
components:
  schemas:
    Pet:
      type: object
"#,
        );
        let index = SchemaIndex::new(&spec.components);
        assert_eq!(index.check(&spec).unwrap(), 1);
        assert!(index.contains("Pet"));
        assert!(!index.contains("Missing"));
    }
}
