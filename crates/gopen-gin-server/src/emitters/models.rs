use std::collections::HashSet;

use gopen_core::naming::{Separators, go_exported_name, normalize_identifier, unique_name};
use gopen_core::parse::schema::{Schema, SchemaOrRef, SchemaType};
use gopen_core::parse::spec::Specification;
use gopen_core::types::{TypeResolver, uses_time};
use minijinja::context;
use serde::Serialize;

use super::render;
use super::view::{go_string_body, single_line};
use crate::error::GeneratorError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelView {
    Struct {
        name: String,
        description: Option<String>,
        fields: Vec<FieldView>,
    },
    Enum {
        name: String,
        description: Option<String>,
        variants: Vec<VariantView>,
    },
    Alias {
        name: String,
        description: Option<String>,
        target: String,
    },
}

impl ModelView {
    fn mentions_time(&self) -> bool {
        match self {
            ModelView::Struct { fields, .. } => fields.iter().any(|f| uses_time(&f.go_type)),
            ModelView::Alias { target, .. } => uses_time(target),
            ModelView::Enum { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct FieldView {
    name: String,
    go_type: String,
    tag: String,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct VariantView {
    name: String,
    value: String,
}

/// Emit `generated/models/models.go` from the component schemas.
pub fn emit_models(spec: &Specification) -> Result<String, GeneratorError> {
    let resolver = TypeResolver::new();
    let models: Vec<ModelView> = spec
        .components
        .schemas()
        .map(|(name, node)| model_view(name, node, &resolver))
        .collect();
    let uses_time = models.iter().any(ModelView::mentions_time);

    render(
        "models.go.j2",
        include_str!("../../templates/models.go.j2"),
        context! {
            models => models,
            uses_time => uses_time,
        },
    )
}

fn model_view(name: &str, node: &SchemaOrRef, resolver: &TypeResolver) -> ModelView {
    let schema = match node {
        SchemaOrRef::Schema(schema) => schema,
        SchemaOrRef::Ref { .. } => {
            return ModelView::Alias {
                name: name.to_string(),
                description: None,
                target: resolver.resolve(node),
            };
        }
    };
    let description = schema.description.as_deref().map(single_line);

    if is_struct(schema) {
        return ModelView::Struct {
            name: name.to_string(),
            description,
            fields: fields(schema, resolver),
        };
    }

    let values = schema.string_enum_values();
    if schema.primary_type() == Some(&SchemaType::String) && !values.is_empty() {
        return ModelView::Enum {
            name: name.to_string(),
            description,
            variants: variants(name, &values),
        };
    }

    ModelView::Alias {
        name: name.to_string(),
        description,
        target: resolver.resolve_schema(schema),
    }
}

/// An object schema, or a type-less one that declares properties.
fn is_struct(schema: &Schema) -> bool {
    match schema.primary_type() {
        Some(SchemaType::Object) => true,
        None => !schema.properties.is_empty(),
        Some(_) => false,
    }
}

fn fields(schema: &Schema, resolver: &TypeResolver) -> Vec<FieldView> {
    let mut seen = HashSet::new();
    schema
        .properties
        .iter()
        .map(|(json_name, prop)| {
            let mut name = go_exported_name(json_name, "Field");
            if name.is_empty() {
                name = "Field".to_string();
            }
            let go_type = resolver.resolve(prop);
            let tag = match (schema.required.contains(json_name), has_valid_zero(&go_type)) {
                (true, false) => format!(r#"json:"{json_name}" binding:"required""#),
                (true, true) => format!(r#"json:"{json_name}""#),
                (false, _) => format!(r#"json:"{json_name},omitempty""#),
            };
            let description = match prop {
                SchemaOrRef::Schema(s) => s.description.as_deref().map(single_line),
                SchemaOrRef::Ref { .. } => None,
            };
            FieldView {
                name: unique_name(&mut seen, &name),
                go_type,
                tag,
                description,
            }
        })
        .collect()
}

/// Gin's `required` rejects a zero value, and `false` or `0` are valid
/// payloads for these types.
fn has_valid_zero(go_type: &str) -> bool {
    go_type == "bool"
        || go_type.starts_with("int")
        || go_type.starts_with("uint")
        || go_type.starts_with("float")
}

fn variants(type_name: &str, values: &[String]) -> Vec<VariantView> {
    let mut seen = HashSet::new();
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let suffix = normalize_identifier(value, Separators::NonAlphanumeric);
            let suffix = if suffix.is_empty() {
                format!("Value{i}")
            } else {
                suffix
            };
            VariantView {
                name: unique_name(&mut seen, &format!("{type_name}{suffix}")),
                value: go_string_body(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopen_core::parse::spec::{LoadMode, RawDocument};

    fn spec(yaml: &str) -> Specification {
        let raw: RawDocument = serde_yaml_ng::from_str(yaml).unwrap();
        raw.into_specification(LoadMode::Lenient).unwrap()
    }

    #[test]
    fn test_struct_fields_and_tags() {
        let out = emit_models(&spec(
            r#"
components:
  schemas:
    User:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
        display_name:
          type: string
          description: Name shown in the UI
        profile:
          $ref: '#/components/schemas/Profile'
"#,
        ))
        .unwrap();

        assert!(out.starts_with("// Code generated by gopen. DO NOT EDIT.\n"));
        assert!(out.contains("package models\n"));
        assert!(out.contains("type User struct {\n"));
        assert!(out.contains("\tId int64 `json:\"id\"`\n"));
        assert!(out.contains("\tName string `json:\"name\" binding:\"required\"`\n"));
        assert!(out.contains("\t// Name shown in the UI\n"));
        assert!(out.contains("\tDisplayName string `json:\"display_name,omitempty\"`\n"));
        assert!(out.contains("\tProfile Profile `json:\"profile,omitempty\"`\n"));
        assert!(!out.contains("\"time\""));
    }

    #[test]
    fn test_time_import_only_when_needed() {
        let out = emit_models(&spec(
            r#"
components:
  schemas:
    Event:
      type: object
      properties:
        at:
          type: string
          format: date-time
"#,
        ))
        .unwrap();
        assert!(out.contains("import \"time\"\n"));
        assert!(out.contains("\tAt time.Time `json:\"at,omitempty\"`\n"));
    }

    #[test]
    fn test_string_enum_and_aliases() {
        let out = emit_models(&spec(
            r#"
components:
  schemas:
    Status:
      type: string
      enum: [active, on-hold]
    Tags:
      type: array
      items:
        type: string
    Owner:
      $ref: '#/components/schemas/User'
"#,
        ))
        .unwrap();
        assert!(out.contains("type Status string\n"));
        assert!(out.contains("\tStatusActive Status = \"active\"\n"));
        assert!(out.contains("\tStatusOnHold Status = \"on-hold\"\n"));
        assert!(out.contains("type Tags []string\n"));
        assert!(out.contains("type Owner User\n"));
    }

    #[test]
    fn test_required_scalars_accept_zero_values() {
        let out = emit_models(&spec(
            r#"
components:
  schemas:
    Toggle:
      type: object
      required: [enabled, ratio, owner]
      properties:
        enabled:
          type: boolean
        ratio:
          type: number
          format: float
        owner:
          $ref: '#/components/schemas/User'
"#,
        ))
        .unwrap();
        assert!(out.contains("\tEnabled bool `json:\"enabled\"`\n"));
        assert!(out.contains("\tRatio float32 `json:\"ratio\"`\n"));
        assert!(out.contains("\tOwner User `json:\"owner\" binding:\"required\"`\n"));
    }

    #[test]
    fn test_enum_values_are_escaped() {
        let out = emit_models(&spec(
            r#"
components:
  schemas:
    Quote:
      type: string
      enum: ["say \"hi\"", "two\nlines"]
"#,
        ))
        .unwrap();
        assert!(out.contains(r#"QuoteSayHi Quote = "say \"hi\"""#));
        assert!(out.contains(r#"QuoteTwoLines Quote = "two\nlines""#));
    }

    #[test]
    fn test_no_components_still_renders_package() {
        let out = emit_models(&Specification::default()).unwrap();
        assert!(out.contains("package models\n"));
        assert!(!out.contains("type "));
    }

    #[test]
    fn test_field_names_are_valid_identifiers() {
        let out = emit_models(&spec(
            r#"
components:
  schemas:
    Odd:
      properties:
        2fa:
          type: boolean
        x-rate:
          type: number
"#,
        ))
        .unwrap();
        assert!(out.contains("\tField2fa bool `json:\"2fa,omitempty\"`\n"));
        assert!(out.contains("\tXRate float64 `json:\"x-rate,omitempty\"`\n"));
    }
}
