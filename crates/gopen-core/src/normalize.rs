use log::warn;

use crate::naming::{Separators, normalize_identifier, path_placeholders, ref_name};
use crate::parse::components::Components;
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::spec::Specification;

/// Tag given to operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// Bring a freshly loaded specification into canonical form.
///
/// Every operation ends up with its method, at least one tag, an identifier,
/// the path-level parameters and inlined parameter/body references.
/// Applying the pass to its own output changes nothing.
pub fn normalize(mut spec: Specification) -> Specification {
    let components = spec.components.clone();

    for (path, item) in spec.paths.iter_mut() {
        let shared: Vec<Parameter> = item
            .parameters
            .iter()
            .filter_map(|p| inline_parameter(p, &components, path))
            .collect();

        for (method, op) in item.operations_mut() {
            normalize_operation(path, method, op, &shared, &components);
        }
    }

    spec
}

fn normalize_operation(
    path: &str,
    method: HttpMethod,
    op: &mut Operation,
    shared: &[Parameter],
    components: &Components,
) {
    if op.method.is_empty() {
        op.method = method.as_str().to_string();
    }
    if op.tags.is_empty() {
        op.tags.push(DEFAULT_TAG.to_string());
    }
    if op.operation_id.is_empty() {
        op.operation_id = synthesize_operation_id(method, path);
    }

    let mut params: Vec<Parameter> = op
        .parameters
        .iter()
        .filter_map(|p| inline_parameter(p, components, path))
        .collect();
    for inherited in shared {
        if !params.iter().any(|p| p.same_slot(inherited)) {
            params.push(inherited.clone());
        }
    }
    op.parameters = params.into_iter().map(ParameterOrRef::Parameter).collect();

    if let Some(RequestBodyOrRef::Ref { ref_path }) = &op.request_body {
        let target = components
            .request_bodies
            .get(ref_name(ref_path))
            .and_then(|b| b.as_request_body())
            .cloned();
        if target.is_none() {
            warn!("{method} {path}: dropping unresolved request body {ref_path}");
        }
        op.request_body = target.map(RequestBodyOrRef::RequestBody);
    }

    check_path_parameters(path, method, op);
}

/// `lowercase(verb)` followed by the normalized last path segment.
///
/// `GET /users` → `getUsers`, `GET /` → `get`.
pub fn synthesize_operation_id(method: HttpMethod, path: &str) -> String {
    let last = path
        .trim_matches('/')
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("");
    format!(
        "{}{}",
        method.as_key(),
        normalize_identifier(last, Separators::NonAlphanumeric)
    )
}

fn inline_parameter(
    param: &ParameterOrRef,
    components: &Components,
    path: &str,
) -> Option<Parameter> {
    match param {
        ParameterOrRef::Parameter(p) => Some(p.clone()),
        ParameterOrRef::Ref { ref_path } => {
            let target = components
                .parameters
                .get(ref_name(ref_path))
                .and_then(|p| p.as_parameter())
                .cloned();
            if target.is_none() {
                warn!("{path}: dropping unresolved parameter {ref_path}");
            }
            target
        }
    }
}

fn check_path_parameters(path: &str, method: HttpMethod, op: &Operation) {
    let placeholders = path_placeholders(path);
    let declared: Vec<&str> = op
        .parameters
        .iter()
        .filter_map(|p| p.as_parameter())
        .filter(|p| p.location == ParameterLocation::Path)
        .map(|p| p.name.as_str())
        .collect();

    for name in &declared {
        if !placeholders.contains(name) {
            warn!("{method} {path}: path parameter {name:?} does not appear in the template");
        }
    }
    for name in &placeholders {
        if !declared.contains(name) {
            warn!("{method} {path}: placeholder {{{name}}} has no declared path parameter");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::spec::{LoadMode, RawDocument};

    fn spec_from(yaml: &str) -> Specification {
        let raw: RawDocument = serde_yaml_ng::from_str(yaml).unwrap();
        raw.into_specification(LoadMode::Lenient).unwrap()
    }

    fn op<'a>(spec: &'a Specification, path: &str, method: HttpMethod) -> &'a Operation {
        spec.paths[path].operation(method).unwrap()
    }

    #[test]
    fn test_synthesized_operation_ids() {
        assert_eq!(synthesize_operation_id(HttpMethod::Get, "/users"), "getUsers");
        assert_eq!(synthesize_operation_id(HttpMethod::Post, "/users"), "postUsers");
        assert_eq!(synthesize_operation_id(HttpMethod::Get, "/"), "get");
        assert_eq!(
            synthesize_operation_id(HttpMethod::Delete, "/complex/path/with/segments"),
            "deleteSegments"
        );
        assert_eq!(
            synthesize_operation_id(HttpMethod::Get, "/users/{id}"),
            "getId"
        );
        assert_eq!(
            synthesize_operation_id(HttpMethod::Put, "/users/"),
            "putUsers"
        );
    }

    #[test]
    fn test_fills_method_tags_and_ids() {
        let spec = normalize(spec_from(
            r#"
paths:
  /users:
    get: {}
    post:
      operationId: createUser
      tags: [users]
"#,
        ));

        let get = op(&spec, "/users", HttpMethod::Get);
        assert_eq!(get.method, "GET");
        assert_eq!(get.operation_id, "getUsers");
        assert_eq!(get.tags, vec!["default".to_string()]);

        let post = op(&spec, "/users", HttpMethod::Post);
        assert_eq!(post.method, "POST");
        assert_eq!(post.operation_id, "createUser");
        assert_eq!(post.tags, vec!["users".to_string()]);
    }

    #[test]
    fn test_merges_path_level_parameters() {
        let spec = normalize(spec_from(
            r#"
paths:
  /users/{id}:
    parameters:
      - name: id
        in: path
        required: true
      - name: verbose
        in: query
    get:
      parameters:
        - name: verbose
          in: query
          required: true
"#,
        ));

        let get = op(&spec, "/users/{id}", HttpMethod::Get);
        let params: Vec<&Parameter> = get.parameters.iter().filter_map(|p| p.as_parameter()).collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "verbose");
        assert!(params[0].required);
        assert_eq!(params[1].name, "id");
        assert_eq!(params[1].location, ParameterLocation::Path);
    }

    #[test]
    fn test_inlines_component_references() {
        let spec = normalize(spec_from(
            r#"
paths:
  /pets/{petId}:
    put:
      parameters:
        - $ref: '#/components/parameters/PetId'
        - $ref: '#/components/parameters/Missing'
      requestBody:
        $ref: '#/components/requestBodies/PetBody'
components:
  parameters:
    PetId:
      name: petId
      in: path
      required: true
  requestBodies:
    PetBody:
      required: true
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/Pet'
"#,
        ));

        let put = op(&spec, "/pets/{petId}", HttpMethod::Put);
        assert_eq!(put.parameters.len(), 1);
        assert_eq!(put.parameters[0].as_parameter().unwrap().name, "petId");
        let body = put.request_body.as_ref().unwrap().as_request_body().unwrap();
        assert!(body.required);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(spec_from(
            r#"
paths:
  /:
    get: {}
  /orders/{orderId}:
    parameters:
      - name: orderId
        in: path
        required: true
    delete:
      tags: [orders]
"#,
        ));
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
        assert_eq!(op(&once, "/", HttpMethod::Get).operation_id, "get");
    }
}
