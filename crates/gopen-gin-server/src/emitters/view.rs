use std::collections::{BTreeMap, HashSet};

use gopen_core::naming::{
    Separators, go_exported_name, go_local_name, normalize_identifier, path_placeholders,
    to_gin_path, unique_name,
};
use gopen_core::normalize::synthesize_operation_id;
use gopen_core::parse::operation::{HttpMethod, Operation};
use gopen_core::parse::spec::Specification;
use gopen_core::types::{TypeResolver, uses_time};
use serde::Serialize;

/// Package qualifier for model types referenced outside `models`.
pub const MODELS_QUALIFIER: &str = "models.";

/// Names the generated handler and router code already binds: receivers,
/// the context, the bound body, `err` and the imported packages.
const RESERVED_LOCALS: &[&str] = &[
    "c", "h", "s", "err", "body", "api", "gin", "http", "models", "time",
];

/// A path placeholder as it reaches a handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathParamView {
    /// Name inside the route template, passed to `c.Param`.
    pub name: String,
    /// Go local variable holding the value.
    pub local: String,
}

/// Everything the Go templates need to know about one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationView {
    pub handler: String,
    pub operation_id: String,
    pub method: String,
    pub path: String,
    pub gin_path: String,
    pub headline: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub path_params: Vec<PathParamView>,
    pub body_type: Option<String>,
    /// `, id string, body models.Pet`: parameters after `c *gin.Context`.
    pub params_decl: String,
    /// `, id, body`: arguments after `c`.
    pub call_args: String,
    /// Status the generated placeholder handler answers with.
    pub stub_status: &'static str,
}

/// Operations of a specification, in emission order, plus the imports they
/// pull in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiView {
    pub operations: Vec<OperationView>,
    pub uses_models: bool,
    pub uses_time: bool,
    pub has_body: bool,
}

impl ApiView {
    pub fn new(spec: &Specification) -> Self {
        let resolver = TypeResolver::qualified(MODELS_QUALIFIER);
        let mut seen = HashSet::new();

        let operations: Vec<OperationView> = spec
            .operations()
            .map(|(path, method, op)| operation_view(path, method, op, &resolver, &mut seen))
            .collect();

        let body_types = || operations.iter().filter_map(|op| op.body_type.as_deref());
        let uses_models = body_types().any(|t| t.contains(MODELS_QUALIFIER));
        let uses_time = body_types().any(uses_time);
        let has_body = body_types().next().is_some();

        Self {
            operations,
            uses_models,
            uses_time,
            has_body,
        }
    }

    /// Operations grouped by tag, tags sorted by name. An operation with
    /// several tags appears under each of them.
    pub fn by_tag(&self) -> Vec<TagGroup<'_>> {
        let mut groups: BTreeMap<&str, Vec<&OperationView>> = BTreeMap::new();
        for op in &self.operations {
            for tag in &op.tags {
                groups.entry(tag.as_str()).or_default().push(op);
            }
        }
        groups
            .into_iter()
            .map(|(name, operations)| TagGroup { name, operations })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagGroup<'a> {
    pub name: &'a str,
    pub operations: Vec<&'a OperationView>,
}

/// Exported handler name for an operation, falling back to the synthesized
/// identifier when the declared one normalizes to nothing. Punctuation left
/// by the underscore split is dropped and a leading digit gets `Op`.
pub fn handler_name(method: HttpMethod, path: &str, op: &Operation) -> String {
    let name = go_exported_name(
        &normalize_identifier(&op.operation_id, Separators::Underscore),
        "Op",
    );
    if !name.is_empty() {
        return name;
    }
    normalize_identifier(
        &synthesize_operation_id(method, path),
        Separators::NonAlphanumeric,
    )
}

fn operation_view(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    resolver: &TypeResolver,
    seen: &mut HashSet<String>,
) -> OperationView {
    let handler = unique_name(seen, &handler_name(method, path, op));

    let mut locals: HashSet<String> = RESERVED_LOCALS.iter().map(|s| s.to_string()).collect();
    let path_params: Vec<PathParamView> = path_placeholders(path)
        .into_iter()
        .map(|name| {
            let mut local = go_local_name(name);
            if RESERVED_LOCALS.contains(&local.as_str()) {
                local.push_str("Param");
            }
            PathParamView {
                name: name.to_string(),
                local: unique_name(&mut locals, &local),
            }
        })
        .collect();

    let body_type = op
        .request_body
        .as_ref()
        .and_then(|b| b.as_request_body())
        .and_then(|b| b.schema())
        .map(|schema| resolver.resolve(schema));

    let mut params_decl = String::new();
    let mut call_args = String::new();
    for p in &path_params {
        params_decl.push_str(&format!(", {} string", p.local));
        call_args.push_str(&format!(", {}", p.local));
    }
    if let Some(ty) = &body_type {
        params_decl.push_str(&format!(", body {ty}"));
        call_args.push_str(", body");
    }

    let stub_status = match method {
        HttpMethod::Get => "http.StatusOK",
        HttpMethod::Post => "http.StatusCreated",
        _ => "http.StatusNotImplemented",
    };

    OperationView {
        handler,
        operation_id: op.operation_id.clone(),
        method: method.as_str().to_string(),
        path: path.to_string(),
        gin_path: go_string_body(&to_gin_path(path)),
        headline: op.headline().map(single_line),
        tags: op.tags.clone(),
        deprecated: op.deprecated.unwrap_or(false),
        path_params,
        body_type,
        params_decl,
        call_args,
        stub_status,
    }
}

/// Collapse a free-text description onto one line for a `//` comment.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use between the quotes of a Go string literal.
pub fn go_string_body(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
