use minijinja::context;

use super::render;
use super::view::ApiView;
use crate::error::GeneratorError;

/// Emit `generated/server/router.go`: the `Server` type and one
/// `Handle(method, path, ...)` registration per operation.
pub fn emit_router(api: &ApiView, module: &str) -> Result<String, GeneratorError> {
    render(
        "router.go.j2",
        include_str!("../../templates/router.go.j2"),
        context! {
            module => module,
            operations => api.operations,
            uses_models => api.uses_models,
            uses_time => api.uses_time,
            has_body => api.has_body,
        },
    )
}
