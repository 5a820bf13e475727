use minijinja::context;

use super::render;
use super::view::ApiView;
use crate::error::GeneratorError;

/// Emit `generated/api/interfaces.go`: the `APIHandlers` interface.
pub fn emit_interfaces(api: &ApiView, module: &str) -> Result<String, GeneratorError> {
    render(
        "interfaces.go.j2",
        include_str!("../../templates/interfaces.go.j2"),
        context! {
            module => module,
            operations => api.operations,
            uses_models => api.uses_models,
            uses_time => api.uses_time,
        },
    )
}
