use minijinja::context;

use super::render;
use super::view::ApiView;
use crate::error::GeneratorError;

/// Emit `handlers/api.go`: a placeholder implementation of every handler.
pub fn emit_handlers(api: &ApiView, module: &str) -> Result<String, GeneratorError> {
    render(
        "handlers.go.j2",
        include_str!("../../templates/handlers.go.j2"),
        context! {
            module => module,
            operations => api.operations,
            uses_models => api.uses_models,
            uses_time => api.uses_time,
        },
    )
}
