pub mod contract;
pub mod entry;
pub mod guide;
pub mod models;
pub mod module_descriptor;
pub mod router;
pub mod stub;
pub mod view;

use gopen_core::parse::spec::Specification;
use gopen_core::{GeneratedFile, GenerationConfig};
use minijinja::Environment;

use crate::artifact::ArtifactKind;
use crate::error::GeneratorError;
use view::ApiView;

/// Render one embedded template.
pub(crate) fn render(
    name: &'static str,
    source: &'static str,
    ctx: minijinja::Value,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template(name, source)?;
    Ok(env.get_template(name)?.render(ctx)?)
}

/// Render the content of `kind` for a normalized specification.
///
/// Rendering has no side effects; see [`crate::writer`] for the disk step.
pub fn emit(
    kind: ArtifactKind,
    spec: &Specification,
    api: &ApiView,
    config: &GenerationConfig,
) -> Result<GeneratedFile, GeneratorError> {
    let module = config.module_name();
    let content = match kind {
        ArtifactKind::ModuleDescriptor => module_descriptor::emit_go_mod(module)?,
        ArtifactKind::EntryPoint => entry::emit_main(module)?,
        ArtifactKind::HandlerStub => stub::emit_handlers(api, module)?,
        ArtifactKind::HandlerContract => contract::emit_interfaces(api, module)?,
        ArtifactKind::Models => models::emit_models(spec)?,
        ArtifactKind::Router => router::emit_router(api, module)?,
        ArtifactKind::Guide => guide::emit_readme(spec, api, config)?,
    };
    Ok(GeneratedFile {
        path: kind.path().to_string(),
        content,
    })
}
