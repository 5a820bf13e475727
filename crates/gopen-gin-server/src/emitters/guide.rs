use gopen_core::GenerationConfig;
use gopen_core::parse::spec::Specification;
use minijinja::context;
use serde::Serialize;

use super::render;
use super::view::ApiView;
use crate::artifact::ARTIFACTS;
use crate::error::GeneratorError;

#[derive(Serialize)]
struct FileRow {
    path: &'static str,
    policy: String,
}

/// Emit `README.md`: API summary, endpoints by tag and the regeneration
/// policy of every file.
pub fn emit_readme(
    spec: &Specification,
    api: &ApiView,
    config: &GenerationConfig,
) -> Result<String, GeneratorError> {
    let title = if spec.info.title.is_empty() {
        config.package_name.as_str()
    } else {
        spec.info.title.as_str()
    };
    let files: Vec<FileRow> = ARTIFACTS
        .iter()
        .map(|a| FileRow {
            path: a.path,
            policy: a.policy.to_string(),
        })
        .collect();

    render(
        "README.md.j2",
        include_str!("../../templates/README.md.j2"),
        context! {
            title => title,
            version => spec.info.version,
            description => spec.info.description.trim(),
            module => config.module_name(),
            package => config.package_name,
            groups => api.by_tag(),
            files => files,
        },
    )
}
