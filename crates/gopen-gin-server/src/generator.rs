use std::path::{Path, PathBuf};

use gopen_core::GenerationConfig;
use gopen_core::load::load_spec;
use gopen_core::normalize::normalize;
use gopen_core::parse::spec::{LoadMode, Specification};
use gopen_core::types::SchemaIndex;
use log::{debug, info};

use crate::artifact::{ARTIFACTS, ArtifactKind};
use crate::emitters::{self, view::ApiView};
use crate::error::{GenerateError, Stage};
use crate::writer::{WriteOutcome, prepare_layout, write_file};

/// One artifact as handled by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub operations: usize,
    pub schemas: usize,
    /// Dangling schema references found while checking the document.
    pub dangling_refs: usize,
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == WriteOutcome::Written)
    }

    pub fn preserved(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == WriteOutcome::Preserved)
    }
}

/// Load the document at `input`, then run [`generate`].
pub fn generate_from_path(
    input: &Path,
    mode: LoadMode,
    config: &GenerationConfig,
) -> Result<GenerationReport, GenerateError> {
    info!("loading {}", input.display());
    let spec = load_spec(input, mode).map_err(|e| GenerateError::new(Stage::Load, e))?;
    generate(spec, config)
}

/// Generate the Go project described by `spec` into `config.output_dir`.
///
/// The first failure stops the run; files written before it stay on disk.
pub fn generate(
    spec: Specification,
    config: &GenerationConfig,
) -> Result<GenerationReport, GenerateError> {
    info!("normalizing {} paths", spec.paths.len());
    let spec = normalize(spec);
    let dangling_refs = SchemaIndex::new(&spec.components)
        .check(&spec)
        .map_err(|e| GenerateError::new(Stage::Normalize, e))?;

    let root = config.output_dir.as_path();
    info!("preparing layout in {}", root.display());
    prepare_layout(root).map_err(|e| GenerateError::new(Stage::Layout, e))?;

    let api = ApiView::new(&spec);
    let mut artifacts = Vec::with_capacity(ARTIFACTS.len());

    for artifact in &ARTIFACTS {
        let stage = match artifact.kind {
            ArtifactKind::ModuleDescriptor => Stage::ModuleDescriptor,
            _ => Stage::EmitArtifacts,
        };
        let file = emitters::emit(artifact.kind, &spec, &api, config)
            .map_err(|e| GenerateError::new(stage, e))?;
        let outcome = write_file(root, &file, artifact.policy)
            .map_err(|e| GenerateError::new(stage, e))?;
        debug!("{}: {outcome:?}", artifact.path);
        artifacts.push(ArtifactReport {
            kind: artifact.kind,
            path: root.join(artifact.path),
            outcome,
        });
    }

    info!(
        "generated {} operations and {} schemas",
        api.operations.len(),
        spec.components.schema_count()
    );
    Ok(GenerationReport {
        operations: api.operations.len(),
        schemas: spec.components.schema_count(),
        dangling_refs,
        artifacts,
    })
}
