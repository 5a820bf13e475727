use std::fmt;
use std::path::PathBuf;

use gopen_core::error::{LoadError, ResolveError};
use thiserror::Error;

/// Failure while rendering or writing one artifact.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pipeline step a run was in when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Normalize,
    Layout,
    ModuleDescriptor,
    EmitArtifacts,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::Layout => "layout",
            Stage::ModuleDescriptor => "module descriptor",
            Stage::EmitArtifacts => "emit artifacts",
        })
    }
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// A failed run: the stage it stopped in and what went wrong there.
#[derive(Debug, Error)]
#[error("generation failed in {stage} stage")]
pub struct GenerateError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}

impl GenerateError {
    pub fn new(stage: Stage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}
