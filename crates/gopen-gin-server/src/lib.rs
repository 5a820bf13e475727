pub mod artifact;
pub mod emitters;
pub mod error;
pub mod generator;
pub mod writer;

pub use artifact::{ARTIFACTS, Artifact, ArtifactKind, WritePolicy};
pub use error::{GenerateError, GeneratorError, Stage};
pub use generator::{ArtifactReport, GenerationReport, generate, generate_from_path};
pub use writer::WriteOutcome;
