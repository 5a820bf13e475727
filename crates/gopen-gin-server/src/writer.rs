use std::fs;
use std::path::Path;

use gopen_core::GeneratedFile;
use log::debug;

use crate::artifact::{LAYOUT_DIRS, WritePolicy};
use crate::error::GeneratorError;

/// What happened to one artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// A create-once file already existed and was left alone.
    Preserved,
}

/// Create the output root and every artifact directory.
pub fn prepare_layout(root: &Path) -> Result<(), GeneratorError> {
    for dir in LAYOUT_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path).map_err(|source| GeneratorError::Io { path, source })?;
    }
    Ok(())
}

/// Write `file` under `root` according to `policy`.
pub fn write_file(
    root: &Path,
    file: &GeneratedFile,
    policy: WritePolicy,
) -> Result<WriteOutcome, GeneratorError> {
    let path = root.join(&file.path);

    if policy == WritePolicy::CreateOnce && path.exists() {
        debug!("preserving {}", path.display());
        return Ok(WriteOutcome::Preserved);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, &file.content).map_err(|source| GeneratorError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("wrote {}", path.display());
    Ok(WriteOutcome::Written)
}
