use std::fs;
use std::path::Path;

use log::debug;

use crate::error::LoadError;
use crate::parse::spec::{LoadMode, Specification};
use crate::parse::{from_json, from_yaml};

/// Document syntax, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format for `path`; the extension is compared case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

/// Parse `content` in the given format and apply `mode`.
pub fn parse_spec(
    content: &str,
    format: DocumentFormat,
    mode: LoadMode,
) -> Result<Specification, LoadError> {
    let raw = match format {
        DocumentFormat::Yaml => from_yaml(content)?,
        DocumentFormat::Json => from_json(content)?,
    };
    raw.into_specification(mode)
}

/// Read and parse the document at `path`.
///
/// The extension is checked before the file is opened.
pub fn load_spec(path: &Path, mode: LoadMode) -> Result<Specification, LoadError> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} ({} bytes, {format:?})", path.display(), content.len());
    parse_spec(&content, format, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.yaml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.Json")).unwrap(),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_unsupported_extension_is_rejected_before_reading() {
        // The file does not exist, so an Io error would mean it was opened.
        let err = load_spec(Path::new("does/not/exist.txt"), LoadMode::Lenient).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "txt"));

        let err = load_spec(Path::new("no_extension"), LoadMode::Lenient).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext.is_empty()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_spec(Path::new("does/not/exist.yaml"), LoadMode::Lenient).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_spec("{ not json", DocumentFormat::Json, LoadMode::Lenient).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
