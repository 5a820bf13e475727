pub mod config;
pub mod error;
pub mod load;
pub mod naming;
pub mod normalize;
pub mod parse;
pub mod types;

use std::path::PathBuf;

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}

/// Where and under which names a Go project is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub output_dir: PathBuf,
    pub package_name: String,
    pub module_name: String,
}

impl GenerationConfig {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        package_name: impl Into<String>,
        module_name: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            package_name: package_name.into(),
            module_name: module_name.into(),
        }
    }

    /// Module path for `go.mod` and imports; the package name when unset.
    pub fn module_name(&self) -> &str {
        if self.module_name.is_empty() {
            &self.package_name
        } else {
            &self.module_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_falls_back_to_package() {
        let config = GenerationConfig::new("out", "petstore", "");
        assert_eq!(config.module_name(), "petstore");

        let config = GenerationConfig::new("out", "petstore", "github.com/acme/petstore");
        assert_eq!(config.module_name(), "github.com/acme/petstore");
    }
}
