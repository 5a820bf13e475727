use minijinja::context;

use super::render;
use crate::error::GeneratorError;

/// Emit `main.go`: reads `PORT`, serves the generated router and shuts down
/// on SIGINT/SIGTERM with a 30 second grace period.
pub fn emit_main(module: &str) -> Result<String, GeneratorError> {
    render(
        "main.go.j2",
        include_str!("../../templates/main.go.j2"),
        context! { module => module },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_imports_module_packages() {
        let out = emit_main("example.com/svc").unwrap();
        assert!(out.starts_with("package main\n"));
        assert!(out.contains("\t\"example.com/svc/generated/server\"\n"));
        assert!(out.contains("\t\"example.com/svc/handlers\"\n"));
        assert!(out.contains("server.NewServer(handlers.New())"));
        assert!(out.contains("30*time.Second"));
        assert!(out.contains("os.Getenv(\"PORT\")"));
    }
}
