use minijinja::context;

use super::render;
use crate::error::GeneratorError;

pub const GO_VERSION: &str = "1.22";
pub const GIN_VERSION: &str = "v1.10.0";

/// Emit `go.mod` for `module`.
pub fn emit_go_mod(module: &str) -> Result<String, GeneratorError> {
    render(
        "go.mod.j2",
        include_str!("../../templates/go.mod.j2"),
        context! {
            module => module,
            go_version => GO_VERSION,
            gin_version => GIN_VERSION,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_mod() {
        let out = emit_go_mod("github.com/acme/petstore").unwrap();
        insta::assert_snapshot!(out, @r"
        module github.com/acme/petstore

        go 1.22

        require github.com/gin-gonic/gin v1.10.0
        ");
    }
}
