use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use gopen_core::config::{self, CONFIG_FILE_NAME, GopenConfig};
use gopen_core::load::load_spec;
use gopen_core::normalize::normalize;
use gopen_core::parse::spec::{LoadMode, Specification};
use gopen_core::types::{SchemaIndex, TypeResolver};
use gopen_core::GenerationConfig;
use gopen_gin_server::emitters::view::ApiView;
use gopen_gin_server::{WriteOutcome, generate_from_path};

#[derive(Parser)]
#[command(name = "gopen", about = "Generate a Go/Gin server project from an OpenAPI document", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Go project from an API description
    Generate {
        /// Path to the API description (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory of the Go project
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Go package name (defaults to the output directory name)
        #[arg(long)]
        package: Option<String>,

        /// Go module path (defaults to an existing go.mod, then the package name)
        #[arg(long)]
        module: Option<String>,

        /// Require openapi, info, paths and components.schemas
        #[arg(long)]
        strict: bool,
    },

    /// Validate an API description
    Validate {
        /// Path to the API description
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Require openapi, info, paths and components.schemas
        #[arg(long)]
        strict: bool,
    },

    /// Print the normalized operations and schemas of an API description
    Inspect {
        /// Path to the API description
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default .gopen.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            package,
            module,
            strict,
        } => cmd_generate(input, output, package, module, strict),

        Commands::Validate { input, strict } => cmd_validate(input, strict),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "gopen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `.gopen.yaml` from the current directory, or the defaults.
fn project_config() -> Result<GopenConfig> {
    let loaded = config::load_config(Path::new(CONFIG_FILE_NAME))?;
    if loaded.is_some() {
        debug!("using {CONFIG_FILE_NAME}");
    }
    Ok(loaded.unwrap_or_default())
}

fn load_mode(strict: bool, cfg: &GopenConfig) -> LoadMode {
    if strict { LoadMode::Strict } else { cfg.mode }
}

/// Module path declared by an existing `go.mod` in `output`.
fn detect_module(output: &Path) -> Option<String> {
    let content = fs::read_to_string(output.join("go.mod")).ok()?;
    content.lines().find_map(|line| {
        line.trim()
            .strip_prefix("module ")
            .map(|m| m.trim().trim_matches('"').to_string())
            .filter(|m| !m.is_empty())
    })
}

/// Go package name derived from the output directory's base name.
fn default_package(output: &Path) -> String {
    let resolved = fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf());
    let name: String = resolved
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("api{name}")
    } else {
        name
    }
}

fn load_normalized(input: &Path, mode: LoadMode) -> Result<Specification> {
    let spec = load_spec(input, mode).with_context(|| format!("failed to load {}", input.display()))?;
    Ok(normalize(spec))
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    package: Option<String>,
    module: Option<String>,
    strict: bool,
) -> Result<()> {
    let cfg = project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let package = package
        .or_else(|| cfg.package.clone())
        .unwrap_or_else(|| default_package(&output));
    let module = module
        .or_else(|| cfg.module.clone())
        .or_else(|| detect_module(&output))
        .unwrap_or_default();

    let config = GenerationConfig::new(&output, package, module);
    eprintln!(
        "Generating {} → {} (module {})",
        input.display(),
        output.display(),
        config.module_name()
    );

    let report = generate_from_path(&input, load_mode(strict, &cfg), &config)?;

    for artifact in &report.artifacts {
        match artifact.outcome {
            WriteOutcome::Written => eprintln!("  wrote {}", artifact.path.display()),
            WriteOutcome::Preserved => eprintln!("  kept  {}", artifact.path.display()),
        }
    }
    if report.dangling_refs > 0 {
        eprintln!(
            "  warning: {} references name no component schema (set RUST_LOG=warn for details)",
            report.dangling_refs
        );
    }
    eprintln!(
        "Generated {} operations and {} schemas in {}",
        report.operations,
        report.schemas,
        output.display()
    );
    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, strict: bool) -> Result<()> {
    let cfg = project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = load_normalized(&input, load_mode(strict, &cfg))?;

    let index = SchemaIndex::new(&spec.components);
    let dangling = index.check(&spec)?;

    eprintln!(
        "Valid API description: {} {}",
        spec.info.title,
        spec.openapi.as_deref().unwrap_or("(no openapi version)")
    );
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Operations: {}", spec.operation_count());
    eprintln!("  Schemas: {}", index.len());
    if dangling > 0 {
        eprintln!("  Dangling references: {dangling}");
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let cfg = project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = load_normalized(&input, cfg.mode)?;

    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &Specification) -> serde_json::Value {
    let resolver = TypeResolver::new();
    let schemas: Vec<serde_json::Value> = spec
        .components
        .schemas()
        .map(|(name, node)| {
            serde_json::json!({
                "name": name,
                "go_type": resolver.resolve(node),
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = ApiView::new(spec)
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "operation_id": op.operation_id,
                "handler": op.handler,
                "method": op.method,
                "path": op.path,
                "gin_path": op.gin_path,
                "tags": op.tags,
                "body": op.body_type,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "schemas": schemas,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
