use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use oav_core::Document;
use oav_core::config::{self, CONFIG_FILE_NAME, OavConfig, OutputFormat};
use oav_core::parse::operation::HttpMethod;
use oav_core::view::{self, GroupBy};

#[derive(Parser)]
#[command(name = "oav", about = "OpenAPI 3.x specification viewer", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the endpoints of a spec
    Endpoints {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Group the listing by path or by tag
        #[arg(long)]
        group_by: Option<GroupByArg>,
    },

    /// Show one operation with every schema dereferenced
    Show {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Route path, e.g. /pets/{petId}
        #[arg(short, long)]
        path: String,

        /// HTTP method, e.g. get
        #[arg(short, long)]
        method: String,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Expand a single component pointer and print the result
    Resolve {
        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pointer of the form '#/components/<category>/<name>'
        pointer: String,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Parse a spec and print summary counts
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new oav configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

impl FormatArg {
    fn into_core(self) -> OutputFormat {
        match self {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupByArg {
    Path,
    Tag,
}

impl GroupByArg {
    fn into_core(self) -> GroupBy {
        match self {
            GroupByArg::Path => GroupBy::Path,
            GroupByArg::Tag => GroupBy::Tag,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Endpoints { input, group_by } => cmd_endpoints(input, group_by),

        Commands::Show {
            input,
            path,
            method,
            format,
        } => cmd_show(input, path, method, format),

        Commands::Resolve {
            input,
            pointer,
            format,
        } => cmd_resolve(input, pointer, format),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oav", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OavConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_document(input: Option<PathBuf>, cfg: &OavConfig) -> Result<Document> {
    let path = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let document = match ext {
        "json" => Document::from_json(&content)?,
        _ => Document::from_yaml(&content)?,
    };
    Ok(document)
}

fn render<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(value)?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_endpoints(input: Option<PathBuf>, group_by: Option<GroupByArg>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let document = load_document(input, &cfg)?;

    let group_by = group_by
        .map(GroupByArg::into_core)
        .unwrap_or(cfg.endpoints.group_by);

    let mut listing = view::endpoints(&document);
    if !cfg.endpoints.show_deprecated {
        listing.retain(|e| !e.deprecated);
    }

    for (group, members) in view::group_endpoints(&listing, group_by) {
        println!("{}", group);
        for endpoint in members {
            let label = endpoint
                .summary
                .or(endpoint.operation_id)
                .unwrap_or_default();
            let mark = if endpoint.deprecated {
                " (deprecated)"
            } else {
                ""
            };
            println!(
                "  {:<7} {} {}{}",
                endpoint.method.as_str().to_uppercase(),
                endpoint.path,
                label,
                mark
            );
        }
    }
    Ok(())
}

fn cmd_show(
    input: Option<PathBuf>,
    path: String,
    method: String,
    format: Option<FormatArg>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let document = load_document(input, &cfg)?;

    let Some(method) = HttpMethod::parse(&method) else {
        bail!("unknown HTTP method: {method}");
    };
    debug!("building operation view for {method} {path}");

    let Some(view) = view::operation_view(&document, &path, method)? else {
        bail!("no operation {} {}", method.as_str().to_uppercase(), path);
    };

    let format = format.map(FormatArg::into_core).unwrap_or(cfg.format);
    render(&view, format)
}

fn cmd_resolve(input: Option<PathBuf>, pointer: String, format: Option<FormatArg>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let document = load_document(input, &cfg)?;

    let expanded = document.resolve_component(&pointer);
    let format = format.map(FormatArg::into_core).unwrap_or(cfg.format);
    render(&expanded.to_value(), format)
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let cfg = OavConfig::default();
    let document = load_document(Some(input), &cfg)?;
    let spec = document.spec();

    eprintln!("Valid OpenAPI {} spec: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Operations: {}", view::endpoints(&document).len());

    if let Some(ref components) = spec.components {
        eprintln!("  Schemas: {}", components.schemas.len());
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
