//! Apicanon CLI
//!
//! Command-line interface for canonicalizing OpenAPI documents and
//! generating request artifacts from them.

use anyhow::{Context, Result};
use apicanon_common::{ApiSpec, HttpMethod};
use apicanon_generator::{
    AutomationGenerator, CodeTarget, OptionalFieldPolicy, RequestGenerator,
};
use apicanon_parser::{
    analyze_pagination, find_endpoint, find_schema, search_endpoints, EndpointFilter,
    OpenApiParser,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "apicanon")]
#[command(version, about = "Canonicalize OpenAPI specs and generate request artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canonical overview of a spec
    Overview {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// List endpoints, optionally filtered
    #[command(after_help = "EXAMPLES:\n  \
        # All endpoints\n  \
        apicanon endpoints --spec petstore.json\n\n  \
        # Free-text search over paths, summaries, and tags\n  \
        apicanon endpoints --spec petstore.json --query pets\n\n  \
        # Filter by method and tag\n  \
        apicanon endpoints --spec petstore.json --method GET --tag store")]
    Endpoints {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Case-insensitive free-text search
        #[arg(short, long)]
        query: Option<String>,

        /// HTTP method filter (GET, POST, ...)
        #[arg(short, long)]
        method: Option<String>,

        /// Exact tag filter
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Print one endpoint as canonical JSON
    Show {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Endpoint id, e.g. "GET /pets/{id}"
        #[arg(short, long)]
        id: String,
    },

    /// Print one reusable schema as canonical JSON
    Schema {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Component schema name
        #[arg(short, long)]
        name: String,
    },

    /// Generate a request artifact for one endpoint
    #[command(after_help = "EXAMPLES:\n  \
        # curl command\n  \
        apicanon generate --spec petstore.json --id 'GET /pets/{id}' --target curl\n\n  \
        # Python snippet against a specific server\n  \
        apicanon generate --spec petstore.json --id 'POST /pets' \\\n    \
        --target python --base-url https://staging.example.com")]
    Generate {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Endpoint id, e.g. "GET /pets/{id}"
        #[arg(short, long)]
        id: String,

        /// Artifact target
        #[arg(short, long, default_value = "curl")]
        target: Target,

        /// Base URL (defaults to the spec's first server)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Leave optional body fields out of generated examples
        #[arg(long)]
        required_only: bool,
    },

    /// Print the full execution guide for one endpoint as JSON
    Guide {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Endpoint id, e.g. "GET /pets/{id}"
        #[arg(short, long)]
        id: String,

        /// Base URL (defaults to the spec's first server)
        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Build an automation workflow over selected endpoints
    #[command(after_help = "EXAMPLES:\n  \
        # One workflow over every pets endpoint\n  \
        apicanon workflow --spec petstore.json --name 'Pet sync' --query pets")]
    Workflow {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Workflow name
        #[arg(short, long)]
        name: String,

        /// Case-insensitive endpoint search to select members
        #[arg(short, long)]
        query: Option<String>,

        /// Base URL (defaults to the spec's first server)
        #[arg(short, long)]
        base_url: Option<String>,
    },

    /// Describe the spec's authentication requirements
    Auth {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Detect pagination patterns
    Pagination {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Restrict analysis to one endpoint id
        #[arg(short, long)]
        endpoint: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Target {
    Curl,
    Http,
    Javascript,
    Python,
}

impl From<Target> for CodeTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Curl => CodeTarget::Curl,
            Target::Http => CodeTarget::Http,
            Target::Javascript => CodeTarget::JavaScript,
            Target::Python => CodeTarget::Python,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Overview { spec } => {
            let spec = load_spec(&spec, cli.verbose)?;
            overview_command(&spec);
        }

        Commands::Endpoints {
            spec,
            query,
            method,
            tag,
        } => {
            let spec = load_spec(&spec, cli.verbose)?;
            endpoints_command(&spec, query, method.as_deref(), tag)?;
        }

        Commands::Show { spec, id } => {
            let spec = load_spec(&spec, cli.verbose)?;
            let endpoint = find_endpoint(&spec, &id)?;
            println!("{}", serde_json::to_string_pretty(endpoint)?);
        }

        Commands::Schema { spec, name } => {
            let spec = load_spec(&spec, cli.verbose)?;
            let schema = find_schema(&spec, &name)?;
            println!("{}", serde_json::to_string_pretty(schema)?);
        }

        Commands::Generate {
            spec,
            id,
            target,
            base_url,
            required_only,
        } => {
            let spec = load_spec(&spec, cli.verbose)?;
            let endpoint = find_endpoint(&spec, &id)?;
            let base_url = resolve_base_url(&spec, base_url);

            let policy = if required_only {
                OptionalFieldPolicy::Omit
            } else {
                OptionalFieldPolicy::default()
            };
            let generator = RequestGenerator::with_policy(policy)?;
            let artifact = generator.generate(endpoint, &base_url, target.into())?;
            println!("{}", artifact);
        }

        Commands::Guide { spec, id, base_url } => {
            let spec = load_spec(&spec, cli.verbose)?;
            let endpoint = find_endpoint(&spec, &id)?;
            let base_url = resolve_base_url(&spec, base_url);

            let generator = RequestGenerator::new()?;
            let guide = generator.execution_guide(endpoint, &base_url)?;
            println!("{}", serde_json::to_string_pretty(&guide)?);
        }

        Commands::Workflow {
            spec,
            name,
            query,
            base_url,
        } => {
            let spec = load_spec(&spec, cli.verbose)?;
            let base_url = resolve_base_url(&spec, base_url);

            let filter = EndpointFilter {
                query,
                ..EndpointFilter::default()
            };
            let selected: Vec<_> = search_endpoints(&spec, &filter)
                .into_iter()
                .cloned()
                .collect();
            if selected.is_empty() {
                anyhow::bail!("No endpoints matched the workflow selection");
            }

            let mut generator = AutomationGenerator::new();
            let workflow = generator.workflow(&name, &selected, &base_url);
            println!("{}", serde_json::to_string_pretty(&workflow)?);
        }

        Commands::Auth { spec } => {
            let spec = load_spec(&spec, cli.verbose)?;
            auth_command(&spec);
        }

        Commands::Pagination { spec, endpoint } => {
            let spec = load_spec(&spec, cli.verbose)?;
            let report = analyze_pagination(&spec, endpoint.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Read and canonicalize a document, sniffing JSON vs YAML. `-` reads the
/// document from stdin.
fn load_spec(path: &Path, verbose: bool) -> Result<ApiSpec> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Failed to read spec from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read spec file: {}", path.display()))?
    };

    let yaml_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"));

    let parser = if yaml_extension {
        OpenApiParser::from_yaml(&content).context("Failed to parse OpenAPI document")?
    } else {
        // Anything that isn't valid JSON gets a second chance as YAML
        OpenApiParser::from_json(&content)
            .or_else(|_| OpenApiParser::from_yaml(&content))
            .context("Failed to parse OpenAPI document")?
    };

    let spec = parser
        .canonicalize()
        .context("Failed to canonicalize OpenAPI document")?;

    if verbose {
        println!(
            "{} Loaded {} {} ({} endpoints)",
            "→".cyan(),
            spec.title.yellow(),
            spec.version,
            spec.endpoints.len()
        );
    }

    Ok(spec)
}

fn resolve_base_url(spec: &ApiSpec, explicit: Option<String>) -> String {
    explicit.unwrap_or_else(|| {
        spec.servers
            .first()
            .map(|s| s.url.clone())
            .unwrap_or_else(|| "https://api.example.com".to_string())
    })
}

fn overview_command(spec: &ApiSpec) {
    println!("{}", spec.title.bold());
    println!("  Version: {}", spec.version.yellow());
    if let Some(ref description) = spec.description {
        println!("  {}", description);
    }

    println!("\n{}", "Servers:".bold());
    for server in &spec.servers {
        match server.description {
            Some(ref desc) => println!("  • {} ({})", server.url.cyan(), desc),
            None => println!("  • {}", server.url.cyan()),
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Endpoints: {}", spec.summary.total_endpoints);
    for (method, count) in &spec.summary.endpoints_by_method {
        println!("    {}: {}", method, count);
    }
    if !spec.summary.authentication_types.is_empty() {
        println!(
            "  Authentication: {}",
            spec.summary.authentication_types.join(", ")
        );
    }
    if !spec.summary.common_content_types.is_empty() {
        println!(
            "  Content types: {}",
            spec.summary.common_content_types.join(", ")
        );
    }

    if !spec.tags.is_empty() {
        println!("\n{}", "Tags:".bold());
        for tag in &spec.tags {
            println!("  • {} ({} endpoints)", tag.name.cyan(), tag.endpoints.len());
        }
    }
}

fn endpoints_command(
    spec: &ApiSpec,
    query: Option<String>,
    method: Option<&str>,
    tag: Option<String>,
) -> Result<()> {
    let method = method
        .map(|m| {
            HttpMethod::parse(m).ok_or_else(|| anyhow::anyhow!("Unknown HTTP method: {}", m))
        })
        .transpose()?;

    let filter = EndpointFilter { query, method, tag };
    let hits = search_endpoints(spec, &filter);

    println!("{} {} endpoint(s)", "✓".green(), hits.len());
    for endpoint in hits {
        let mut line = format!("  {:7} {}", endpoint.method.as_str(), endpoint.path);
        if let Some(ref summary) = endpoint.summary {
            line.push_str(&format!("  {}", summary.dimmed()));
        }
        println!("{}", line);
    }

    Ok(())
}

fn auth_command(spec: &ApiSpec) {
    println!("{}", "Default security:".bold());
    if spec.default_security.is_empty() {
        println!("  (none declared)");
    }
    for requirement in &spec.default_security {
        println!(
            "  • {}: {}",
            requirement.type_name().cyan(),
            requirement.instruction()
        );
    }

    let overrides: Vec<_> = spec
        .endpoints
        .iter()
        .filter(|e| e.security != spec.default_security)
        .collect();
    if !overrides.is_empty() {
        println!("\n{}", "Endpoint overrides:".bold());
        for endpoint in overrides {
            let instructions: Vec<&str> = endpoint
                .security
                .iter()
                .map(|s| s.instruction())
                .collect();
            println!("  {}: {}", endpoint.id.cyan(), instructions.join("; "));
        }
    }
}
