//! Command-line interface for contract-xsd

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing::info;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use contract_xsd::generator::{Generator, GeneratorConfig};

#[cfg(feature = "cli")]
const LONG_ABOUT: &str = "\
Generates an XML Schema from the contract types of a type model.

Every type carrying a dataContract annotation seeds the schema. Types its
members refer to are added until nothing new is referenced, and list members
get an ArrayOf<Name> wrapper type. Each model file <name>.json produces
<name>.xsd next to it, or in the output directory when one is given.";

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "contract-xsd")]
#[command(author, version, about = "Generate XSD from contract type models", long_about = LONG_ABOUT)]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Overwrite existing schema files
    #[arg(short, long)]
    force: bool,

    /// Type model file to process (repeatable)
    #[arg(short, long = "assembly", value_name = "FILE", required = true)]
    assemblies: Vec<PathBuf>,

    /// Directory searched for dependency models (repeatable)
    #[arg(short, long = "directory", value_name = "DIR")]
    directories: Vec<PathBuf>,

    /// Output directory (defaults to each input's directory)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Root element to add for a type (repeatable)
    #[arg(short, long = "root", value_name = "NAME")]
    roots: Vec<String>,

    /// Only seed with these contract types (repeatable)
    #[arg(short, long = "type", value_name = "NAME")]
    types: Vec<String>,
}

#[cfg(feature = "cli")]
impl Cli {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new()
            .with_roots(self.roots.clone())
            .with_types(self.types.clone())
            .with_overwrite(self.force)
            .with_verbose(self.verbose);
        for dir in &self.directories {
            config = config.with_search_dir(dir);
        }
        if let Some(output) = &self.output {
            config = config.with_output_dir(output);
        }
        config
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let generator = Generator::new(cli.config());
    let summary = generator.run(&cli.assemblies);

    for outcome in &summary.succeeded {
        info!(
            errors = outcome.diagnostics.error_count(),
            warnings = outcome.diagnostics.warning_count(),
            "Generated {}",
            outcome.output.display()
        );
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
