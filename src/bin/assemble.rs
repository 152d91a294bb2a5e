//! Schema Assembly CLI
//!
//! Assembles a definition document and reports what the registry looks like.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use familiar_assembly::diagnostics::format_all;
use familiar_assembly::loader::{load_document, Sources};
use familiar_assembly::{Assembler, AssemblyConfig, Registry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-assemble")]
#[command(about = "Assemble and validate schema definitions")]
struct Cli {
    /// Config file (defaults to assembly.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a document and list its errors
    Check {
        /// Definition document (JSON)
        file: PathBuf,
        /// List registered types and directives
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the registry report as JSON
    Report {
        /// Definition document (JSON)
        file: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().to_string());
    let config =
        AssemblyConfig::load_from(config_path.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Check { file, verbose } => {
            println!("🔍 Assembling {}", file.display());
            let registry = assemble_file(config, &file)?;

            println!(
                "  {} types, {} directives, {} exported",
                registry.type_map().len(),
                registry.directive_map().len(),
                registry.exports().len()
            );
            if verbose {
                print_registrations(&registry);
            }

            if !registry.is_valid() {
                println!("❌ {} error(s):", registry.errors().len());
                println!("{}", format_all(registry.errors()));
            }
            registry.materialize().context("materializing artifacts")?;

            if !registry.is_valid() {
                std::process::exit(1);
            }
            println!("✅ Schema is valid");
            Ok(())
        }

        Commands::Report { file, output } => {
            let registry = assemble_file(config, &file)?;
            let report_json = registry.report().to_json_pretty()?;

            if let Some(path) = output {
                std::fs::write(&path, &report_json)?;
                println!("✅ Report written to {:?}", path);
            } else {
                println!("{}", report_json);
            }
            Ok(())
        }

        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn print_registrations(registry: &Registry) {
    for identifier in registry.type_identifiers() {
        let exported = if registry.is_exported(identifier) { " (exported)" } else { "" };
        println!("  ├─ type {}{}", identifier, exported);
    }
    for identifier in registry.directive_identifiers() {
        println!("  ├─ directive {}", identifier);
    }
}

fn assemble_file(config: AssemblyConfig, file: &Path) -> anyhow::Result<Registry> {
    let loaded = load_document(file, &Sources::from_config(&config))
        .with_context(|| format!("loading {}", file.display()))?;
    Ok(Assembler::new(config).assemble(loaded.definitions, &loaded.descriptions))
}
