use crate::config::load_effective_config;
use crate::descriptor::load_descriptor_set;
use crate::generator::{generate_files, plan_files, GenerateOptions};
use crate::linter::{fail_if_errors, lint_descriptor_set, print_lint_issues, LintSeverity};
use crate::routes::{build_route_tables, FileRoutes};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for rpcroute
#[derive(Parser)]
#[command(name = "rpcroute-gen")]
#[command(about = "Generate HTTP route registration from RPC service descriptors", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate route registration files from a descriptor set
    Generate {
        /// Descriptor set file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Root directory for generated files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Generator config (rpcroute.toml)
        /// If not provided, will auto-detect alongside the descriptor set
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Perform a dry run: show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Do not run the formatter on generated files
        #[arg(long, default_value_t = false)]
        no_format: bool,
    },
    /// Print the resolved route table
    Inspect {
        /// Descriptor set file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Lint a descriptor set
    ///
    /// Checks for unresolvable payload types, duplicate routes, empty or
    /// malformed HTTP annotations and methods that silently default to POST.
    Lint {
        /// Descriptor set file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

/// `VERB /path -> handler` lines grouped by file and service.
#[must_use]
pub fn format_route_table(tables: &[FileRoutes]) -> String {
    let mut out = String::new();
    for file in tables {
        out.push_str(&format!("{}\n", file.path));
        for service in &file.services {
            out.push_str(&format!("  {}\n", service.full_name));
            for binding in &service.bindings {
                out.push_str(&format!(
                    "    {:<7} {} -> {}\n",
                    binding.verb,
                    binding.route_path(),
                    binding.handler_name()
                ));
            }
        }
    }
    out
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Fails on unreadable input, an unresolvable payload type, write or
/// formatter errors, and lint errors when `--fail-on-error` is set.
pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            input,
            output,
            config,
            force,
            dry_run,
            no_format,
        } => {
            let set = load_descriptor_set(input)?;
            let mut config = load_effective_config(config.as_deref(), input)?;
            if *no_format {
                config.format = false;
            }
            if *dry_run {
                for file in plan_files(&set, &config, output)? {
                    println!(
                        "📝 Would write {} ({} routes)",
                        file.path.display(),
                        file.routes
                    );
                }
                return Ok(());
            }
            let options = GenerateOptions {
                output_dir: output.clone(),
                force: *force,
                dry_run: false,
                config,
            };
            let written = generate_files(&set, &options)?;
            for path in &written {
                println!("✅ Generated {}", path.display());
            }
            info!(files = written.len(), "generation complete");
            Ok(())
        }
        Commands::Inspect { input, json } => {
            let set = load_descriptor_set(input)?;
            let tables = build_route_tables(&set).context("Failed to build route tables")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&tables)?);
            } else {
                print!("{}", format_route_table(&tables));
            }
            Ok(())
        }
        Commands::Lint {
            input,
            fail_on_error,
            errors_only,
        } => {
            let set = load_descriptor_set(input)?;
            let mut issues = lint_descriptor_set(&set);
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if *fail_on_error {
                fail_if_errors(&issues)?;
            }
            Ok(())
        }
    }
}
