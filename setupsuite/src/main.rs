//! SetupSuite - declarative first-boot setup for Linux servers
//!
//! This is the main entry point for the SetupSuite CLI.

mod report;

use anyhow::Context;
use clap::{Parser, Subcommand};
use setupsuite_config::{
    create_default_config, load_file, read_config, Format, ReadOutcome, DEFAULT_CONFIG_PATH,
};
use setupsuite_core::ServerRole;
use setupsuite_plan::StepRegistry;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// SetupSuite - turn a fresh server into a hardened, role-specific machine
#[derive(Parser)]
#[command(name = "setupsuite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration for a server role
    Generate {
        /// Server role: web, database, docker, proxy, build or basic
        #[arg(short = 't', long = "type", value_parser = parse_role)]
        role: ServerRole,

        /// Where to write the configuration
        #[arg(short, long, env = "SETUPSUITE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(env = "SETUPSUITE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Print the parsed configuration
    Show {
        /// Path to the configuration file
        #[arg(env = "SETUPSUITE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Output format: sscfg, json or toml
        #[arg(long, default_value = "sscfg")]
        format: Format,
    },

    /// Show what setting up the server would do, without doing it
    Plan {
        /// Path to the configuration file
        #[arg(env = "SETUPSUITE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn parse_role(value: &str) -> Result<ServerRole, String> {
    value.parse().map_err(|e: setupsuite_core::Error| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::ERROR
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Generate {
            role,
            config,
            force,
        } => {
            tracing::info!("Generating {} config at {}", role, config.display());
            create_default_config(role, &config, force)
                .with_context(|| format!("Failed to write {}", config.display()))?;
            println!("✅ Wrote {} configuration to {}", role, config.display());
            println!("📝 {}", role.description());
            println!("   Edit the placeholder values before running setupsuite.");
        }

        Commands::Validate { config } => {
            tracing::info!("Validating config: {}", config.display());
            let doc = load_file(&config)?;
            report::diagnostics(&doc)?;

            let issues = doc.parsed.tree.validate();
            let errors = report::issues(&issues);
            if errors > 0 {
                eprintln!("❌ Configuration '{}' has {} error(s)", config.display(), errors);
                std::process::exit(1);
            }

            println!("✅ Configuration '{}' is valid!", config.display());
            if doc.parsed.has_diagnostics() || !issues.is_empty() {
                println!(
                    "   {} parser warning(s), {} validation warning(s)",
                    doc.parsed.diagnostics.len(),
                    issues.len()
                );
            }
        }

        Commands::Show { config, format } => {
            let doc = load_file(&config)?;
            report::diagnostics(&doc)?;
            let rendered = format
                .render(&doc.parsed.tree)
                .with_context(|| format!("Failed to render {} as {}", config.display(), format))?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }

        Commands::Plan { config, json } => match read_config(Some(&config))? {
            ReadOutcome::Created(path) => {
                println!("📝 No configuration found; created a default one at {}", path.display());
                println!("   Edit it, then run `setupsuite plan` again.");
            }
            ReadOutcome::Loaded(doc) => {
                report::diagnostics(&doc)?;
                let plan = StepRegistry::with_defaults().plan(&doc.parsed.tree);

                if json {
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                } else if plan.is_empty() {
                    println!("Nothing to do for {}", config.display());
                } else {
                    println!("📋 Plan for {}:", config.display());
                    for (i, planned) in plan.actions.iter().enumerate() {
                        println!("  {:>2}. [{}] {}", i + 1, planned.step, planned.action);
                    }
                    for note in &plan.notes {
                        println!("  💡 [{}] {}", note.step, note.message);
                    }
                }
            }
        },

        Commands::Version => {
            println!("SetupSuite v{}", setupsuite_core::VERSION);
            println!("Built with ❤️ in Rust");
        }
    }

    Ok(())
}
