use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::parse::OutputFormat;

#[derive(Parser)]
#[command(name = "nrp")]
#[command(about = "Heroes of the Storm replay parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse replays (directories of extracted streams) into match records
    Parse {
        /// Replay directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long, default_value_t = false, conflicts_with = "summary")]
        pretty: bool,

        /// One-line text summary instead of JSON
        #[arg(long, default_value_t = false)]
        summary: bool,

        /// Refuse config keys nothing reads
        #[arg(long, default_value_t = false)]
        strict_config: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides...)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the base builds decoders are registered for
    Decoders {
        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience, e.g. RUST_LOG).
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Parse {
            paths,
            config_paths,
            pretty,
            summary,
            strict_config,
        } => {
            let settings = commands::load_settings(&config_paths, strict_config)?;
            let registry = commands::build_registry(&settings)?;
            let format = if summary {
                OutputFormat::Summary
            } else if pretty {
                OutputFormat::Pretty
            } else {
                OutputFormat::Json
            };
            commands::parse::run(&paths, &registry, &settings, format)?;
        }

        Commands::ConfigHash { paths } => {
            let loaded = nrp_config::load_layered_yaml(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Decoders { config_paths } => {
            let settings = commands::load_settings(&config_paths, false)?;
            let registry = commands::build_registry(&settings)?;
            for build in registry.builds() {
                println!("{build}");
            }
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries records only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
